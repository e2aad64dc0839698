//! # Vocabulary IO
//!
//! Vocabulary files are flat text, one token per line:
//! ```terminaloutput
//! {TOKEN}
//! ```
//!
//! Lines are trimmed; blank lines are skipped and do not take an id.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::errors::SeqfeedResult;

/// Count the vocabulary entries in a vocab file.
///
/// This is the number of lines which are non-empty after trimming.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn count_vocab_lines_path<P: AsRef<Path>>(path: P) -> SeqfeedResult<usize> {
    let reader = BufReader::new(File::open(path)?);
    count_vocab_lines(reader)
}

/// Count the non-empty (trimmed) lines of a vocab line reader.
pub fn count_vocab_lines<R: BufRead>(reader: R) -> SeqfeedResult<usize> {
    let mut size = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            size += 1;
        }
    }
    Ok(size)
}

/// Load the tokens of a vocab file, in id order.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_tokens_path<P: AsRef<Path>>(path: P) -> SeqfeedResult<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    read_vocab_tokens(reader)
}

/// Read the tokens of a vocab line reader, in id order.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_vocab_tokens<R: BufRead>(reader: R) -> SeqfeedResult<Vec<String>> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let token = line.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
    Ok(tokens)
}

/// Save tokens to a vocab file, one per line.
///
/// # Arguments
/// * `tokens` - the tokens, in id order.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_tokens_path<S: AsRef<str>, P: AsRef<Path>>(
    tokens: &[S],
    path: P,
) -> SeqfeedResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab_tokens(tokens, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write tokens to a [`Write`] writer, one per line.
///
/// # Arguments
/// * `tokens` - the tokens, in id order.
/// * `writer` - the writer to target.
pub fn write_vocab_tokens<S, W>(
    tokens: &[S],
    writer: &mut W,
) -> SeqfeedResult<()>
where
    S: AsRef<str>,
    W: Write,
{
    for token in tokens {
        writeln!(writer, "{}", token.as_ref())?;
    }
    Ok(())
}
