//! # Parallel Text Lines

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use crate::errors::SeqfeedResult;

/// One aligned `(source, target)` line pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePair {
    /// The source sentence.
    pub source: String,

    /// The target sentence.
    pub target: String,
}

impl LinePair {
    /// Create a new line pair.
    pub fn new<S: Into<String>, U: Into<String>>(
        source: S,
        target: U,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Zips two line streams, aligned by line number.
///
/// Iteration stops at the end of the shorter stream; a length mismatch
/// is logged once as a warning. Line terminators (`\n`, `\r\n`) are stripped.
pub struct TextLinePairs<A: BufRead, B: BufRead> {
    source: Lines<A>,
    target: Lines<B>,
    line: usize,
    done: bool,
}

impl<A: BufRead, B: BufRead> TextLinePairs<A, B> {
    /// Zip two line readers.
    pub fn new(
        source: A,
        target: B,
    ) -> Self {
        Self {
            source: source.lines(),
            target: target.lines(),
            line: 0,
            done: false,
        }
    }
}

/// Open a pair of aligned corpus files.
///
/// ## Arguments
/// * `src_path` - the source sentences, one per line.
/// * `tgt_path` - the target sentences, one per line.
pub fn open_text_line_pairs<P, Q>(
    src_path: P,
    tgt_path: Q,
) -> SeqfeedResult<TextLinePairs<BufReader<File>, BufReader<File>>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = BufReader::new(File::open(src_path)?);
    let target = BufReader::new(File::open(tgt_path)?);
    Ok(TextLinePairs::new(source, target))
}

fn strip_cr(mut line: String) -> String {
    if line.ends_with('\r') {
        line.pop();
    }
    line
}

impl<A: BufRead, B: BufRead> Iterator for TextLinePairs<A, B> {
    type Item = SeqfeedResult<LinePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let pair = match (self.source.next(), self.target.next()) {
            (Some(Ok(source)), Some(Ok(target))) => {
                Ok(LinePair::new(strip_cr(source), strip_cr(target)))
            }
            (Some(Err(e)), _) | (_, Some(Err(e))) => {
                self.done = true;
                Err(e.into())
            }
            (None, None) => {
                self.done = true;
                return None;
            }
            (Some(_), None) | (None, Some(_)) => {
                log::warn!(
                    "parallel corpus length mismatch; truncating to {} lines",
                    self.line
                );
                self.done = true;
                return None;
            }
        };

        self.line += 1;
        Some(pair)
    }
}
