//! # Pretrained Word Vector Loading
//!
//! Vector files are whitespace-separated text:
//! ```terminaloutput
//! {TOKEN} {V1} {V2} ... {VN}
//! ```
//!
//! Line `i` is the vector for vocabulary id `i`. Blank lines are skipped.
//! A leading `{COUNT} {WIDTH}` header (as in fastText `.vec` files)
//! is detected and skipped by default; see [`VectorHeader`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{
    embedding::{EmbeddingMatrix, RESERVED_ROWS},
    errors::{SeqfeedError, SeqfeedResult},
    types::TokenType,
    vocab::VocabTable,
};

/// Default embedding width.
pub const DEFAULT_EMBEDDING_WIDTH: usize = 30;

/// Seed for the unknown and padding vectors.
pub const DEFAULT_RESERVED_SEED: u64 = 23455;

/// Header line handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorHeader {
    /// Every line is a vector line.
    None,

    /// A first line of exactly two integers is a `{COUNT} {WIDTH}` header;
    /// it is skipped, and `WIDTH` must match the configured width.
    ///
    /// With a configured width of 1, such a line is also a valid vector
    /// line, so it is read as one; use [`VectorHeader::Present`] instead.
    #[default]
    Detect,

    /// The first line is always a `{COUNT} {WIDTH}` header.
    Present,
}

/// Options for the word vector loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingOptions {
    /// Vector width.
    pub width: usize,

    /// Seed for the unknown and padding rows.
    pub reserved_seed: u64,

    /// Seed for the uniform init of rows the file does not cover;
    /// `None` to seed from the OS.
    pub init_seed: Option<u64>,

    /// Uniform init range; rows start in `[-init_range, init_range)`.
    pub init_range: f32,

    /// Header line handling.
    pub header: VectorHeader,

    /// Stop reading after `vocab_size` vector lines, instead of failing.
    pub truncate_to_vocab: bool,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_EMBEDDING_WIDTH,
            reserved_seed: DEFAULT_RESERVED_SEED,
            init_seed: None,
            init_range: 1.0,
            header: VectorHeader::Detect,
            truncate_to_vocab: false,
        }
    }
}

impl EmbeddingOptions {
    /// Set the width.
    pub fn with_width(
        mut self,
        width: usize,
    ) -> Self {
        self.width = width;
        self
    }

    /// Set the reserved row seed.
    pub fn with_reserved_seed(
        mut self,
        reserved_seed: u64,
    ) -> Self {
        self.reserved_seed = reserved_seed;
        self
    }

    /// Set the init seed.
    pub fn with_init_seed(
        mut self,
        init_seed: Option<u64>,
    ) -> Self {
        self.init_seed = init_seed;
        self
    }

    /// Set the init range.
    pub fn with_init_range(
        mut self,
        init_range: f32,
    ) -> Self {
        self.init_range = init_range;
        self
    }

    /// Set the header handling.
    pub fn with_header(
        mut self,
        header: VectorHeader,
    ) -> Self {
        self.header = header;
        self
    }

    /// Set whether to stop after `vocab_size` vector lines.
    pub fn with_truncate_to_vocab(
        mut self,
        truncate_to_vocab: bool,
    ) -> Self {
        self.truncate_to_vocab = truncate_to_vocab;
        self
    }

    /// Check the options.
    pub fn validate(&self) -> SeqfeedResult<()> {
        if self.width == 0 {
            return Err(SeqfeedError::InvalidOptions("width must be > 0".into()));
        }
        if !self.init_range.is_finite() || self.init_range < 0.0 {
            return Err(SeqfeedError::InvalidOptions(format!(
                "init_range must be finite and >= 0, got {}",
                self.init_range
            )));
        }
        Ok(())
    }

    /// Draw the `(unknown, padding)` vectors.
    ///
    /// These depend only on `reserved_seed` and `width`.
    pub fn reserved_vectors(&self) -> (Vec<f32>, Vec<f32>) {
        let mut rng = StdRng::seed_from_u64(self.reserved_seed);
        let unknown: Vec<f32> = (0..self.width)
            .map(|_| rng.sample::<f32, _>(StandardNormal))
            .collect();
        let padding: Vec<f32> = (0..self.width)
            .map(|_| rng.sample::<f32, _>(StandardNormal))
            .collect();
        (unknown, padding)
    }
}

/// Load an embedding matrix from a word vector file.
///
/// ## Arguments
/// * `path` - the vector file.
/// * `vocab_size` - the number of vocabulary rows.
/// * `options` - the loader options.
///
/// ## Returns
/// A `(vocab_size + 2) x width` matrix.
pub fn load_word2vec_embedding_path<P: AsRef<Path>>(
    path: P,
    vocab_size: usize,
    options: &EmbeddingOptions,
) -> SeqfeedResult<EmbeddingMatrix> {
    let path = path.as_ref();
    log::info!(
        "loading word embedding {}; this may take a few minutes...",
        path.display()
    );
    let reader = BufReader::new(File::open(path)?);
    read_word2vec_embedding(reader, vocab_size, options)
}

/// Read an embedding matrix from a word vector line reader.
///
/// See [`load_word2vec_embedding_path`].
pub fn read_word2vec_embedding<R: BufRead>(
    reader: R,
    vocab_size: usize,
    options: &EmbeddingOptions,
) -> SeqfeedResult<EmbeddingMatrix> {
    read_embedding_lines(reader, vocab_size, options, |_, _| Ok(()))
}

/// Load an embedding matrix for a vocabulary, checking row alignment.
///
/// Like [`load_word2vec_embedding_path`] with `vocab_size = table.len()`;
/// the token on vector line `i` must be `table.token(i)`, or the load fails
/// with [`SeqfeedError::EmbeddingMisalignment`].
pub fn load_aligned_embedding_path<T: TokenType, P: AsRef<Path>>(
    path: P,
    table: &VocabTable<T>,
    options: &EmbeddingOptions,
) -> SeqfeedResult<EmbeddingMatrix> {
    let path = path.as_ref();
    log::info!(
        "loading aligned word embedding {}; this may take a few minutes...",
        path.display()
    );
    let reader = BufReader::new(File::open(path)?);
    read_aligned_embedding(reader, table, options)
}

/// Read an embedding matrix for a vocabulary, checking row alignment.
///
/// See [`load_aligned_embedding_path`].
pub fn read_aligned_embedding<T: TokenType, R: BufRead>(
    reader: R,
    table: &VocabTable<T>,
    options: &EmbeddingOptions,
) -> SeqfeedResult<EmbeddingMatrix> {
    let tokens = table.tokens();
    read_embedding_lines(reader, table.len(), options, |row, token| {
        if tokens[row] == token {
            Ok(())
        } else {
            Err(SeqfeedError::EmbeddingMisalignment {
                row,
                expected: tokens[row].clone(),
                found: token.to_string(),
            })
        }
    })
}

fn parse_header(
    token: &str,
    values: &[&str],
) -> Option<usize> {
    match values {
        [width] if token.parse::<usize>().is_ok() => width.parse().ok(),
        _ => None,
    }
}

fn read_embedding_lines<R, F>(
    reader: R,
    vocab_size: usize,
    options: &EmbeddingOptions,
    mut check_token: F,
) -> SeqfeedResult<EmbeddingMatrix>
where
    R: BufRead,
    F: FnMut(usize, &str) -> SeqfeedResult<()>,
{
    options.validate()?;
    let width = options.width;
    let rows = vocab_size + RESERVED_ROWS;

    let mut init_rng = match options.init_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let range = options.init_range;
    let data: Vec<f32> = if range > 0.0 {
        (0..rows * width)
            .map(|_| init_rng.random_range(-range..range))
            .collect()
    } else {
        vec![0.0; rows * width]
    };
    let mut matrix = EmbeddingMatrix::from_vec(vocab_size, width, data)?;

    let mut row = 0;
    let mut first = true;
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(token) = parts.next() else {
            continue;
        };
        let values: Vec<&str> = parts.collect();

        if first {
            first = false;
            let header = match options.header {
                VectorHeader::None => None,
                VectorHeader::Detect if width == 1 => None,
                VectorHeader::Detect => parse_header(token, &values),
                VectorHeader::Present => Some(parse_header(token, &values).ok_or_else(|| {
                    SeqfeedError::Parse(format!("expected a vector header, found {line:?}"))
                })?),
            };
            if let Some(header_width) = header {
                if header_width != width {
                    return Err(SeqfeedError::EmbeddingWidth {
                        line: 0,
                        expected: width,
                        found: header_width,
                    });
                }
                log::debug!("skipping vector header: {token} x {header_width}");
                continue;
            }
        }

        if row >= vocab_size {
            if options.truncate_to_vocab {
                break;
            }
            return Err(SeqfeedError::EmbeddingOverflow { line: row, vocab_size });
        }
        if values.len() != width {
            return Err(SeqfeedError::EmbeddingWidth {
                line: row,
                expected: width,
                found: values.len(),
            });
        }
        check_token(row, token)?;

        for (slot, value) in matrix.row_mut(row).iter_mut().zip(&values) {
            *slot = value
                .parse()
                .map_err(|e| SeqfeedError::Parse(format!("embedding line {row}: {e}")))?;
        }
        row += 1;
    }

    if row < vocab_size {
        log::warn!("loaded {row} of {vocab_size} embedding rows; the rest keep their random init");
    }

    let (unknown, padding) = options.reserved_vectors();
    matrix.row_mut(vocab_size).copy_from_slice(&unknown);
    matrix.row_mut(vocab_size + 1).copy_from_slice(&padding);

    log::info!("loaded word embedding: {rows} x {width}");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn options() -> EmbeddingOptions {
        EmbeddingOptions::default()
            .with_width(3)
            .with_init_seed(Some(1))
    }

    #[test]
    fn test_defaults() {
        let options = EmbeddingOptions::default();
        assert_eq!(options.width, 30);
        assert_eq!(options.reserved_seed, 23455);
        assert_eq!(options.header, VectorHeader::Detect);
        options.validate().unwrap();

        assert!(options.clone().with_width(0).validate().is_err());
        assert!(options.with_init_range(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_read_vectors() {
        let data = "the 0.1 0.2 0.3\n\nof -1 0 1e-2\n";
        let m = read_word2vec_embedding(Cursor::new(data), 3, &options()).unwrap();

        assert_eq!(m.shape(), (5, 3));
        assert_eq!(m.row(0).unwrap(), &[0.1, 0.2, 0.3]);
        assert_eq!(m.row(1).unwrap(), &[-1.0, 0.0, 0.01]);

        // Row 2 is not in the file; it keeps its uniform init.
        assert!(m.row(2).unwrap().iter().all(|v| (-1.0..1.0).contains(v)));

        let (unknown, padding) = options().reserved_vectors();
        assert_eq!(m.unknown_row(), unknown.as_slice());
        assert_eq!(m.padding_row(), padding.as_slice());
        assert_ne!(unknown, padding);
    }

    #[test]
    fn test_reserved_rows_are_reproducible() {
        let data = "a 1 2 3\n";
        let a = read_word2vec_embedding(Cursor::new(data), 1, &options().with_init_seed(None))
            .unwrap();
        let b = read_word2vec_embedding(Cursor::new(data), 1, &options().with_init_seed(Some(5)))
            .unwrap();
        assert_eq!(a.unknown_row(), b.unknown_row());
        assert_eq!(a.padding_row(), b.padding_row());
        assert_eq!(a.row(0), b.row(0));

        let c = read_word2vec_embedding(
            Cursor::new(data),
            1,
            &options().with_reserved_seed(DEFAULT_RESERVED_SEED + 1),
        )
        .unwrap();
        assert_ne!(a.unknown_row(), c.unknown_row());
    }

    #[test]
    fn test_header() {
        let data = "2 3\na 1 2 3\nb 4 5 6\n";
        let m = read_word2vec_embedding(Cursor::new(data), 2, &options()).unwrap();
        assert_eq!(m.row(1).unwrap(), &[4.0, 5.0, 6.0]);

        let err = read_word2vec_embedding(Cursor::new("2 4\n"), 2, &options()).unwrap_err();
        assert!(matches!(err, SeqfeedError::EmbeddingWidth { line: 0, found: 4, .. }));

        // Without detection, the header is a (short) vector line.
        let err = read_word2vec_embedding(
            Cursor::new(data),
            2,
            &options().with_header(VectorHeader::None),
        )
        .unwrap_err();
        assert!(matches!(err, SeqfeedError::EmbeddingWidth { line: 0, found: 1, .. }));
    }

    #[test]
    fn test_width_one_numeric_tokens() {
        let narrow = options().with_width(1);

        let m = read_word2vec_embedding(Cursor::new("2017 1\n2018 2\n"), 2, &narrow).unwrap();
        assert_eq!(m.row(0).unwrap(), &[1.0]);
        assert_eq!(m.row(1).unwrap(), &[2.0]);

        let present = narrow.clone().with_header(VectorHeader::Present);
        let m = read_word2vec_embedding(Cursor::new("2 1\n2017 1\n2018 2\n"), 2, &present)
            .unwrap();
        assert_eq!(m.row(0).unwrap(), &[1.0]);
        assert_eq!(m.row(1).unwrap(), &[2.0]);

        let err = read_word2vec_embedding(Cursor::new("a 1\n"), 1, &present).unwrap_err();
        assert!(matches!(err, SeqfeedError::Parse(_)));
    }

    #[test]
    fn test_errors() {
        let err = read_word2vec_embedding(Cursor::new("a 1 2\n"), 2, &options()).unwrap_err();
        assert!(matches!(err, SeqfeedError::EmbeddingWidth { line: 0, expected: 3, found: 2 }));

        let err = read_word2vec_embedding(Cursor::new("a 1 x 3\n"), 2, &options()).unwrap_err();
        assert!(matches!(err, SeqfeedError::Parse(_)));

        let data = "a 1 2 3\nb 1 2 3\nc 1 2 3\n";
        let err = read_word2vec_embedding(Cursor::new(data), 2, &options()).unwrap_err();
        assert!(matches!(err, SeqfeedError::EmbeddingOverflow { line: 2, vocab_size: 2 }));

        let m = read_word2vec_embedding(
            Cursor::new(data),
            2,
            &options().with_truncate_to_vocab(true),
        )
        .unwrap();
        assert_eq!(m.rows(), 4);
    }

    #[test]
    fn test_aligned() {
        let table = VocabTable::<u32>::from_tokens(["a", "b"], None).unwrap();

        let m = read_aligned_embedding(Cursor::new("a 1 2 3\nb 4 5 6\n"), &table, &options())
            .unwrap();
        assert_eq!(m.vocab_size(), 2);
        assert_eq!(m.gather(&[table.lookup("b")]).unwrap()[0], &[4.0, 5.0, 6.0]);
        assert_eq!(m.gather(&[table.lookup("zzz")]).unwrap()[0], m.unknown_row());

        let err = read_aligned_embedding(Cursor::new("a 1 2 3\nc 4 5 6\n"), &table, &options())
            .unwrap_err();
        match err {
            SeqfeedError::EmbeddingMisalignment {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, "b");
                assert_eq!(found, "c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_path() -> SeqfeedResult<()> {
        let dir = tempdir::TempDir::new("embedding_test")?;
        let path = dir.path().join("wiki.vec");
        std::fs::write(&path, "1 3\nhello 0.5 0.5 0.5\n")?;

        let m = load_word2vec_embedding_path(&path, 1, &options())?;
        assert_eq!(m.row(0).unwrap(), &[0.5, 0.5, 0.5]);
        Ok(())
    }
}
