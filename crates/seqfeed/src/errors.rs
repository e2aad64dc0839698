//! # Error Types

/// Errors from seqfeed operations.
#[derive(Debug, thiserror::Error)]
pub enum SeqfeedError {
    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Token value out of range for the target type or table.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Invalid pipeline or loader options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// An embedding vector line has the wrong number of values.
    #[error("embedding line {line}: expected {expected} values, found {found}")]
    EmbeddingWidth {
        /// The 0-based vector line index.
        line: usize,
        /// The configured embedding width.
        expected: usize,
        /// The number of values on the line.
        found: usize,
    },

    /// The vector file has more lines than the embedding matrix has rows.
    #[error("embedding line {line} exceeds vocab size ({vocab_size})")]
    EmbeddingOverflow {
        /// The 0-based vector line index.
        line: usize,
        /// The vocab size the matrix was built for.
        vocab_size: usize,
    },

    /// A vector line's token does not match the vocabulary token for that row.
    #[error("embedding row {row}: expected token {expected:?}, found {found:?}")]
    EmbeddingMisalignment {
        /// The row index.
        row: usize,
        /// The vocabulary token for the row.
        expected: String,
        /// The token found in the vector file.
        found: String,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON config error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Parse error (float, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// The map stage thread pool could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

/// Result type for seqfeed operations.
pub type SeqfeedResult<T> = core::result::Result<T, SeqfeedError>;
