//! # Batch Iterator Options

use serde::{Deserialize, Serialize};

use crate::{
    batching::bucketing::bucket_width,
    errors::{SeqfeedError, SeqfeedResult},
};

/// Default mini-batch size.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Default per-side max sequence length.
pub const DEFAULT_MAX_LEN: usize = 100;

/// Default number of length buckets.
pub const DEFAULT_NUM_BUCKETS: usize = 5;

/// The default shuffle buffer is this many batches deep.
pub const BUFFER_BATCHES: usize = 1000;

/// Options for [`crate::batching::BatchIterator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchIteratorOptions {
    /// Rows per mini-batch.
    pub batch_size: usize,

    /// Shuffle buffer size (and map stage chunk size);
    /// `None` for `batch_size * 1000`.
    pub buffer_size: Option<usize>,

    /// Shuffle seed; `None` to seed from the OS.
    pub random_seed: Option<u64>,

    /// Map stage threads.
    pub num_threads: usize,

    /// Source truncation length; `None` or `0` disables.
    pub src_max_len: Option<usize>,

    /// Target truncation length; `None` or `0` disables.
    pub tgt_max_len: Option<usize>,

    /// Number of length buckets; bucket ids run `0..=num_buckets`.
    pub num_buckets: usize,

    /// Padding id override for both sides; `None` uses each table's padding id.
    ///
    /// Converted to the token type when the iterator is built;
    /// see [`crate::errors::SeqfeedError::TokenOutOfRange`].
    pub padding_id: Option<u64>,
}

impl Default for BatchIteratorOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchIteratorOptions {
    /// Create options with the given batch size and defaults otherwise.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            buffer_size: None,
            random_seed: None,
            num_threads: 1,
            src_max_len: Some(DEFAULT_MAX_LEN),
            tgt_max_len: Some(DEFAULT_MAX_LEN),
            num_buckets: DEFAULT_NUM_BUCKETS,
            padding_id: None,
        }
    }

    /// Set the batch size.
    pub fn with_batch_size(
        mut self,
        batch_size: usize,
    ) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the shuffle buffer size.
    pub fn with_buffer_size(
        mut self,
        buffer_size: Option<usize>,
    ) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the shuffle seed.
    pub fn with_random_seed(
        mut self,
        random_seed: Option<u64>,
    ) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// Set the map stage thread count.
    pub fn with_num_threads(
        mut self,
        num_threads: usize,
    ) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the source truncation length.
    pub fn with_src_max_len(
        mut self,
        src_max_len: Option<usize>,
    ) -> Self {
        self.src_max_len = src_max_len;
        self
    }

    /// Set the target truncation length.
    pub fn with_tgt_max_len(
        mut self,
        tgt_max_len: Option<usize>,
    ) -> Self {
        self.tgt_max_len = tgt_max_len;
        self
    }

    /// Set the number of length buckets.
    pub fn with_num_buckets(
        mut self,
        num_buckets: usize,
    ) -> Self {
        self.num_buckets = num_buckets;
        self
    }

    /// Set the padding id override.
    pub fn with_padding_id(
        mut self,
        padding_id: Option<u64>,
    ) -> Self {
        self.padding_id = padding_id;
        self
    }

    /// The shuffle buffer size in effect.
    pub fn effective_buffer_size(&self) -> usize {
        self.buffer_size
            .unwrap_or_else(|| self.batch_size.saturating_mul(BUFFER_BATCHES))
    }

    /// The bucket width in effect.
    ///
    /// See [`bucket_width`].
    pub fn bucket_width(&self) -> usize {
        bucket_width(self.src_max_len, self.num_buckets)
    }

    /// Check the options.
    pub fn validate(&self) -> SeqfeedResult<()> {
        if self.batch_size == 0 {
            return Err(SeqfeedError::InvalidOptions("batch_size must be > 0".into()));
        }
        if self.num_buckets == 0 {
            return Err(SeqfeedError::InvalidOptions("num_buckets must be > 0".into()));
        }
        if self.num_threads == 0 {
            return Err(SeqfeedError::InvalidOptions("num_threads must be > 0".into()));
        }
        if self.buffer_size == Some(0) {
            return Err(SeqfeedError::InvalidOptions("buffer_size must be > 0".into()));
        }
        Ok(())
    }
}
