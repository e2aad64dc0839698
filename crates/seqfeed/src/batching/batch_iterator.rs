//! # Bucketed Batch Iterator
//!
//! The stages, in order:
//! * zip the source and target lines ([`TextLinePairs`]),
//! * shuffle ([`ShuffleBuffer`]),
//! * tokenize, drop pairs with an empty side, truncate, and look up ids
//!   ([`ExampleEncoder`], run by [`ChunkedMap`]),
//! * group by length bucket into windows of `batch_size` ([`GroupByWindow`]),
//! * pad each window into a [`BatchedInput`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{
    batching::{
        BatchIteratorOptions,
        BatchedInput,
        ChunkedMap,
        EncodedExample,
        GroupByWindow,
        ShuffleBuffer,
        bucket_id,
    },
    corpus::{LinePair, TextLinePairs, tokenize_line, truncate_tokens},
    errors::{SeqfeedError, SeqfeedResult},
    types::TokenType,
    vocab::VocabTables,
};

/// Turns a [`LinePair`] into an [`EncodedExample`].
#[derive(Debug, Clone)]
pub struct ExampleEncoder<T: TokenType> {
    tables: VocabTables<T>,
    src_max_len: Option<usize>,
    tgt_max_len: Option<usize>,
}

impl<T: TokenType> ExampleEncoder<T> {
    /// Create an encoder.
    pub fn new(
        tables: VocabTables<T>,
        src_max_len: Option<usize>,
        tgt_max_len: Option<usize>,
    ) -> Self {
        Self {
            tables,
            src_max_len,
            tgt_max_len,
        }
    }

    /// Encode a line pair.
    ///
    /// Returns `None` if either side has no tokens.
    pub fn encode(
        &self,
        pair: &LinePair,
    ) -> Option<EncodedExample<T>> {
        let mut source = tokenize_line(&pair.source);
        let mut target = tokenize_line(&pair.target);
        if source.is_empty() || target.is_empty() {
            return None;
        }
        truncate_tokens(&mut source, self.src_max_len);
        truncate_tokens(&mut target, self.tgt_max_len);

        Some(EncodedExample {
            source: self.tables.source.lookup_tokens(&source),
            target: self.tables.target.lookup_tokens(&target),
        })
    }
}

/// An iterator of padded, length-bucketed batches.
///
/// Each call to [`BatchedDataset::iter`] builds a fresh one.
pub struct BatchIterator<T: TokenType> {
    inner: Box<dyn Iterator<Item = SeqfeedResult<BatchedInput<T>>> + Send>,
}

impl<T: TokenType> BatchIterator<T> {
    /// Build the pipeline over a pair of line readers.
    ///
    /// ## Arguments
    /// * `source` - source sentences, one per line.
    /// * `target` - target sentences, aligned with `source`.
    /// * `tables` - the vocabulary tables.
    /// * `options` - the pipeline options.
    pub fn from_readers<A, B>(
        source: A,
        target: B,
        tables: VocabTables<T>,
        options: &BatchIteratorOptions,
    ) -> SeqfeedResult<Self>
    where
        A: BufRead + Send + 'static,
        B: BufRead + Send + 'static,
    {
        options.validate()?;

        let (src_pad, tgt_pad) = match options.padding_id {
            Some(id) => {
                let id = T::from_u64(id).ok_or(SeqfeedError::TokenOutOfRange)?;
                (id, id)
            }
            None => (tables.source.padding_id(), tables.target.padding_id()),
        };

        let buffer_size = options.effective_buffer_size();
        let width = options.bucket_width();
        let num_buckets = options.num_buckets;
        log::debug!(
            "batch iterator: batch_size={}, buffer_size={buffer_size}, bucket_width={width}, num_buckets={num_buckets}",
            options.batch_size
        );

        let encoder = ExampleEncoder::new(tables, options.src_max_len, options.tgt_max_len);

        let lines = TextLinePairs::new(source, target);
        let shuffled = ShuffleBuffer::new(lines, buffer_size, options.random_seed);
        let examples = ChunkedMap::new(
            shuffled,
            move |pair: LinePair| encoder.encode(&pair),
            buffer_size,
            options.num_threads,
        )?;
        let windows = GroupByWindow::new(
            examples,
            move |ex: &EncodedExample<T>| {
                bucket_id(ex.source_len(), ex.target_len(), width, num_buckets)
            },
            options.batch_size,
        );
        let batches = windows.map(move |window| {
            window.map(|(bucket, examples)| {
                BatchedInput::from_examples(bucket, &examples, src_pad, tgt_pad)
            })
        });

        Ok(Self {
            inner: Box::new(batches),
        })
    }

    /// Build the pipeline over a pair of corpus files.
    pub fn from_paths<P, Q>(
        src_path: P,
        tgt_path: Q,
        tables: VocabTables<T>,
        options: &BatchIteratorOptions,
    ) -> SeqfeedResult<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let source = BufReader::new(File::open(src_path)?);
        let target = BufReader::new(File::open(tgt_path)?);
        Self::from_readers(source, target, tables, options)
    }
}

impl<T: TokenType> Iterator for BatchIterator<T> {
    type Item = SeqfeedResult<BatchedInput<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A re-iterable batched view of a parallel corpus.
#[derive(Debug, Clone)]
pub struct BatchedDataset<T: TokenType> {
    src_path: PathBuf,
    tgt_path: PathBuf,
    tables: VocabTables<T>,
    options: BatchIteratorOptions,
}

impl<T: TokenType> BatchedDataset<T> {
    /// Create a dataset.
    ///
    /// The options are checked here; the files are not opened until [`Self::iter`].
    pub fn new<P, Q>(
        src_path: P,
        tgt_path: Q,
        tables: VocabTables<T>,
        options: BatchIteratorOptions,
    ) -> SeqfeedResult<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        options.validate()?;
        Ok(Self {
            src_path: src_path.as_ref().to_path_buf(),
            tgt_path: tgt_path.as_ref().to_path_buf(),
            tables,
            options,
        })
    }

    /// The vocabulary tables.
    pub fn tables(&self) -> &VocabTables<T> {
        &self.tables
    }

    /// The options.
    pub fn options(&self) -> &BatchIteratorOptions {
        &self.options
    }

    /// Start a new pass over the corpus.
    ///
    /// With a `random_seed`, every pass yields the same batches.
    pub fn iter(&self) -> SeqfeedResult<BatchIterator<T>> {
        BatchIterator::from_paths(
            &self.src_path,
            &self.tgt_path,
            self.tables.clone(),
            &self.options,
        )
    }
}

/// Build a [`BatchIterator`] over a pair of corpus files.
///
/// ## Arguments
/// * `tables` - the vocabulary tables.
/// * `src_path` - the source corpus.
/// * `tgt_path` - the target corpus.
/// * `options` - the pipeline options.
pub fn get_iterator<T, P, Q>(
    tables: &VocabTables<T>,
    src_path: P,
    tgt_path: Q,
    options: &BatchIteratorOptions,
) -> SeqfeedResult<BatchIterator<T>>
where
    T: TokenType,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    BatchIterator::from_paths(src_path, tgt_path, tables.clone(), options)
}
