//! # Chunked Parallel Map
//!
//! With the `rayon` feature and more than one thread, the input is pulled
//! in chunks and each chunk is mapped on a dedicated [`rayon::ThreadPool`].
//! Output order always matches input order.

use std::collections::VecDeque;

use crate::errors::SeqfeedResult;

/// A filter-map stage over fallible input.
///
/// `Ok` elements go through `f`, and are dropped when it returns `None`;
/// errors pass through in order.
pub struct ChunkedMap<I, F, V, U>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: Fn(V) -> Option<U> + Send + Sync,
    V: Send,
    U: Send,
{
    inner: I,
    f: F,
    pending: VecDeque<SeqfeedResult<U>>,
    exhausted: bool,

    #[cfg(feature = "rayon")]
    chunk_size: usize,

    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl<I, F, V, U> ChunkedMap<I, F, V, U>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: Fn(V) -> Option<U> + Send + Sync,
    V: Send,
    U: Send,
{
    /// Wrap an iterator.
    ///
    /// ## Arguments
    /// * `inner` - the input.
    /// * `f` - the filter-map function.
    /// * `chunk_size` - elements per parallel chunk; clamped to at least 1.
    /// * `num_threads` - map threads; `1` maps inline.
    pub fn new(
        inner: I,
        f: F,
        chunk_size: usize,
        num_threads: usize,
    ) -> SeqfeedResult<Self> {
        #[cfg(feature = "rayon")]
        let pool = if num_threads > 1 {
            log::debug!("map stage: {num_threads} threads, chunk size {chunk_size}");
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| crate::errors::SeqfeedError::ThreadPool(e.to_string()))?,
            )
        } else {
            None
        };

        if cfg!(not(feature = "rayon")) && num_threads > 1 {
            log::debug!(
                "map stage: rayon disabled, ignoring num_threads={num_threads} (chunk size {chunk_size})"
            );
        }

        Ok(Self {
            inner,
            f,
            pending: VecDeque::new(),
            exhausted: false,
            #[cfg(feature = "rayon")]
            chunk_size: chunk_size.max(1),
            #[cfg(feature = "rayon")]
            pool,
        })
    }

    fn next_inline(&mut self) -> Option<SeqfeedResult<U>> {
        while !self.exhausted {
            match self.inner.next() {
                Some(Ok(value)) => {
                    if let Some(mapped) = (self.f)(value) {
                        return Some(Ok(mapped));
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => self.exhausted = true,
            }
        }
        None
    }

    #[cfg(feature = "rayon")]
    fn fill_parallel(
        &mut self,
        pool: &rayon::ThreadPool,
    ) {
        use rayon::prelude::*;

        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut error = None;
        while chunk.len() < self.chunk_size {
            match self.inner.next() {
                Some(Ok(value)) => chunk.push(value),
                Some(Err(e)) => {
                    error = Some(e);
                    break;
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        let f = &self.f;
        let mapped: Vec<Option<U>> = pool.install(|| chunk.into_par_iter().map(f).collect());
        self.pending.extend(mapped.into_iter().flatten().map(Ok));
        if let Some(e) = error {
            self.pending.push_back(Err(e));
        }
    }
}

impl<I, F, V, U> Iterator for ChunkedMap<I, F, V, U>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: Fn(V) -> Option<U> + Send + Sync,
    V: Send,
    U: Send,
{
    type Item = SeqfeedResult<U>;

    fn next(&mut self) -> Option<Self::Item> {
        #[cfg(feature = "rayon")]
        if let Some(pool) = self.pool.take() {
            while self.pending.is_empty() && !self.exhausted {
                self.fill_parallel(&pool);
            }
            self.pool = Some(pool);
            return self.pending.pop_front();
        }

        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }
        self.next_inline()
    }
}
