//! # Length Bucketing
//!
//! Examples are keyed by a length bucket, and grouped per bucket into
//! windows of `window_size`; see [`GroupByWindow`].

use std::collections::BTreeMap;

use crate::errors::SeqfeedResult;

/// Bucket width used when there is no source max length.
pub const DEFAULT_BUCKET_WIDTH: usize = 10;

/// The width of one length bucket.
///
/// `ceil(src_max_len / num_buckets)` when `src_max_len` is set (and non-zero),
/// else [`DEFAULT_BUCKET_WIDTH`].
pub fn bucket_width(
    src_max_len: Option<usize>,
    num_buckets: usize,
) -> usize {
    match src_max_len {
        Some(max_len) if max_len > 0 => max_len.div_ceil(num_buckets.max(1)),
        _ => DEFAULT_BUCKET_WIDTH,
    }
}

/// The bucket id of a `(src_len, tgt_len)` example.
///
/// `min(num_buckets, max(src_len / width, tgt_len / width))`.
pub fn bucket_id(
    src_len: usize,
    tgt_len: usize,
    width: usize,
    num_buckets: usize,
) -> usize {
    let width = width.max(1);
    num_buckets.min((src_len / width).max(tgt_len / width))
}

/// Groups keyed elements into fixed-size windows.
///
/// Each element goes to the window for its key; a window is emitted
/// as `(key, elements)` as soon as it holds `window_size` elements.
/// When the input ends, the remaining partial windows are emitted
/// in ascending key order. Errors pass through immediately.
pub struct GroupByWindow<I, F, V>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: FnMut(&V) -> usize,
{
    inner: I,
    key_fn: F,
    window_size: usize,
    windows: BTreeMap<usize, Vec<V>>,
    exhausted: bool,
}

impl<I, F, V> GroupByWindow<I, F, V>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: FnMut(&V) -> usize,
{
    /// Wrap an iterator.
    ///
    /// ## Arguments
    /// * `inner` - the input.
    /// * `key_fn` - the window key of an element.
    /// * `window_size` - the full window size; clamped to at least 1.
    pub fn new(
        inner: I,
        key_fn: F,
        window_size: usize,
    ) -> Self {
        Self {
            inner,
            key_fn,
            window_size: window_size.max(1),
            windows: BTreeMap::new(),
            exhausted: false,
        }
    }
}

impl<I, F, V> Iterator for GroupByWindow<I, F, V>
where
    I: Iterator<Item = SeqfeedResult<V>>,
    F: FnMut(&V) -> usize,
{
    type Item = SeqfeedResult<(usize, Vec<V>)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            match self.inner.next() {
                Some(Ok(value)) => {
                    let key = (self.key_fn)(&value);
                    let window = self.windows.entry(key).or_default();
                    window.push(value);
                    if window.len() >= self.window_size {
                        let window = self.windows.remove(&key).unwrap_or_default();
                        return Some(Ok((key, window)));
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => self.exhausted = true,
            }
        }

        self.windows.pop_first().map(Ok)
    }
}
