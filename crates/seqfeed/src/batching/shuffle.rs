//! # Shuffle Buffer

use rand::{Rng, SeedableRng, rngs::StdRng};

/// A bounded-buffer shuffling iterator adapter.
///
/// The buffer is filled to `capacity`; each output is a uniformly chosen
/// buffered element, whose slot is refilled from the input.
/// A `capacity` of at least the input length gives a full uniform shuffle;
/// a `capacity` of 1 preserves the input order.
pub struct ShuffleBuffer<I: Iterator> {
    inner: I,
    buffer: Vec<I::Item>,
    capacity: usize,
    rng: StdRng,
    exhausted: bool,
}

impl<I: Iterator> ShuffleBuffer<I> {
    /// Wrap an iterator.
    ///
    /// ## Arguments
    /// * `inner` - the input.
    /// * `capacity` - the buffer size; clamped to at least 1.
    /// * `seed` - the shuffle seed; `None` to seed from the OS.
    pub fn new(
        inner: I,
        capacity: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let capacity = capacity.max(1);
        Self {
            inner,
            buffer: Vec::new(),
            capacity,
            rng,
            exhausted: false,
        }
    }

    fn fill(&mut self) {
        while !self.exhausted && self.buffer.len() < self.capacity {
            match self.inner.next() {
                Some(item) => self.buffer.push(item),
                None => self.exhausted = true,
            }
        }
    }
}

impl<I: Iterator> Iterator for ShuffleBuffer<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill();
        if self.buffer.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.buffer.len());
        Some(self.buffer.swap_remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_permutation() {
        let mut out: Vec<u32> = ShuffleBuffer::new(0..500, 64, Some(3)).collect();
        assert_ne!(out, (0..500).collect::<Vec<_>>());
        out.sort();
        assert_eq!(out, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a: Vec<u32> = ShuffleBuffer::new(0..100, 10, Some(42)).collect();
        let b: Vec<u32> = ShuffleBuffer::new(0..100, 10, Some(42)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_capacity_one_keeps_order() {
        let out: Vec<u32> = ShuffleBuffer::new(0..20, 1, None).collect();
        assert_eq!(out, (0..20).collect::<Vec<_>>());

        let out: Vec<u32> = ShuffleBuffer::new(0..20, 0, None).collect();
        assert_eq!(out, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_bounded_displacement() {
        // An element can only be emitted once it has entered the buffer.
        let capacity = 8;
        let out: Vec<usize> = ShuffleBuffer::new(0..200, capacity, Some(9)).collect();
        for (pos, &value) in out.iter().enumerate() {
            assert!(value < pos + capacity, "{value} emitted at {pos}");
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(ShuffleBuffer::new(0..0u32, 4, Some(1)).count(), 0);
    }
}
