//! # Padded Batches

use serde::Serialize;

use crate::types::TokenType;

/// One encoded `(source ids, target ids)` example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedExample<T> {
    /// Source token ids.
    pub source: Vec<T>,

    /// Target token ids.
    pub target: Vec<T>,
}

impl<T> EncodedExample<T> {
    /// Source length.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Target length.
    pub fn target_len(&self) -> usize {
        self.target.len()
    }
}

/// A dense row-major `rows x cols` matrix of padded sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaddedMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: TokenType> PaddedMatrix<T> {
    /// Pad sequences to the longest one.
    ///
    /// ## Arguments
    /// * `rows` - the sequences.
    /// * `pad` - the fill value past the end of each sequence.
    pub fn from_rows<R: AsRef<[T]>>(
        rows: &[R],
        pad: T,
    ) -> Self {
        let cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut data = vec![pad; rows.len() * cols];
        for (row, chunk) in rows.iter().zip(data.chunks_mut(cols.max(1))) {
            let row = row.as_ref();
            chunk[..row.len()].copy_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols,
            data,
        }
    }

    /// The `(rows, cols)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row `i`, including padding.
    ///
    /// ## Panics
    /// If `i >= rows`.
    pub fn row(
        &self,
        i: usize,
    ) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(|i| self.row(i))
    }

    /// The row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// One padded mini-batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchedInput<T> {
    /// The length bucket every row of this batch fell in.
    pub bucket: usize,

    /// Source ids, `[batch_size, max source len]`.
    pub source: PaddedMatrix<T>,

    /// Target ids, `[batch_size, max target len]`.
    pub target_input: PaddedMatrix<T>,

    /// Unpadded source lengths.
    pub source_sequence_length: Vec<usize>,

    /// Unpadded target lengths.
    pub target_sequence_length: Vec<usize>,
}

impl<T: TokenType> BatchedInput<T> {
    /// Pad a window of examples into a batch.
    pub fn from_examples(
        bucket: usize,
        examples: &[EncodedExample<T>],
        src_pad: T,
        tgt_pad: T,
    ) -> Self {
        let sources: Vec<&[T]> = examples.iter().map(|e| e.source.as_slice()).collect();
        let targets: Vec<&[T]> = examples.iter().map(|e| e.target.as_slice()).collect();
        Self {
            bucket,
            source: PaddedMatrix::from_rows(&sources, src_pad),
            target_input: PaddedMatrix::from_rows(&targets, tgt_pad),
            source_sequence_length: examples.iter().map(EncodedExample::source_len).collect(),
            target_sequence_length: examples.iter().map(EncodedExample::target_len).collect(),
        }
    }

    /// The number of rows.
    pub fn batch_size(&self) -> usize {
        self.source_sequence_length.len()
    }

    /// The unpadded source ids of row `i`.
    ///
    /// ## Panics
    /// If `i >= batch_size()`.
    pub fn source_ids(
        &self,
        i: usize,
    ) -> &[T] {
        &self.source.row(i)[..self.source_sequence_length[i]]
    }

    /// The unpadded target ids of row `i`.
    ///
    /// ## Panics
    /// If `i >= batch_size()`.
    pub fn target_ids(
        &self,
        i: usize,
    ) -> &[T] {
        &self.target_input.row(i)[..self.target_sequence_length[i]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_matrix() {
        let m = PaddedMatrix::from_rows(&[vec![1u32, 2, 3], vec![4], vec![]], 9);
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.as_slice(), &[1, 2, 3, 4, 9, 9, 9, 9, 9]);
        assert_eq!(m.row(1), &[4, 9, 9]);
        assert_eq!(m.iter_rows().count(), 3);
    }

    #[test]
    fn test_padded_matrix_empty() {
        let m = PaddedMatrix::<u32>::from_rows::<Vec<u32>>(&[], 0);
        assert_eq!(m.shape(), (0, 0));

        let m = PaddedMatrix::from_rows(&[Vec::<u32>::new(), Vec::new()], 0);
        assert_eq!(m.shape(), (2, 0));
        assert!(m.row(1).is_empty());
    }

    #[test]
    fn test_batched_input() {
        let examples = vec![
            EncodedExample {
                source: vec![1u16, 2],
                target: vec![5],
            },
            EncodedExample {
                source: vec![3],
                target: vec![6, 7, 8],
            },
        ];
        let batch = BatchedInput::from_examples(0, &examples, 10, 11);

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.source.shape(), (2, 2));
        assert_eq!(batch.target_input.shape(), (2, 3));
        assert_eq!(batch.source.as_slice(), &[1, 2, 3, 10]);
        assert_eq!(batch.target_input.as_slice(), &[5, 11, 11, 6, 7, 8]);
        assert_eq!(batch.source_sequence_length, vec![2, 1]);
        assert_eq!(batch.target_sequence_length, vec![1, 3]);
        assert_eq!(batch.source_ids(1), &[3]);
        assert_eq!(batch.target_ids(0), &[5]);
    }

    #[test]
    #[should_panic]
    fn test_row_ids_out_of_range() {
        let examples = vec![EncodedExample {
            source: vec![1u32],
            target: vec![2],
        }];
        let batch = BatchedInput::from_examples(0, &examples, 9, 9);
        batch.source_ids(1);
    }
}
