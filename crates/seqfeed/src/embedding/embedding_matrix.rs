//! # Embedding Matrix

use crate::{
    errors::{SeqfeedError, SeqfeedResult},
    types::{TokenType, token_to_index},
};

/// The number of reserved rows after the vocabulary rows.
pub const RESERVED_ROWS: usize = 2;

/// A dense row-major `f32` embedding table.
///
/// The table has `vocab_size + 2` rows: one per vocabulary id,
/// then the unknown row, then the padding row. Row `i` is the vector
/// for vocabulary id `i`; nothing checks that the two agree unless the
/// table was built by [`crate::embedding::load_aligned_embedding_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    rows: usize,
    width: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Build a matrix from row-major data.
    ///
    /// ## Arguments
    /// * `vocab_size` - the number of vocabulary rows.
    /// * `width` - the vector width.
    /// * `data` - `(vocab_size + 2) * width` values.
    pub fn from_vec(
        vocab_size: usize,
        width: usize,
        data: Vec<f32>,
    ) -> SeqfeedResult<Self> {
        let rows = vocab_size + RESERVED_ROWS;
        if data.len() != rows * width {
            return Err(SeqfeedError::InvalidOptions(format!(
                "embedding data has {} values, expected {rows} x {width}",
                data.len()
            )));
        }
        Ok(Self { rows, width, data })
    }

    /// The total number of rows, including the reserved rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of vocabulary rows.
    pub fn vocab_size(&self) -> usize {
        self.rows - RESERVED_ROWS
    }

    /// The vector width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The `(rows, width)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.width)
    }

    /// Row `idx`, if in range.
    pub fn row(
        &self,
        idx: usize,
    ) -> Option<&[f32]> {
        (idx < self.rows).then(|| &self.data[idx * self.width..(idx + 1) * self.width])
    }

    /// The unknown-token vector.
    pub fn unknown_row(&self) -> &[f32] {
        let idx = self.rows - 2;
        &self.data[idx * self.width..(idx + 1) * self.width]
    }

    /// The padding vector.
    pub fn padding_row(&self) -> &[f32] {
        let idx = self.rows - 1;
        &self.data[idx * self.width..]
    }

    /// The row-major data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Look up the vectors of a sequence of token ids.
    ///
    /// Fails with [`SeqfeedError::TokenOutOfRange`] on any id past the last row.
    pub fn gather<T: TokenType>(
        &self,
        ids: &[T],
    ) -> SeqfeedResult<Vec<&[f32]>> {
        ids.iter()
            .map(|&id| {
                self.row(token_to_index(id)?)
                    .ok_or(SeqfeedError::TokenOutOfRange)
            })
            .collect()
    }

    pub(crate) fn row_mut(
        &mut self,
        idx: usize,
    ) -> &mut [f32] {
        &mut self.data[idx * self.width..(idx + 1) * self.width]
    }
}
