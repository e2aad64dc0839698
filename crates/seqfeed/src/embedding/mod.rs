//! # Word Embeddings
//!
//! [`EmbeddingMatrix`] is a `(vocab_size + 2) x width` table:
//! the vocabulary rows loaded from a pretrained vector file,
//! then the unknown and padding rows, drawn from a fixed seed.
pub mod embedding_matrix;
pub mod word2vec;

#[doc(inline)]
pub use embedding_matrix::{EmbeddingMatrix, RESERVED_ROWS};
#[doc(inline)]
pub use word2vec::{
    EmbeddingOptions,
    VectorHeader,
    load_aligned_embedding_path,
    load_word2vec_embedding_path,
    read_aligned_embedding,
    read_word2vec_embedding,
};
