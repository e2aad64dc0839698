//! # Parallel Corpus
//!
//! A parallel corpus is two flat text files, one sentence per line,
//! aligned by line number.
pub mod text_lines;
pub mod tokenize;

#[doc(inline)]
pub use text_lines::{LinePair, TextLinePairs, open_text_line_pairs};
#[doc(inline)]
pub use tokenize::{tokenize_line, truncate_tokens};
