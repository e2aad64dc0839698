//! # Vocabulary
//!
//! This module provides the token lookup tables and their io.
//!
//! ## Lookup Table
//!
//! [`VocabTable`] maps ``{ String -> T }``, with a designated unknown id
//! (default `len()`) and padding id (default `unknown_id + 1`).
//!
//! ## Table Pairs
//!
//! [`VocabTables`] holds the source and target tables;
//! see [`create_vocab_tables`].
pub mod io;
pub mod vocab_table;
pub mod vocab_tables;

#[doc(inline)]
pub use io::count_vocab_lines_path;
#[doc(inline)]
pub use vocab_table::{UNKNOWN_TOKEN, VocabTable};
#[doc(inline)]
pub use vocab_tables::{VocabTables, create_vocab_tables};
