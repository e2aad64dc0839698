//! # Source / Target Table Pair

use std::{path::Path, sync::Arc};

use crate::{errors::SeqfeedResult, types::TokenType, vocab::VocabTable};

/// The source and target lookup tables for a translation corpus.
///
/// When built with a shared vocabulary, both sides hold the same [`Arc`].
#[derive(Debug, Clone)]
pub struct VocabTables<T: TokenType> {
    /// Source-side table.
    pub source: Arc<VocabTable<T>>,

    /// Target-side table.
    pub target: Arc<VocabTable<T>>,
}

impl<T: TokenType> VocabTables<T> {
    /// Pair two tables.
    pub fn new(
        source: Arc<VocabTable<T>>,
        target: Arc<VocabTable<T>>,
    ) -> Self {
        Self { source, target }
    }

    /// Use one table for both sides.
    pub fn shared(table: Arc<VocabTable<T>>) -> Self {
        Self {
            source: table.clone(),
            target: table,
        }
    }

    /// Returns true if source and target are the same table.
    pub fn is_shared(&self) -> bool {
        Arc::ptr_eq(&self.source, &self.target)
    }
}

/// Build the source and target tables from vocab files.
///
/// ## Arguments
/// * `src_vocab_path` - the source vocab file.
/// * `tgt_vocab_path` - the target vocab file; not read when `share_vocab`.
/// * `src_unknown_id` - the source out-of-vocabulary id; `None` for `len()`.
/// * `tgt_unknown_id` - the target out-of-vocabulary id; `None` for `len()`.
/// * `share_vocab` - reuse the source table for the target side.
pub fn create_vocab_tables<T, P, Q>(
    src_vocab_path: P,
    tgt_vocab_path: Q,
    src_unknown_id: Option<T>,
    tgt_unknown_id: Option<T>,
    share_vocab: bool,
) -> SeqfeedResult<VocabTables<T>>
where
    T: TokenType,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = Arc::new(VocabTable::load_path(src_vocab_path, src_unknown_id)?);
    if share_vocab {
        return Ok(VocabTables::shared(source));
    }
    let target = Arc::new(VocabTable::load_path(tgt_vocab_path, tgt_unknown_id)?);
    Ok(VocabTables::new(source, target))
}
