//! # Vocabulary Lookup Table

use std::path::Path;

use crate::{
    errors::{SeqfeedError, SeqfeedResult},
    types::{SFHashMap, TokenType, hash_map_with_capacity, token_from_index, token_to_index},
    vocab::io::load_vocab_tokens_path,
};

/// The string rendered for the unknown id by [`VocabTable::decode`].
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// A `{ String -> T }` token lookup table, with reverse lookup.
///
/// The id of a token is its position in the vocabulary.
/// Lookups of tokens not in the table return the unknown id,
/// which defaults to `len()`; the padding id defaults to `unknown_id + 1`.
#[derive(Debug, Clone)]
pub struct VocabTable<T: TokenType> {
    index: SFHashMap<String, T>,
    tokens: Vec<String>,
    unknown_id: T,
    padding_id: T,
}

impl<T: TokenType> VocabTable<T> {
    /// Build a table from tokens in id order.
    ///
    /// ## Arguments
    /// * `tokens` - the tokens; token `i` gets id `i`.
    /// * `unknown_id` - the out-of-vocabulary id; defaults to `tokens.len()`.
    ///   The padding id is set to `unknown_id + 1`.
    ///
    /// ## Returns
    /// The table, or an error on duplicate tokens,
    /// or if the ids (including padding) do not fit in `T`.
    pub fn from_tokens<I, S>(
        tokens: I,
        unknown_id: Option<T>,
    ) -> SeqfeedResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let size = tokens.len();

        let unknown_id = match unknown_id {
            Some(id) => id,
            None => T::from_usize(size).ok_or(SeqfeedError::VocabSizeOverflow { size })?,
        };
        let padding_id = unknown_id
            .checked_add(&T::one())
            .ok_or(SeqfeedError::VocabSizeOverflow { size })?;

        let mut index = hash_map_with_capacity(size);
        for (idx, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), token_from_index(idx)?).is_some() {
                return Err(SeqfeedError::VocabConflict(format!(
                    "duplicate vocab token {token:?} at line {idx}"
                )));
            }
        }

        Ok(Self {
            index,
            tokens,
            unknown_id,
            padding_id,
        })
    }

    /// Load a table from a vocab file.
    ///
    /// See [`crate::vocab::io`] for the file format.
    pub fn load_path<P: AsRef<Path>>(
        path: P,
        unknown_id: Option<T>,
    ) -> SeqfeedResult<Self> {
        let path = path.as_ref();
        let table = Self::from_tokens(load_vocab_tokens_path(path)?, unknown_id)?;
        log::debug!(
            "loaded vocab table {} ({} tokens)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// Override the padding id.
    pub fn with_padding_id(
        mut self,
        padding_id: T,
    ) -> Self {
        self.padding_id = padding_id;
        self
    }

    /// The number of tokens in the table.
    ///
    /// Does not count the unknown and padding ids.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the table has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The out-of-vocabulary fallback id.
    pub fn unknown_id(&self) -> T {
        self.unknown_id
    }

    /// The padding id.
    pub fn padding_id(&self) -> T {
        self.padding_id
    }

    /// The tokens, in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Get the id of a token, if present.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<T> {
        self.index.get(token).copied()
    }

    /// Look up the id of a token, falling back to the unknown id.
    pub fn lookup(
        &self,
        token: &str,
    ) -> T {
        self.get(token).unwrap_or(self.unknown_id)
    }

    /// Look up a sequence of tokens.
    pub fn lookup_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<T> {
        tokens.iter().map(|t| self.lookup(t.as_ref())).collect()
    }

    /// Get the token for an id, if the id is in the table.
    pub fn token(
        &self,
        id: T,
    ) -> Option<&str> {
        token_to_index(id)
            .ok()
            .and_then(|idx| self.tokens.get(idx))
            .map(String::as_str)
    }

    /// Decode a sequence of ids back to tokens.
    ///
    /// Padding ids are skipped; unknown (and any other out-of-table) ids
    /// decode as [`UNKNOWN_TOKEN`].
    pub fn decode(
        &self,
        ids: &[T],
    ) -> Vec<&str> {
        ids.iter()
            .filter(|&&id| id != self.padding_id)
            .map(|&id| self.token(id).unwrap_or(UNKNOWN_TOKEN))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};

    #[test]
    fn test_lookup() {
        type T = u32;
        let table: VocabTable<T> = VocabTable::from_tokens(["the", "cat", "sat"], None).unwrap();
        check_is_send(&table);
        check_is_sync(&table);

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.unknown_id(), 3);
        assert_eq!(table.padding_id(), 4);

        assert_eq!(table.lookup("the"), 0);
        assert_eq!(table.lookup("sat"), 2);
        assert_eq!(table.lookup("dog"), 3);
        assert_eq!(table.get("dog"), None);

        assert_eq!(table.lookup_tokens(&["cat", "dog", "the"]), vec![1, 3, 0]);
    }

    #[test]
    fn test_explicit_ids() {
        let table: VocabTable<u16> = VocabTable::from_tokens(["a", "b"], Some(100))
            .unwrap()
            .with_padding_id(101);
        assert_eq!(table.lookup("zzz"), 100);
        assert_eq!(table.padding_id(), 101);
    }

    #[test]
    fn test_padding_follows_unknown() {
        let table: VocabTable<u32> = VocabTable::from_tokens(["a", "b"], Some(3)).unwrap();
        assert_eq!(table.unknown_id(), 3);
        assert_eq!(table.padding_id(), 4);

        let err = VocabTable::<u8>::from_tokens(["a", "b"], Some(255)).unwrap_err();
        assert!(matches!(err, SeqfeedError::VocabSizeOverflow { size: 2 }));
    }

    #[test]
    fn test_decode() {
        let table: VocabTable<u32> = VocabTable::from_tokens(["the", "cat"], None).unwrap();
        assert_eq!(table.token(1), Some("cat"));
        assert_eq!(table.token(2), None);
        assert_eq!(table.decode(&[1, 2, 0, 3, 3]), vec!["cat", UNKNOWN_TOKEN, "the"]);
    }

    #[test]
    fn test_duplicate_token() {
        let err = VocabTable::<u32>::from_tokens(["a", "b", "a"], None).unwrap_err();
        assert!(matches!(err, SeqfeedError::VocabConflict(_)));
    }

    #[test]
    fn test_overflow() {
        let tokens: Vec<String> = (0..255).map(|i| format!("t{i}")).collect();
        let err = VocabTable::<u8>::from_tokens(tokens, None).unwrap_err();
        assert!(matches!(err, SeqfeedError::VocabSizeOverflow { size: 255 }));

        let tokens: Vec<String> = (0..254).map(|i| format!("t{i}")).collect();
        let table = VocabTable::<u8>::from_tokens(tokens, None).unwrap();
        assert_eq!(table.padding_id(), 255);
    }

    #[test]
    fn test_empty() {
        let table = VocabTable::<u32>::from_tokens(Vec::<String>::new(), None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.lookup("x"), 0);
        assert_eq!(table.padding_id(), 1);
    }
}
