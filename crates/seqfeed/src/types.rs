//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

use crate::errors::{SeqfeedError, SeqfeedResult};

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// a table of `n` tokens needs `n + 1` (the padding id) to fit in `T`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// Convert a `usize` index to a token, or fail with [`SeqfeedError::TokenOutOfRange`].
pub fn token_from_index<T: TokenType>(index: usize) -> SeqfeedResult<T> {
    T::from_usize(index).ok_or(SeqfeedError::TokenOutOfRange)
}

/// Convert a token to a `usize` index, or fail with [`SeqfeedError::TokenOutOfRange`].
pub fn token_to_index<T: TokenType>(token: T) -> SeqfeedResult<usize> {
    token.to_usize().ok_or(SeqfeedError::TokenOutOfRange)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type SFHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> SFHashMap<K, V> {
            SFHashMap::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type SFHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> SFHashMap<K, V> {
            SFHashMap::with_capacity(capacity)
        }
    }
}

/// Compile-time check that a value is [`Send`].
#[cfg(test)]
pub(crate) fn check_is_send<S: Send>(_: &S) {}

/// Compile-time check that a value is [`Sync`].
#[cfg(test)]
pub(crate) fn check_is_sync<S: Sync>(_: &S) {}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use super::*;

    #[test]
    fn test_common_token_types() {
        struct IsToken<T: TokenType>(PhantomData<T>);

        let _: IsToken<u16>;
        let _: IsToken<u32>;
        let _: IsToken<u64>;
        let _: IsToken<usize>;
    }

    #[test]
    fn test_token_index_conversion() {
        assert_eq!(token_from_index::<u16>(300).unwrap(), 300u16);
        assert!(matches!(
            token_from_index::<u8>(256),
            Err(SeqfeedError::TokenOutOfRange)
        ));
        assert_eq!(token_to_index(7u32).unwrap(), 7);
    }
}
