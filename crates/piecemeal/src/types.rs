//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max id in a vocabulary is less than `T::max()`.
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

/// An encoded token: the piece id, and the piece's display text.
///
/// The text is the vocabulary piece, not the input bytes it consumed;
/// so the whitespace marker stays `▁`, and byte fallback renders as `<0xHH>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<T: TokenType> {
    /// The vocabulary id.
    pub id: T,

    /// The piece text.
    pub text: String,
}

impl<T: TokenType> Token<T> {
    /// Build a new token.
    pub fn new<S: Into<String>>(
        id: T,
        text: S,
    ) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl<T: TokenType> Display for Token<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        write!(f, "{}:{:?}", self.id, self.text)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type PMHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type PMHashSet<V> = ahash::AHashSet<V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PMHashMap<K, V> {
            PMHashMap::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type PMHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type PMHashSet<V> = std::collections::HashSet<V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> PMHashMap<K, V> {
            PMHashMap::with_capacity(capacity)
        }
    }
}
