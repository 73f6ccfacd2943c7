//! # Vocabulary Entries

use crate::{types::TokenType, vocab::PieceKind};

/// One learned piece: its id, text, score, and kind.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry<T: TokenType> {
    /// The piece id; ids are dense, and equal to the entry position.
    pub id: T,

    /// The piece text.
    pub piece: String,

    /// The piece score; higher is preferred.
    pub score: f32,

    /// The piece kind.
    pub kind: PieceKind,
}

impl<T: TokenType> VocabEntry<T> {
    /// Build a new entry.
    pub fn new<S: Into<String>>(
        id: T,
        piece: S,
        score: f32,
        kind: PieceKind,
    ) -> Self {
        Self {
            id,
            piece: piece.into(),
            score,
            kind,
        }
    }
}
