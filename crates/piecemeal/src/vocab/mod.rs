//! # Vocabulary
//!
//! This module provides the piece vocabulary and related io mechanisms.
//!
//! ## Piece Vocabulary
//!
//! The primary vocabulary is [`PieceVocab`], an immutable table of
//! [`VocabEntry`]s in id order; built once, and shared (via `Arc`)
//! by every encoder and decoder.
//!
//! ## Byte Pieces
//!
//! Byte fallback pieces are spelled `<0xHH>`; see [`byte_pieces`].
#[cfg(feature = "std")]
pub mod io;

pub mod byte_pieces;
pub mod model_info;
pub mod piece_kind;
pub mod piece_vocab;
pub mod vocab_entry;

#[doc(inline)]
pub use model_info::{ModelInfo, ModelKind};
#[doc(inline)]
pub use piece_kind::PieceKind;
#[doc(inline)]
pub use piece_vocab::PieceVocab;
#[doc(inline)]
pub use vocab_entry::VocabEntry;
