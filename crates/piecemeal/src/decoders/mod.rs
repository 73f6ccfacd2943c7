//! # Token Decoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{PMResult, PieceDecoder, PieceVocab, TokenType};
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<PieceVocab<T>>,
//!     ids: &[T],
//! ) -> PMResult<String> {
//!     PieceDecoder::new(vocab).try_decode_to_string(ids)
//! }
//! ```

mod piece_decoder;

#[doc(inline)]
pub use piece_decoder::*;
