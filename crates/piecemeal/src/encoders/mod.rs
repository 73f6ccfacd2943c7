//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{EncoderOptions, PMResult, PieceVocab, Token, TokenEncoder, TokenType};
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<PieceVocab<T>>,
//!     batch: &[&str],
//! ) -> PMResult<Vec<Vec<Token<T>>>> {
//!     let encoder = EncoderOptions::default().with_parallel(true).build(vocab)?;
//!     encoder.try_encode_batch(batch)
//! }
//! ```

mod encoder_options;
mod piece_encoder;
pub mod segmenters;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod token_encoder;

#[doc(inline)]
pub use encoder_options::*;
#[doc(inline)]
pub use piece_encoder::*;
#[doc(inline)]
pub use token_encoder::*;
