//! # `piecemeal` SentencePiece Encoder
//!
//! This is a SentencePiece-compatible subword encoder.
//!
//! Text is normalized (spaces become the `▁` marker), user-defined symbols are
//! carved out, the remaining stretches are segmented into vocabulary pieces,
//! and anything the vocabulary cannot cover falls back to `<0xHH>` byte pieces.
//!
//! See:
//! * [`vocab`] for the vocabulary table, byte pieces, and vocab io.
//! * [`normalize`] for the whitespace normalizer.
//! * [`spanning`] for special-symbol matching.
//! * [`encoders`] to encode text into tokens.
//! * [`decoders`] to decode tokens into text.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//! * ``std``
//!
//! #### feature: ``std``
//!
//! Enables file based vocabulary io, see [`vocab::io`].
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//!
//! This is done by the ``types::PMHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables a batch parallelism wrapper using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//!
//! ## Encoding
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{
//!     EncoderOptions, PieceVocab, TokenEncoder,
//!     vocab::io::load_text_vocab_path,
//! };
//!
//! fn example() -> piecemeal::PMResult<()> {
//!     type T = u32;
//!     let entries = load_text_vocab_path::<T, _>("tokenizer.vocab")?;
//!     let vocab: Arc<PieceVocab<T>> = PieceVocab::try_from_entries(entries)?.into();
//!
//!     let encoder = EncoderOptions::default().build(vocab)?;
//!     for token in encoder.try_encode("hello world")? {
//!         println!("{} {}", token.id, token.text);
//!     }
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod concurrency;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod normalize;
pub mod spanning;
pub mod support;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::PieceDecoder;
#[doc(inline)]
pub use encoders::{EncoderOptions, PieceEncoder, TokenEncoder, UnknownPolicy};
#[doc(inline)]
pub use errors::{PMResult, PiecemealError};
#[doc(inline)]
pub use types::{Token, TokenType};
#[doc(inline)]
pub use vocab::{PieceKind, PieceVocab, VocabEntry, byte_pieces::hex_token_probe};
