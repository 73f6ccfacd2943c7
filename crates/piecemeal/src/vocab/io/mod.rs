//! # Vocabulary IO
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use piecemeal::{
//!     PieceDecoder,
//!     PieceEncoder,
//!     PieceVocab,
//!     encoders::EncoderOptions,
//!     vocab::{ModelKind, io::load_text_vocab_path},
//! };
//!
//! fn example() -> piecemeal::PMResult<(PieceEncoder<u32>, PieceDecoder<u32>)> {
//!     type T = u32;
//!     let entries = load_text_vocab_path::<T, _>("tokenizer.vocab")?;
//!     let vocab: Arc<PieceVocab<T>> = PieceVocab::try_from_entries(entries)?
//!         .with_model_kind(ModelKind::Unigram)
//!         .into();
//!
//!     let encoder = PieceEncoder::new(vocab.clone(), EncoderOptions::default())?;
//!     let decoder = PieceDecoder::new(vocab);
//!
//!     Ok((encoder, decoder))
//! }
//! ```

mod text_vocab;

#[doc(inline)]
pub use text_vocab::*;
