//! # Text Normalization
//!
//! Byte-exact rewriting of input text into the vocabulary's internal form.
//!
//! The only contractual rewrite is whitespace escaping; `' '` becomes the
//! [`WHITESPACE_MARKER`]. No Unicode normalization (NFKC, case folding) is
//! applied; vocabularies trained with such rules need the caller to apply them.

mod normalizer;

#[doc(inline)]
pub use normalizer::*;
