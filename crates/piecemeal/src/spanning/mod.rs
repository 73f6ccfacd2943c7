//! # Special Symbol Spanning
//!
//! User-defined symbols (`<mask>`, `<td>`, runs of `▁`, ...) are matched
//! whole, before segmentation, and are never split or merged with their
//! neighbors.
//!
//! [`SymbolMatcher`] finds them, and splits normalized text into
//! [`SpanRef::Special`] matches and the [`SpanRef::Normal`] stretches
//! between them.

mod symbol_matcher;

#[doc(inline)]
pub use symbol_matcher::*;
