//! # Piece Encoder
//!
//! The encoding pipeline:
//! 1. normalize the input (spaces become `▁`);
//! 2. split into special-symbol matches and the normal stretches between them;
//! 3. emit one token per special match;
//! 4. segment normal stretches into pieces;
//! 5. render uncovered text through byte fallback, or the [`UnknownPolicy`].

use core::ops::Range;
use std::sync::Arc;

use crate::{
    encoders::{
        EncoderOptions,
        TokenEncoder,
        UnknownPolicy,
        segmenters::{Segment, Segmenter},
    },
    errors::{PMResult, PiecemealError},
    normalize::Normalizer,
    spanning::{SpanRef, SymbolMatcher},
    support::ranges::offset_range,
    types::{Token, TokenType},
    vocab::PieceVocab,
};

/// A [`TokenEncoder`] composing a [`Normalizer`], a [`SymbolMatcher`],
/// and a [`Segmenter`].
#[derive(Clone)]
pub struct PieceEncoder<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    normalizer: Normalizer,
    matcher: SymbolMatcher<T>,
    segmenter_builder: Arc<dyn Fn() -> Box<dyn Segmenter<T>> + Send + Sync>,
    unknown_policy: UnknownPolicy,
}

impl<T: TokenType> core::fmt::Debug for PieceEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PieceEncoder")
            .field("vocab_size", &self.vocab.len())
            .field("normalizer", &self.normalizer)
            .field("symbols", &self.matcher.len())
            .field("unknown_policy", &self.unknown_policy)
            .finish()
    }
}

impl<T: TokenType> PieceEncoder<T> {
    /// Create a new encoder.
    ///
    /// The normalizer follows the vocabulary's
    /// [`NormalizerSpec`](crate::normalize::NormalizerSpec).
    ///
    /// ## Arguments
    /// * `vocab` - The shared vocabulary.
    /// * `options` - Segmenter, unknown policy, and symbol options.
    ///
    /// ## Errors
    /// [`PiecemealError::InvalidModel`] if the symbol matcher cannot be built.
    pub fn new(
        vocab: Arc<PieceVocab<T>>,
        options: EncoderOptions,
    ) -> PMResult<Self> {
        let matcher = SymbolMatcher::from_vocab(&vocab, options.recognize_control_symbols())?;
        let segmenter_builder = options
            .effective_segmenter(&vocab)
            .segmenter_builder::<T>();
        let normalizer = Normalizer::new(*vocab.normalizer_spec());

        Ok(Self {
            vocab,
            normalizer,
            matcher,
            segmenter_builder,
            unknown_policy: options.unknown_policy(),
        })
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the special symbol matcher.
    pub fn matcher(&self) -> &SymbolMatcher<T> {
        &self.matcher
    }

    /// Probe the special symbol matcher at the start of `text`.
    ///
    /// `text` is taken as already normalized; write `▁` for spaces.
    ///
    /// ## Returns
    /// ``(len, found)``, see [`SymbolMatcher::symbol_match`].
    pub fn special_symbol_probe(
        &self,
        text: &str,
    ) -> (usize, bool) {
        self.matcher.symbol_match(text.as_bytes())
    }

    fn push_token(
        &self,
        id: T,
        tokens: &mut Vec<Token<T>>,
    ) {
        tokens.push(Token::new(id, self.vocab.entry(id).piece.clone()));
    }

    /// Render an uncovered range of the normalized text.
    fn push_uncovered(
        &self,
        text: &[u8],
        range: Range<usize>,
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()> {
        if let Some(table) = self.vocab.byte_table() {
            log::trace!(
                "byte fallback for {} bytes at offset {}",
                range.len(),
                range.start
            );
            for &byte in &text[range] {
                self.push_token(table.get_token(byte), tokens);
            }
            return Ok(());
        }

        let unencodable = PiecemealError::Unencodable {
            offset: range.start,
            len: range.len(),
        };
        match (self.unknown_policy, self.vocab.unknown_id()) {
            (UnknownPolicy::EmitUnknown, Some(unk)) => {
                self.push_token(unk, tokens);
                Ok(())
            }
            _ => Err(unencodable),
        }
    }

    fn encode_span_ref(
        &self,
        segmenter: &mut dyn Segmenter<T>,
        segments: &mut Vec<Segment<T>>,
        text: &[u8],
        span_ref: SpanRef<T>,
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()> {
        match span_ref {
            SpanRef::Special(_, token) => {
                self.push_token(token, tokens);
            }
            SpanRef::Normal(range) => {
                let offset = range.start;
                segments.clear();
                segmenter.segment_append(&self.vocab, &text[range], segments);

                for segment in segments.drain(..) {
                    match segment {
                        Segment::Piece(token) => self.push_token(token, tokens),
                        Segment::Uncovered(r) => {
                            self.push_uncovered(text, offset_range(r, offset), tokens)?
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl<T: TokenType> TokenEncoder<T> for PieceEncoder<T> {
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, tokens))
    )]
    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()> {
        let normalized = self.normalizer.normalize(text);
        let text = normalized.as_ref();

        let mut segmenter = (self.segmenter_builder)();
        let mut segments = Vec::new();
        let mut result = Ok(());

        self.matcher.for_each_split_span(text, &mut |span_ref| {
            match self.encode_span_ref(segmenter.as_mut(), &mut segments, text, span_ref, tokens) {
                Ok(()) => true,
                Err(err) => {
                    result = Err(err);
                    false
                }
            }
        });

        result
    }
}
