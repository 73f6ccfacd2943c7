//! # Special Symbol Matcher

use core::ops::Range;

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};

use crate::{
    errors::{PMResult, PiecemealError},
    support::{ranges::offset_range, utf8::next_char_len},
    types::TokenType,
    vocab::PieceVocab,
};

/// Span Label/Range Reference for [`SymbolMatcher`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef<T: TokenType> {
    /// An ordinary stretch, to be segmented.
    Normal(Range<usize>),

    /// A special symbol match, and its token.
    Special(Range<usize>, T),
}

impl<T: TokenType> From<SpanRef<T>> for Range<usize> {
    fn from(span: SpanRef<T>) -> Self {
        match span {
            SpanRef::Normal(range) => range,
            SpanRef::Special(range, _) => range,
        }
    }
}

/// Longest-prefix matcher over a vocabulary's special symbols.
///
/// Matching is over raw bytes of normalized text; lengths are byte lengths.
#[derive(Debug, Clone)]
pub struct SymbolMatcher<T: TokenType> {
    /// Leftmost-longest automaton; `None` when there are no symbols.
    ac: Option<AhoCorasick>,

    /// Maps automaton pattern index to token.
    symbol_tokens: Vec<T>,
}

impl<T: TokenType> SymbolMatcher<T> {
    /// Build a matcher over the `UserDefined` pieces of a vocabulary.
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary.
    /// * `recognize_control` - also match `Control` pieces in text.
    pub fn from_vocab(
        vocab: &PieceVocab<T>,
        recognize_control: bool,
    ) -> PMResult<Self> {
        let control: &[T] = if recognize_control {
            vocab.control()
        } else {
            &[]
        };

        let symbols = vocab
            .user_defined()
            .iter()
            .chain(control)
            .map(|&id| {
                let entry = vocab.by_id(id)?;
                Ok((entry.piece.as_str(), id))
            })
            .collect::<PMResult<Vec<_>>>()?;

        Self::from_symbols(symbols)
    }

    /// Build a matcher from `(symbol, token)` pairs.
    ///
    /// Empty symbols are ignored.
    pub fn from_symbols<I, S>(symbols: I) -> PMResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let (patterns, symbol_tokens): (Vec<String>, Vec<T>) = symbols
            .into_iter()
            .filter(|(s, _)| !s.as_ref().is_empty())
            .map(|(s, t)| (s.as_ref().to_string(), t))
            .unzip();

        if patterns.is_empty() {
            return Ok(Self {
                ac: None,
                symbol_tokens,
            });
        }

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .start_kind(StartKind::Both)
            .build(&patterns)
            .map_err(|e| {
                PiecemealError::InvalidModel(format!("failed to build symbol matcher: {e}"))
            })?;

        Ok(Self {
            ac: Some(ac),
            symbol_tokens,
        })
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbol_tokens.len()
    }

    /// Are there no symbols?
    pub fn is_empty(&self) -> bool {
        self.symbol_tokens.is_empty()
    }

    /// Match the longest symbol that is a prefix of `text`.
    ///
    /// ## Returns
    /// `Some((len, token))` for a match, `None` otherwise.
    pub fn match_symbol(
        &self,
        text: &[u8],
    ) -> Option<(usize, T)> {
        let ac = self.ac.as_ref()?;
        ac.find(Input::new(text).anchored(Anchored::Yes))
            .map(|m| (m.len(), self.symbol_tokens[m.pattern().as_usize()]))
    }

    /// Find the length of the first symbol in `text`.
    ///
    /// A symbol is either a special symbol, or a single codepoint
    /// (an invalid UTF-8 byte counts as a one-byte codepoint).
    ///
    /// ## Returns
    /// ``(len, found)``; `found` is true iff a special symbol matched.
    pub fn symbol_match(
        &self,
        text: &[u8],
    ) -> (usize, bool) {
        match self.match_symbol(text) {
            Some((len, _)) => (len, true),
            None => (next_char_len(text), false),
        }
    }

    /// [`Self::symbol_match`] at a byte offset.
    pub fn match_at(
        &self,
        text: &[u8],
        offset: usize,
    ) -> (usize, bool) {
        self.symbol_match(&text[offset.min(text.len())..])
    }

    /// Find the first special symbol at or after `from`.
    ///
    /// Equivalent to probing [`Self::match_symbol`] at each codepoint
    /// offset; symbols never begin inside a codepoint.
    pub fn next_special(
        &self,
        text: &[u8],
        from: usize,
    ) -> Option<(Range<usize>, T)> {
        let ac = self.ac.as_ref()?;
        if from >= text.len() {
            return None;
        }
        ac.find(Input::new(text).range(from..))
            .map(|m| (m.range(), self.symbol_tokens[m.pattern().as_usize()]))
    }

    /// Iterate over all split [`SpanRef`]s in the text.
    ///
    /// # Arguments
    /// * `text` - the normalized text to split.
    /// * `f` - the function to apply to each span;
    ///   halts when the function returns `false`.
    ///
    /// # Returns
    /// ``(completed, consumed)`` where:
    /// - `consumed` is the number of bytes covered by spans accepted by `f`;
    /// - `completed` is if all spans were accepted.
    pub fn for_each_split_span<F>(
        &self,
        text: &[u8],
        f: &mut F,
    ) -> (bool, usize)
    where
        F: FnMut(SpanRef<T>) -> bool,
    {
        let mut offset = 0;

        while let Some((range, token)) = self.next_special(text, offset) {
            if offset < range.start {
                if !f(SpanRef::Normal(offset..range.start)) {
                    return (false, offset);
                }
                offset = range.start;
            }

            let end = range.end;
            if !f(SpanRef::Special(range, token)) {
                return (false, offset);
            }
            offset = end;
        }

        if offset < text.len() {
            if !f(SpanRef::Normal(offset..text.len())) {
                return (false, offset);
            }
            offset = text.len();
        }

        (true, offset)
    }

    /// Split text into spans.
    pub fn split_spans(
        &self,
        text: &[u8],
    ) -> Vec<SpanRef<T>> {
        let mut spans = Vec::new();
        self.for_each_split_span(text, &mut |span_ref| {
            spans.push(span_ref);
            true
        });
        spans
    }

    /// Split a sub-range of `text` into spans, with ranges relative to `text`.
    pub fn split_spans_in(
        &self,
        text: &[u8],
        range: Range<usize>,
    ) -> Vec<SpanRef<T>> {
        let offset = range.start;
        self.split_spans(&text[range])
            .into_iter()
            .map(|span_ref| match span_ref {
                SpanRef::Normal(r) => SpanRef::Normal(offset_range(r, offset)),
                SpanRef::Special(r, t) => SpanRef::Special(offset_range(r, offset), t),
            })
            .collect()
    }
}
