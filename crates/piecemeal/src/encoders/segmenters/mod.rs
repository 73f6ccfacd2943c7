//! # Segmenters
//!
//! A [`Segmenter`] splits one normal (non-special) span of normalized text
//! into vocabulary pieces.
//!
//! Text no mergeable piece covers is reported as [`Segment::Uncovered`];
//! the encoder decides how to render it (byte fallback, `<unk>`, or error).

mod merge_heap_segmenter;
mod segmenter_selector;
mod viterbi_segmenter;

#[doc(inline)]
pub use merge_heap_segmenter::*;
#[doc(inline)]
pub use segmenter_selector::*;
#[doc(inline)]
pub use viterbi_segmenter::*;

use core::ops::Range;

use crate::{types::TokenType, vocab::PieceVocab};

/// One unit of a segmented span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment<T: TokenType> {
    /// A vocabulary piece.
    Piece(T),

    /// A byte range, relative to the span, with no piece coverage.
    Uncovered(Range<usize>),
}

/// A trait for segmenting normal spans into pieces.
///
/// Segmenters may hold scratch buffers; hence ``&mut self``.
pub trait Segmenter<T: TokenType>: Send {
    /// Segment a span, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `vocab` - The reference vocabulary.
    /// * `span` - The normalized byte span; contains no special symbols.
    /// * `segments` - The target segment buffer to append to.
    fn segment_append(
        &mut self,
        vocab: &PieceVocab<T>,
        span: &[u8],
        segments: &mut Vec<Segment<T>>,
    );

    /// Segment a span.
    fn segment(
        &mut self,
        vocab: &PieceVocab<T>,
        span: &[u8],
    ) -> Vec<Segment<T>> {
        let mut segments = Vec::new();
        self.segment_append(vocab, span, &mut segments);
        segments
    }
}

/// Append an uncovered range, extending a directly preceding uncovered range.
pub(crate) fn push_uncovered<T: TokenType>(
    segments: &mut Vec<Segment<T>>,
    range: Range<usize>,
) {
    if let Some(Segment::Uncovered(prev)) = segments.last_mut()
        && prev.end == range.start
    {
        prev.end = range.end;
        return;
    }
    segments.push(Segment::Uncovered(range));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_uncovered() {
        type T = u32;
        let mut segments: Vec<Segment<T>> = vec![Segment::Piece(3)];

        push_uncovered(&mut segments, 2..4);
        push_uncovered(&mut segments, 4..7);
        segments.push(Segment::Piece(5));
        push_uncovered(&mut segments, 8..9);
        push_uncovered(&mut segments, 10..11);

        assert_eq!(
            segments,
            vec![
                Segment::Piece(3),
                Segment::Uncovered(2..7),
                Segment::Piece(5),
                Segment::Uncovered(8..9),
                Segment::Uncovered(10..11),
            ]
        );
    }
}
