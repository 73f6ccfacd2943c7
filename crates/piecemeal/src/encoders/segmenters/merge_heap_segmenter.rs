//! # Merge-heap [`Segmenter`].
//!
//! Score-ordered pair merging over a linked list of symbols.
//!
//! The span starts as one symbol per codepoint. Repeatedly, the adjacent
//! pair whose concatenation is the highest-scored mergeable piece is merged;
//! ties go to the leftmost pair. Merging stops when no adjacent pair
//! concatenates to a piece.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{
    encoders::segmenters::{Segment, Segmenter, push_uncovered},
    support::utf8::char_spans,
    types::TokenType,
    vocab::PieceVocab,
};

const NONE: u32 = u32::MAX;

struct Symbol<T> {
    start: usize,
    end: usize,
    token: Option<T>,
    prev: u32,
    next: u32,
}

/// Heap entry representing a potential merge.
///
/// Ordered by (score, leftmost) so the highest-score, leftmost pair is
/// popped first. `left_idx`, `right_idx`, and `len` support O(1)
/// stale-entry detection.
struct MergeEntry<T> {
    score: f32,
    start: usize,
    len: usize,
    left_idx: u32,
    right_idx: u32,
    token: T,
}

impl<T> PartialEq for MergeEntry<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for MergeEntry<T> {}

impl<T> Ord for MergeEntry<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(other.start.cmp(&self.start))
    }
}

impl<T> PartialOrd for MergeEntry<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A [`Segmenter`] using a binary max-heap with a doubly-linked list.
///
/// Processes merges in O(n log n) time per span.
pub struct MergeHeapSegmenter<T: TokenType> {
    symbols: Vec<Symbol<T>>,
    heap: BinaryHeap<MergeEntry<T>>,
}

impl<T: TokenType> Default for MergeHeapSegmenter<T> {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }
}

impl<T: TokenType> core::fmt::Debug for MergeHeapSegmenter<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MergeHeapSegmenter").finish()
    }
}

impl<T: TokenType> Clone for MergeHeapSegmenter<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: TokenType> MergeHeapSegmenter<T> {
    /// Enqueue the merge of ``(left, right)``, if it forms a piece.
    fn push_candidate(
        &mut self,
        vocab: &PieceVocab<T>,
        span: &[u8],
        left_idx: u32,
        right_idx: u32,
    ) {
        let start = self.symbols[left_idx as usize].start;
        let end = self.symbols[right_idx as usize].end;
        if end - start > vocab.max_piece_len() {
            return;
        }
        if let Some((token, score)) = vocab.lookup_mergeable(&span[start..end]) {
            self.heap.push(MergeEntry {
                score,
                start,
                len: end - start,
                left_idx,
                right_idx,
                token,
            });
        }
    }
}

impl<T: TokenType> Segmenter<T> for MergeHeapSegmenter<T> {
    fn segment_append(
        &mut self,
        vocab: &PieceVocab<T>,
        span: &[u8],
        segments: &mut Vec<Segment<T>>,
    ) {
        if span.is_empty() {
            return;
        }

        // Build doubly-linked list of codepoint symbols.
        self.symbols.clear();
        for (i, (start, end)) in char_spans(span).enumerate() {
            let i = i as u32;
            self.symbols.push(Symbol {
                start,
                end,
                token: vocab.lookup_mergeable(&span[start..end]).map(|(t, _)| t),
                prev: if i == 0 { NONE } else { i - 1 },
                next: i + 1,
            });
        }
        let n = self.symbols.len();
        if let Some(last) = self.symbols.last_mut() {
            last.next = NONE;
        }

        // Seed the heap with all initially-mergeable adjacent pairs.
        self.heap.clear();
        for i in 1..n {
            self.push_candidate(vocab, span, (i - 1) as u32, i as u32);
        }

        // Process merges in priority order (highest score first).
        while let Some(entry) = self.heap.pop() {
            let li = entry.left_idx as usize;
            let ri = entry.right_idx as usize;

            // Validate: both still adjacent, and unchanged in extent.
            let left = &self.symbols[li];
            if left.next != entry.right_idx
                || left.start != entry.start
                || self.symbols[ri].end - left.start != entry.len
            {
                continue;
            }

            // Merge: left absorbs right.
            let right_end = self.symbols[ri].end;
            let right_next = self.symbols[ri].next;
            {
                let left = &mut self.symbols[li];
                left.end = right_end;
                left.token = Some(entry.token);
                left.next = right_next;
            }
            // Unlink right; a dead symbol has no successor.
            self.symbols[ri].next = NONE;
            if right_next != NONE {
                self.symbols[right_next as usize].prev = entry.left_idx;
            }

            // Enqueue new neighbor pairs.
            let left_prev = self.symbols[li].prev;
            if left_prev != NONE {
                self.push_candidate(vocab, span, left_prev, entry.left_idx);
            }
            if right_next != NONE {
                self.push_candidate(vocab, span, entry.left_idx, right_next);
            }
        }

        // Collect final segments by walking the linked list.
        let mut idx = 0u32;
        while idx != NONE {
            let symbol = &self.symbols[idx as usize];
            match symbol.token {
                Some(token) => segments.push(Segment::Piece(token)),
                None => push_uncovered(segments, symbol.start..symbol.end),
            }
            idx = symbol.next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoders::testing::gemma_like_test_vocab, vocab::PieceKind};

    fn segment_str<T: TokenType>(
        vocab: &PieceVocab<T>,
        text: &str,
    ) -> Vec<Segment<T>> {
        MergeHeapSegmenter::<T>::default().segment(vocab, text.as_bytes())
    }

    fn pieces<T: TokenType>(
        vocab: &PieceVocab<T>,
        segments: &[Segment<T>],
    ) -> Vec<String> {
        segments
            .iter()
            .map(|s| match s {
                Segment::Piece(t) => vocab.by_id(*t).unwrap().piece.clone(),
                Segment::Uncovered(r) => format!("?{r:?}"),
            })
            .collect()
    }

    fn test_gemma_like<T: TokenType>() {
        let vocab: PieceVocab<T> = gemma_like_test_vocab();

        let cases: &[(&str, &[&str])] = &[
            ("hello▁world", &["hello", "▁world"]),
            ("hi▁", &["hi", "▁"]),
            ("▁bye", &["▁bye"]),
            ("<pad>", &["<", "pad", ">"]),
            ("hello", &["hello"]),
            ("hiƻ", &["hi", "?2..4"]),
            ("ƻƻb", &["?0..4", "b"]),
            ("", &[]),
        ];

        for &(text, expected) in cases {
            assert_eq!(
                pieces(&vocab, &segment_str(&vocab, text)),
                expected,
                "segment({text:?})"
            );
        }
    }

    #[test]
    fn test_gemma_like_u16() {
        test_gemma_like::<u16>();
    }

    #[test]
    fn test_gemma_like_u32() {
        test_gemma_like::<u32>();
    }

    #[test]
    fn test_leftmost_tie_break() {
        type T = u32;
        let vocab = PieceVocab::<T>::from_pieces([
            ("a", -1.0, PieceKind::Normal),
            ("aa", -2.0, PieceKind::Normal),
        ])
        .unwrap();

        assert_eq!(
            segment_str(&vocab, "aaa"),
            vec![Segment::Piece(1), Segment::Piece(0)]
        );
        assert_eq!(
            segment_str(&vocab, "aaaaa"),
            vec![Segment::Piece(1), Segment::Piece(1), Segment::Piece(0)]
        );
    }

    #[test]
    fn test_score_order() {
        type T = u32;
        let vocab = PieceVocab::<T>::from_pieces([
            ("a", -1.0, PieceKind::Normal),
            ("b", -1.0, PieceKind::Normal),
            ("c", -1.0, PieceKind::Normal),
            ("ab", -5.0, PieceKind::Normal),
            ("bc", -2.0, PieceKind::Normal),
        ])
        .unwrap();

        // "bc" outscores "ab", so it merges first; "a" is left alone.
        assert_eq!(
            segment_str(&vocab, "abc"),
            vec![Segment::Piece(0), Segment::Piece(4)]
        );
    }

    #[test]
    fn test_merge_through_uncovered() {
        type T = u32;
        let vocab = PieceVocab::<T>::from_pieces([
            ("a", -1.0, PieceKind::Normal),
            ("xa", -2.0, PieceKind::Normal),
        ])
        .unwrap();

        // "x" has no piece; but "xa" does.
        assert_eq!(segment_str(&vocab, "xa"), vec![Segment::Piece(1)]);
        assert_eq!(
            segment_str(&vocab, "yxa"),
            vec![Segment::Uncovered(0..1), Segment::Piece(1)]
        );
    }

    #[test]
    fn test_reuse_scratch() {
        type T = u32;
        let vocab: PieceVocab<T> = gemma_like_test_vocab();
        let mut segmenter = MergeHeapSegmenter::<T>::default();

        let first = segmenter.segment(&vocab, "hello▁world".as_bytes());
        let _ = segmenter.segment(&vocab, "by".as_bytes());
        let again = segmenter.segment(&vocab, "hello▁world".as_bytes());
        assert_eq!(first, again);
    }
}
