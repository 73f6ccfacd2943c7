//! # Viterbi [`Segmenter`].
//!
//! Maximum cumulative score segmentation, for unigram vocabularies.
//!
//! Every codepoint boundary is a lattice node; every mergeable piece that
//! spans two boundaries is an edge, weighted by its score. A codepoint no
//! piece covers gets an uncovered edge weighted by
//! [`PieceVocab::unknown_score`].
//!
//! Ties prefer the higher score, then the longer last piece, then the
//! lowest id.

use core::cmp::Ordering;

use crate::{
    encoders::segmenters::{Segment, Segmenter, push_uncovered},
    support::utf8::char_spans,
    types::TokenType,
    vocab::PieceVocab,
};

/// Best path into a lattice node.
#[derive(Debug, Clone, Copy)]
struct Best<T> {
    score: f32,
    /// Index of the boundary the last edge starts at.
    from: usize,
    /// `None` for an uncovered edge.
    token: Option<T>,
}

/// Is ``(score, len, token)`` a strictly better last edge than `best`?
fn improves<T: TokenType>(
    score: f32,
    len: usize,
    token: Option<T>,
    best: &Best<T>,
    best_len: usize,
) -> bool {
    match score.total_cmp(&best.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match len.cmp(&best_len) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match (token, best.token) {
                (Some(a), Some(b)) => a < b,
                (Some(_), None) => true,
                _ => false,
            },
        },
    }
}

/// A [`Segmenter`] finding the maximum-score path through the piece lattice.
pub struct ViterbiSegmenter<T: TokenType> {
    bounds: Vec<usize>,
    best: Vec<Option<Best<T>>>,
    path: Vec<usize>,
}

impl<T: TokenType> Default for ViterbiSegmenter<T> {
    fn default() -> Self {
        Self {
            bounds: Vec::new(),
            best: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl<T: TokenType> core::fmt::Debug for ViterbiSegmenter<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ViterbiSegmenter").finish()
    }
}

impl<T: TokenType> Clone for ViterbiSegmenter<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: TokenType> Segmenter<T> for ViterbiSegmenter<T> {
    fn segment_append(
        &mut self,
        vocab: &PieceVocab<T>,
        span: &[u8],
        segments: &mut Vec<Segment<T>>,
    ) {
        if span.is_empty() {
            return;
        }

        self.bounds.clear();
        self.bounds.push(0);
        self.bounds.extend(char_spans(span).map(|(_, end)| end));
        let n = self.bounds.len();

        self.best.clear();
        self.best.resize(n, None);
        self.best[0] = Some(Best {
            score: 0.0,
            from: 0,
            token: None,
        });

        let max_len = vocab.max_piece_len();
        let unknown_score = vocab.unknown_score();

        for end_idx in 1..n {
            let end = self.bounds[end_idx];
            let mut best: Option<(Best<T>, usize)> = None;

            for start_idx in (0..end_idx).rev() {
                let start = self.bounds[start_idx];
                let len = end - start;
                let single = start_idx + 1 == end_idx;
                if !single && len > max_len {
                    break;
                }
                // every node before `end_idx` is reachable; a single
                // codepoint edge always exists.
                let Some(prefix) = self.best[start_idx] else {
                    continue;
                };

                let (token, score) = match vocab.lookup_mergeable(&span[start..end]) {
                    Some((token, score)) => (Some(token), score),
                    None if single => (None, unknown_score),
                    None => continue,
                };
                let score = prefix.score + score;

                let better = match &best {
                    None => true,
                    Some((b, b_len)) => improves(score, len, token, b, *b_len),
                };
                if better {
                    best = Some((
                        Best {
                            score,
                            from: start_idx,
                            token,
                        },
                        len,
                    ));
                }
            }

            self.best[end_idx] = best.map(|(b, _)| b);
        }

        // Backtrack from the final node.
        self.path.clear();
        let mut idx = n - 1;
        while idx > 0 {
            self.path.push(idx);
            idx = match self.best[idx] {
                Some(b) => b.from,
                None => idx - 1,
            };
        }

        let mut start_idx = 0;
        for &end_idx in self.path.iter().rev() {
            let start = self.bounds[start_idx];
            let end = self.bounds[end_idx];
            match self.best[end_idx].and_then(|b| b.token) {
                Some(token) => segments.push(Segment::Piece(token)),
                None => push_uncovered(segments, start..end),
            }
            start_idx = end_idx;
        }
    }
}
