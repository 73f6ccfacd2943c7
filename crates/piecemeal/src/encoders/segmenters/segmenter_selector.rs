//! # Segmenter Selector

use std::sync::Arc;

use crate::{
    encoders::segmenters::{MergeHeapSegmenter, Segmenter, ViterbiSegmenter},
    types::TokenType,
    vocab::ModelKind,
};

/// Policy enum for selecting a [`Segmenter`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum SegmenterSelector {
    /// Use the [`MergeHeapSegmenter`]; score-ordered pair merging.
    MergeHeap,

    /// Use the [`ViterbiSegmenter`]; maximum cumulative score.
    Viterbi,
}

impl SegmenterSelector {
    /// The segmenter a vocabulary was trained for.
    pub fn for_model_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Bpe => Self::MergeHeap,
            ModelKind::Unigram => Self::Viterbi,
        }
    }

    /// Get a builder for the configured [`Segmenter`].
    pub fn segmenter_builder<T: TokenType>(
        &self
    ) -> Arc<dyn Fn() -> Box<dyn Segmenter<T>> + Send + Sync> {
        use SegmenterSelector::*;
        match self {
            MergeHeap => Arc::new(|| Box::new(MergeHeapSegmenter::<T>::default())),
            Viterbi => Arc::new(|| Box::new(ViterbiSegmenter::<T>::default())),
        }
    }
}
