//! Encoder Options
//!
//! Options for building a [`TokenEncoder`].

use std::sync::Arc;

use crate::{
    encoders::{PieceEncoder, TokenEncoder, segmenters::SegmenterSelector},
    errors::PMResult,
    types::TokenType,
    vocab::PieceVocab,
};

/// What to do with text that has no piece coverage, when the vocabulary
/// has no `<0xHH>` byte pieces.
#[derive(
    Default,
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
pub enum UnknownPolicy {
    /// Fail the encode call with
    /// [`PiecemealError::Unencodable`](crate::PiecemealError::Unencodable).
    #[default]
    Error,

    /// Emit the `Unknown` piece once per uncovered run.
    ///
    /// Fails as [`Error`](Self::Error) does when there is no `Unknown` piece.
    EmitUnknown,
}

/// Options for configuring a [`TokenEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncoderOptions {
    /// The [`SegmenterSelector`] to use.
    ///
    /// When `None`, the segmenter is selected by the vocabulary's model kind.
    pub segmenter: Option<SegmenterSelector>,

    /// Handling of uncovered text without byte fallback.
    pub unknown_policy: UnknownPolicy,

    /// Should `Control` pieces (`<pad>`, `<bos>`, ...) be matched in text?
    pub recognize_control_symbols: bool,

    /// Should batches be encoded in parallel?
    pub parallel: bool,
}

impl EncoderOptions {
    /// Gets the effective segmenter selector for a vocabulary.
    ///
    /// Will return any explicit setting,
    /// otherwise will select based upon the vocabulary model kind.
    pub fn effective_segmenter<T: TokenType>(
        &self,
        vocab: &PieceVocab<T>,
    ) -> SegmenterSelector {
        self.segmenter
            .unwrap_or_else(|| SegmenterSelector::for_model_kind(vocab.model_kind()))
    }

    /// Get the configured [`SegmenterSelector`].
    pub fn segmenter(&self) -> Option<SegmenterSelector> {
        self.segmenter
    }

    /// Set the configured [`SegmenterSelector`].
    pub fn set_segmenter<S>(
        &mut self,
        segmenter: S,
    ) where
        S: Into<Option<SegmenterSelector>>,
    {
        self.segmenter = segmenter.into();
    }

    /// Set the configured [`SegmenterSelector`] and return the options.
    pub fn with_segmenter<S>(
        mut self,
        segmenter: S,
    ) -> Self
    where
        S: Into<Option<SegmenterSelector>>,
    {
        self.set_segmenter(segmenter);
        self
    }

    /// Get the configured [`UnknownPolicy`].
    pub fn unknown_policy(&self) -> UnknownPolicy {
        self.unknown_policy
    }

    /// Set the configured [`UnknownPolicy`].
    pub fn set_unknown_policy(
        &mut self,
        unknown_policy: UnknownPolicy,
    ) {
        self.unknown_policy = unknown_policy;
    }

    /// Set the configured [`UnknownPolicy`] and return the options.
    pub fn with_unknown_policy(
        mut self,
        unknown_policy: UnknownPolicy,
    ) -> Self {
        self.set_unknown_policy(unknown_policy);
        self
    }

    /// Are `Control` pieces matched in text?
    ///
    /// Off by default; `<pad>` in text then segments as ordinary characters.
    pub fn recognize_control_symbols(&self) -> bool {
        self.recognize_control_symbols
    }

    /// Set whether `Control` pieces are matched in text.
    pub fn set_recognize_control_symbols(
        &mut self,
        recognize_control_symbols: bool,
    ) {
        self.recognize_control_symbols = recognize_control_symbols;
    }

    /// Set whether `Control` pieces are matched in text, and return the options.
    pub fn with_recognize_control_symbols(
        mut self,
        recognize_control_symbols: bool,
    ) -> Self {
        self.set_recognize_control_symbols(recognize_control_symbols);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request a ``rayon`` batch encoder,
    /// when the ``rayon`` feature is enabled.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value, and return the options.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenEncoder`] for the given vocab.
    ///
    /// ## Errors
    /// [`PiecemealError::InvalidModel`](crate::PiecemealError::InvalidModel)
    /// if the symbol matcher cannot be built.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<PieceVocab<T>>,
    ) -> PMResult<Arc<dyn TokenEncoder<T>>> {
        let enc = PieceEncoder::<T>::new(vocab, *self)?;

        #[cfg(feature = "rayon")]
        if self.parallel() {
            return Ok(Arc::new(crate::concurrency::ParallelRayonEncoder::new(enc)));
        }

        Ok(Arc::new(enc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encoders::testing::gemma_like_test_vocab, vocab::ModelKind};

    #[test]
    fn test_defaults() {
        let options = EncoderOptions::default();
        assert_eq!(options.segmenter(), None);
        assert_eq!(options.unknown_policy(), UnknownPolicy::Error);
        assert!(!options.recognize_control_symbols());
        assert!(!options.parallel());
    }

    #[test]
    fn test_builders() {
        let options = EncoderOptions::default()
            .with_segmenter(SegmenterSelector::Viterbi)
            .with_unknown_policy(UnknownPolicy::EmitUnknown)
            .with_recognize_control_symbols(true)
            .with_parallel(true);

        assert_eq!(options.segmenter(), Some(SegmenterSelector::Viterbi));
        assert_eq!(options.unknown_policy(), UnknownPolicy::EmitUnknown);
        assert!(options.recognize_control_symbols());
        assert!(options.parallel());

        let options = options.with_segmenter(None);
        assert_eq!(options.segmenter(), None);
    }

    #[test]
    fn test_effective_segmenter() {
        type T = u32;
        let vocab: PieceVocab<T> = gemma_like_test_vocab();
        let options = EncoderOptions::default();
        assert_eq!(
            options.effective_segmenter(&vocab),
            SegmenterSelector::MergeHeap
        );

        let vocab = vocab.with_model_kind(ModelKind::Unigram);
        assert_eq!(
            options.effective_segmenter(&vocab),
            SegmenterSelector::Viterbi
        );
        assert_eq!(
            options
                .with_segmenter(SegmenterSelector::MergeHeap)
                .effective_segmenter(&vocab),
            SegmenterSelector::MergeHeap
        );
    }

    #[test]
    fn test_build() {
        type T = u32;
        let vocab: Arc<PieceVocab<T>> = gemma_like_test_vocab().into();

        for parallel in [false, true] {
            let encoder = EncoderOptions::default()
                .with_parallel(parallel)
                .build(vocab.clone())
                .unwrap();
            assert!(Arc::ptr_eq(encoder.vocab(), &vocab));
            assert_eq!(encoder.try_encode_ids("  ").unwrap(), vec![15]);
        }
    }
}
