//! # Parallel Encoder

use std::sync::Arc;

use crate::{
    encoders::TokenEncoder,
    errors::PMResult,
    types::{Token, TokenType},
    vocab::PieceVocab,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonEncoder<T: TokenType, D: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: D,

    _marker: std::marker::PhantomData<T>,
}

impl<T, D> ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, D> TokenEncoder<T> for ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        self.inner.vocab()
    }

    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()> {
        self.inner.try_encode_bytes_append(text, tokens)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<Token<T>>>> {
        use rayon::prelude::*;

        let results: Vec<PMResult<Vec<Token<T>>>> = batch
            .par_iter()
            .map(|text| self.inner.try_encode(text))
            .collect();

        results.into_iter().collect()
    }
}
