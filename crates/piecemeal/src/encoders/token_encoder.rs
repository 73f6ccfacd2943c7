//! # Token Encoder Trait

use std::sync::Arc;

use crate::{
    errors::PMResult,
    types::{Token, TokenType},
    vocab::PieceVocab,
};

/// Expected normalized bytes per token; used for buffer pre-sizing.
const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocabulary.
    fn vocab(&self) -> &Arc<PieceVocab<T>>;

    /// Encode raw bytes, appending to a target buffer.
    ///
    /// Bytes need not be valid UTF-8; invalid bytes are covered by byte fallback.
    ///
    /// ## Arguments
    /// * `text` - The raw text bytes.
    /// * `tokens` - The target token buffer to append to.
    ///
    /// ## Errors
    /// [`PiecemealError::Unencodable`](crate::PiecemealError::Unencodable) when
    /// text has no vocabulary coverage, and no fallback applies. On error,
    /// `tokens` may hold a partial encoding.
    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()>;

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The string slice to encode.
    /// * `tokens` - The target token buffer to append to.
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<Token<T>>,
    ) -> PMResult<()> {
        self.try_encode_bytes_append(text.as_bytes(), tokens)
    }

    /// Encode raw bytes into tokens.
    fn try_encode_bytes(
        &self,
        text: &[u8],
    ) -> PMResult<Vec<Token<T>>> {
        let mut tokens = Vec::with_capacity(text.len() / EXPECTED_BYTES_PER_TOKEN + 1);
        self.try_encode_bytes_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A `Result` containing the tokens, in input order.
    fn try_encode(
        &self,
        text: &str,
    ) -> PMResult<Vec<Token<T>>> {
        self.try_encode_bytes(text.as_bytes())
    }

    /// Encode text into token ids.
    fn try_encode_ids(
        &self,
        text: &str,
    ) -> PMResult<Vec<T>> {
        Ok(self.try_encode(text)?.into_iter().map(|t| t.id).collect())
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    ///
    /// ## Returns
    /// A `Result` containing one token vector per input; or the first error.
    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PMResult<Vec<Vec<Token<T>>>> {
        batch.iter().map(|s| self.try_encode(s)).collect()
    }
}
