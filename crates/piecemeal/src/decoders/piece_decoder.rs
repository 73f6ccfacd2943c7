//! # Piece Decoder

use std::sync::Arc;

use crate::{
    errors::PMResult,
    normalize::Normalizer,
    support::strings::string_from_utf8_lossy,
    types::{Token, TokenType},
    vocab::{PieceKind, PieceVocab, byte_pieces::parse_byte_piece},
};

/// Surface text for the `Unknown` piece.
pub const UNKNOWN_SURFACE: &str = " \u{2047} ";

/// Expected decoded bytes per token; used for buffer pre-sizing.
const EXPECTED_BYTES_PER_TOKEN: usize = 4;

/// Decodes token ids back into text.
///
/// * `Normal`, `UserDefined`, and `Unused` pieces contribute their text,
///   with `▁` turned back into spaces;
/// * `Byte` pieces contribute their byte;
/// * `Control` pieces contribute nothing;
/// * the `Unknown` piece contributes [`UNKNOWN_SURFACE`].
///
/// When the vocabulary adds a dummy prefix, one leading space is stripped.
#[derive(Debug, Clone)]
pub struct PieceDecoder<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    normalizer: Normalizer,
}

impl<T: TokenType> PieceDecoder<T> {
    /// Creates a new decoder.
    pub fn new(vocab: Arc<PieceVocab<T>>) -> Self {
        let normalizer = Normalizer::new(*vocab.normalizer_spec());
        Self { vocab, normalizer }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    /// Decode ids into bytes.
    ///
    /// ## Errors
    /// [`PiecemealError::OutOfRange`](crate::PiecemealError::OutOfRange)
    /// on an id outside the vocabulary.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ids)))]
    pub fn try_decode_to_bytes(
        &self,
        ids: &[T],
    ) -> PMResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(ids.len() * EXPECTED_BYTES_PER_TOKEN);

        for &id in ids {
            let entry = self.vocab.by_id(id)?;
            match entry.kind {
                PieceKind::Control => (),
                PieceKind::Unknown => buf.extend_from_slice(UNKNOWN_SURFACE.as_bytes()),
                // byte entries were validated at vocab construction.
                PieceKind::Byte => buf.extend(parse_byte_piece(&entry.piece)),
                PieceKind::Normal | PieceKind::UserDefined | PieceKind::Unused => buf
                    .extend_from_slice(
                        self.normalizer
                            .denormalize_piece(&entry.piece)
                            .as_bytes(),
                    ),
            }
        }

        if self.normalizer.spec().add_dummy_prefix && buf.first() == Some(&b' ') {
            buf.remove(0);
        }

        Ok(buf)
    }

    /// Decode ids into a string.
    ///
    /// Invalid UTF-8 (from unpaired byte pieces) is replaced with `U+FFFD`.
    pub fn try_decode_to_string(
        &self,
        ids: &[T],
    ) -> PMResult<String> {
        self.try_decode_to_bytes(ids).map(string_from_utf8_lossy)
    }

    /// Decode encoder output tokens into a string.
    pub fn try_decode_tokens(
        &self,
        tokens: &[Token<T>],
    ) -> PMResult<String> {
        let ids: Vec<T> = tokens.iter().map(|t| t.id).collect();
        self.try_decode_to_string(&ids)
    }

    /// Decode a batch of id sequences into strings.
    pub fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> PMResult<Vec<String>> {
        batch
            .iter()
            .map(|ids| self.try_decode_to_string(ids))
            .collect()
    }
}
