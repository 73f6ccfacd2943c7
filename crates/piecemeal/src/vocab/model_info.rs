//! # Model Info

use crate::types::TokenType;

/// The segmentation model a vocabulary was trained for.
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
#[strum(serialize_all = "lowercase")]
pub enum ModelKind {
    /// Score-ordered pair merging.
    #[default]
    Bpe,

    /// Maximum cumulative score (Viterbi) segmentation.
    Unigram,
}

/// Summary of a vocabulary's size and well-known special ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo<T: TokenType> {
    /// The number of pieces.
    pub vocab_size: usize,

    /// The `Unknown` piece id.
    pub unk_id: Option<T>,

    /// The beginning-of-sequence control id (`<bos>` or `<s>`).
    pub bos_id: Option<T>,

    /// The end-of-sequence control id (`<eos>` or `</s>`).
    pub eos_id: Option<T>,

    /// The padding control id (`<pad>`).
    pub pad_id: Option<T>,
}

/// Control piece spellings for the beginning-of-sequence id.
pub const BOS_PIECES: &[&str] = &["<bos>", "<s>"];

/// Control piece spellings for the end-of-sequence id.
pub const EOS_PIECES: &[&str] = &["<eos>", "</s>"];

/// Control piece spellings for the padding id.
pub const PAD_PIECES: &[&str] = &["<pad>"];

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;

    #[test]
    fn test_model_kind_names() {
        assert_eq!(ModelKind::default(), ModelKind::Bpe);
        assert_eq!(ModelKind::Unigram.to_string(), "unigram");
        assert_eq!(ModelKind::from_str("bpe").unwrap(), ModelKind::Bpe);
    }
}
