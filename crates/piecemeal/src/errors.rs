//! # Error Types

/// Errors from piecemeal operations.
#[derive(Debug, thiserror::Error)]
pub enum PiecemealError {
    /// The vocabulary violates a construction invariant.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A token id outside of the vocabulary.
    #[error("token id {id} out of range for vocab of size {size}")]
    OutOfRange {
        /// The offending id.
        id: usize,

        /// The vocabulary size.
        size: usize,
    },

    /// The vocabulary has no `<0xHH>` byte pieces.
    #[error("model has no byte fallback pieces")]
    ModelMissingByteFallback,

    /// Text with no vocabulary coverage, and no fallback to cover it.
    #[error("unencodable text: {len} bytes at offset {offset} have no vocabulary coverage")]
    Unencodable {
        /// Byte offset in the normalized text.
        offset: usize,

        /// Byte length of the uncovered run.
        len: usize,
    },

    /// I/O error.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (vocab files, scores, kinds).
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for piecemeal operations.
pub type PMResult<T> = core::result::Result<T, PiecemealError>;
