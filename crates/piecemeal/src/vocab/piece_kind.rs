//! # Piece Kinds

/// The kind of a vocabulary piece.
///
/// Spelled in SCREAMING_SNAKE_CASE when parsed or displayed
/// (`NORMAL`, `USER_DEFINED`, ...).
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    /// A learned subword piece.
    #[default]
    Normal,

    /// The unknown piece, `<unk>`.
    Unknown,

    /// A control piece (`<bos>`, `<eos>`, `<pad>`); never produced from raw text by default.
    Control,

    /// A user-defined symbol; always matched whole, before segmentation.
    UserDefined,

    /// A `<0xHH>` byte fallback piece.
    Byte,

    /// A reserved, unused piece.
    Unused,
}

impl PieceKind {
    /// Is piece text unique among pieces of this kind?
    ///
    /// `Normal`, `UserDefined`, and `Control` pieces share one text namespace.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Normal | Self::UserDefined | Self::Control)
    }

    /// Can segmentation produce this piece?
    pub fn is_mergeable(&self) -> bool {
        matches!(self, Self::Normal | Self::UserDefined)
    }
}
