//! # Whitespace Normalizer

use std::borrow::Cow;

/// The internal whitespace marker, `▁` (U+2581).
pub const WHITESPACE_MARKER: char = '\u{2581}';

/// The UTF-8 bytes of [`WHITESPACE_MARKER`].
pub const WHITESPACE_MARKER_BYTES: &[u8] = "\u{2581}".as_bytes();

/// Normalization rules for a vocabulary.
///
/// The default escapes whitespace only; no dummy prefix,
/// and whitespace runs are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerSpec {
    /// Prepend one space to non-empty text.
    pub add_dummy_prefix: bool,

    /// Trim leading/trailing spaces, and collapse interior space runs to one space.
    pub remove_extra_whitespaces: bool,

    /// Replace spaces with [`WHITESPACE_MARKER`].
    pub escape_whitespaces: bool,
}

impl Default for NormalizerSpec {
    fn default() -> Self {
        Self {
            add_dummy_prefix: false,
            remove_extra_whitespaces: false,
            escape_whitespaces: true,
        }
    }
}

impl NormalizerSpec {
    /// Set `add_dummy_prefix` and return the spec.
    pub fn with_add_dummy_prefix(
        mut self,
        add_dummy_prefix: bool,
    ) -> Self {
        self.add_dummy_prefix = add_dummy_prefix;
        self
    }

    /// Set `remove_extra_whitespaces` and return the spec.
    pub fn with_remove_extra_whitespaces(
        mut self,
        remove_extra_whitespaces: bool,
    ) -> Self {
        self.remove_extra_whitespaces = remove_extra_whitespaces;
        self
    }

    /// Set `escape_whitespaces` and return the spec.
    pub fn with_escape_whitespaces(
        mut self,
        escape_whitespaces: bool,
    ) -> Self {
        self.escape_whitespaces = escape_whitespaces;
        self
    }
}

/// Rewrites raw text bytes according to a [`NormalizerSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer {
    spec: NormalizerSpec,
}

impl From<NormalizerSpec> for Normalizer {
    fn from(spec: NormalizerSpec) -> Self {
        Self::new(spec)
    }
}

impl Normalizer {
    /// Build a normalizer.
    pub fn new(spec: NormalizerSpec) -> Self {
        Self { spec }
    }

    /// Get the spec.
    pub fn spec(&self) -> &NormalizerSpec {
        &self.spec
    }

    /// Normalize text.
    ///
    /// ## Arguments
    /// * `text` - raw text bytes; need not be valid UTF-8.
    ///
    /// ## Returns
    /// The normalized bytes; borrowed when no rewrite was needed.
    pub fn normalize<'a>(
        &self,
        text: &'a [u8],
    ) -> Cow<'a, [u8]> {
        let mut text: Cow<'a, [u8]> = Cow::Borrowed(text);

        if self.spec.remove_extra_whitespaces {
            text = collapse_spaces(text);
        }

        if self.spec.add_dummy_prefix && !text.is_empty() {
            let mut buf = Vec::with_capacity(text.len() + 1);
            buf.push(b' ');
            buf.extend_from_slice(&text);
            text = Cow::Owned(buf);
        }

        if self.spec.escape_whitespaces && text.contains(&b' ') {
            let mut buf = Vec::with_capacity(text.len() + 2 * WHITESPACE_MARKER_BYTES.len());
            for &b in text.iter() {
                if b == b' ' {
                    buf.extend_from_slice(WHITESPACE_MARKER_BYTES);
                } else {
                    buf.push(b);
                }
            }
            text = Cow::Owned(buf);
        }

        text
    }

    /// Invert whitespace escaping in decoded text.
    pub fn denormalize_piece<'a>(
        &self,
        piece: &'a str,
    ) -> Cow<'a, str> {
        if self.spec.escape_whitespaces && piece.contains(WHITESPACE_MARKER) {
            Cow::Owned(piece.replace(WHITESPACE_MARKER, " "))
        } else {
            Cow::Borrowed(piece)
        }
    }
}

fn collapse_spaces(text: Cow<'_, [u8]>) -> Cow<'_, [u8]> {
    let start = text.iter().position(|&b| b != b' ');
    let Some(start) = start else {
        return Cow::Owned(Vec::new());
    };
    // `start` exists, so some non-space byte does too.
    let end = text.iter().rposition(|&b| b != b' ').map_or(start, |i| i + 1);

    let trimmed = &text[start..end];
    if !trimmed.windows(2).any(|w| w == b"  ") {
        if start == 0 && end == text.len() {
            return text;
        }
        return Cow::Owned(trimmed.to_vec());
    }

    let mut buf = Vec::with_capacity(trimmed.len());
    let mut last_space = false;
    for &b in trimmed {
        let is_space = b == b' ';
        if !(is_space && last_space) {
            buf.push(b);
        }
        last_space = is_space;
    }
    Cow::Owned(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_str(
        spec: NormalizerSpec,
        text: &str,
    ) -> String {
        let normalizer = Normalizer::new(spec);
        String::from_utf8(normalizer.normalize(text.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn test_default_escapes_only() {
        let spec = NormalizerSpec::default();
        assert_eq!(normalize_str(spec, "hello world"), "hello▁world");
        assert_eq!(normalize_str(spec, "  "), "▁▁");
        assert_eq!(normalize_str(spec, " a  b "), "▁a▁▁b▁");
        assert_eq!(normalize_str(spec, "tab\there"), "tab\there");
        assert_eq!(normalize_str(spec, ""), "");
    }

    #[test]
    fn test_borrowed_when_unchanged() {
        let normalizer = Normalizer::default();
        assert!(matches!(normalizer.normalize(b"abc"), Cow::Borrowed(_)));
        assert!(matches!(normalizer.normalize(b"a c"), Cow::Owned(_)));
    }

    #[test]
    fn test_dummy_prefix() {
        let spec = NormalizerSpec::default().with_add_dummy_prefix(true);
        assert_eq!(normalize_str(spec, "hello"), "▁hello");
        assert_eq!(normalize_str(spec, " hello"), "▁▁hello");
        assert_eq!(normalize_str(spec, ""), "");
    }

    #[test]
    fn test_remove_extra_whitespaces() {
        let spec = NormalizerSpec::default()
            .with_remove_extra_whitespaces(true)
            .with_add_dummy_prefix(true);
        assert_eq!(normalize_str(spec, "  hello   world  "), "▁hello▁world");
        assert_eq!(normalize_str(spec, "    "), "");
        assert_eq!(normalize_str(spec, "a b"), "▁a▁b");

        let spec = NormalizerSpec::default()
            .with_remove_extra_whitespaces(true)
            .with_escape_whitespaces(false);
        assert_eq!(normalize_str(spec, " a  b "), "a b");
    }

    #[test]
    fn test_invalid_utf8_passthrough() {
        let normalizer = Normalizer::default();
        let text = [0xFF, b' ', 0xC6];
        let mut expected = vec![0xFF];
        expected.extend_from_slice(WHITESPACE_MARKER_BYTES);
        expected.push(0xC6);
        assert_eq!(normalizer.normalize(&text).as_ref(), expected.as_slice());
    }

    #[test]
    fn test_denormalize_piece() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.denormalize_piece("▁world"), " world");
        assert_eq!(normalizer.denormalize_piece("hello"), "hello");
    }
}
