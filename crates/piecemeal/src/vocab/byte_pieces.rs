//! # Byte Fallback Pieces
//!
//! Byte fallback pieces are spelled `<0xHH>`: an angle bracket,
//! a literal `0x`, exactly two hex digits, and a closing bracket.

use crate::types::TokenType;

/// Byte length of a `<0xHH>` piece.
const BYTE_PIECE_LEN: usize = 6;

/// Format the canonical byte fallback piece for `byte`.
///
/// Uppercase hex, zero padded: `<0x0A>`.
pub fn format_byte_piece(byte: u8) -> String {
    format!("<0x{byte:02X}>")
}

/// Parse a `<0xHH>` byte fallback piece.
///
/// Hex digits are case-insensitive.
///
/// ## Returns
/// * `Some(byte)` for a well-formed piece,
/// * `None` for anything else; missing brackets, a wrong prefix,
///   a wrong digit count, or non-hex digits.
pub fn parse_byte_piece(piece: &str) -> Option<u8> {
    let bytes = piece.as_bytes();
    if bytes.len() != BYTE_PIECE_LEN || !piece.starts_with("<0x") || !piece.ends_with('>') {
        return None;
    }
    let digits = &bytes[3..5];
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    // both digits are ascii, so this slice is on char boundaries.
    u8::from_str_radix(&piece[3..5], 16).ok()
}

/// Diagnostic probe for the byte piece parser.
///
/// See [`parse_byte_piece`].
pub fn hex_token_probe(text: &str) -> Option<u8> {
    parse_byte_piece(text)
}

/// ``0..=255`` byte to token table for byte fallback.
///
/// A vocabulary either has all 256 byte pieces, or none.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteFallbackTable<T: TokenType> {
    byte_tokens: [T; 256],
}

impl<T: TokenType> ByteFallbackTable<T> {
    /// Build a table from a complete byte-ord => token table.
    pub fn new(byte_tokens: [T; 256]) -> Self {
        Self { byte_tokens }
    }

    /// Get the token for a byte.
    #[inline(always)]
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Get the byte-ord => token table.
    pub fn byte_tokens(&self) -> &[T; 256] {
        &self.byte_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_piece() {
        assert_eq!(parse_byte_piece("<0x40>"), Some(64));
        assert_eq!(parse_byte_piece("<0x00>"), Some(0));
        assert_eq!(parse_byte_piece("<0x1a>"), Some(26));
        assert_eq!(parse_byte_piece("<0xF3>"), Some(243));
        assert_eq!(parse_byte_piece("<0xff>"), Some(255));

        assert_eq!(parse_byte_piece("0x12>"), None);
        assert_eq!(parse_byte_piece("<x12>"), None);
        assert_eq!(parse_byte_piece("<012>"), None);
        assert_eq!(parse_byte_piece("<0xTA>"), None);
        assert_eq!(parse_byte_piece("<0x1>"), None);
        assert_eq!(parse_byte_piece("<0x123>"), None);
        assert_eq!(parse_byte_piece("<0X12>"), None);
        assert_eq!(parse_byte_piece("<0x+1>"), None);
        assert_eq!(parse_byte_piece("<0x12"), None);
        assert_eq!(parse_byte_piece(""), None);
    }

    #[test]
    fn test_format_byte_piece() {
        assert_eq!(format_byte_piece(0), "<0x00>");
        assert_eq!(format_byte_piece(0x0a), "<0x0A>");
        assert_eq!(format_byte_piece(0xC6), "<0xC6>");
    }

    #[test]
    fn test_byte_piece_roundtrip() {
        for b in 0..=255_u8 {
            assert_eq!(parse_byte_piece(&format_byte_piece(b)), Some(b));
        }
    }

    #[test]
    fn test_hex_token_probe() {
        assert_eq!(hex_token_probe("0x12>"), None);
        assert_eq!(hex_token_probe("<x12>"), None);
        assert_eq!(hex_token_probe("<0x1a>"), Some(26));
    }
}
