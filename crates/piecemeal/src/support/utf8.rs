//! # UTF-8 Scanning
//!
//! Input text may carry invalid or truncated UTF-8; these helpers step over
//! it one "codepoint" at a time, treating each invalid byte as its own unit
//! so that byte fallback can still cover it.

/// Byte length of the UTF-8 sequence introduced by `lead`, or 1 if `lead`
/// cannot start a sequence.
#[inline(always)]
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

/// Length of the first codepoint in `text`.
///
/// ## Returns
/// * `0` for empty text,
/// * the encoded length of the first char when it is valid UTF-8,
/// * `1` when the leading bytes are invalid, overlong, or truncated.
pub fn next_char_len(text: &[u8]) -> usize {
    let Some(&lead) = text.first() else {
        return 0;
    };
    let width = sequence_width(lead);
    if width == 1 || text.len() < width {
        return 1;
    }
    match core::str::from_utf8(&text[..width]) {
        Ok(_) => width,
        Err(_) => 1,
    }
}

/// Iterate over the codepoint boundaries of `text`, as `(start, end)` pairs.
pub fn char_spans(text: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut pos = 0;
    core::iter::from_fn(move || {
        if pos >= text.len() {
            return None;
        }
        let start = pos;
        pos += next_char_len(&text[pos..]);
        Some((start, pos))
    })
}
