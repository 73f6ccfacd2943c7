//! # Range Utilities

use core::ops::Range;

/// Add an offset to the start and end of a [`Range<usize>`].
pub fn offset_range(
    range: Range<usize>,
    offset: usize,
) -> Range<usize> {
    Range {
        start: range.start + offset,
        end: range.end + offset,
    }
}
