//! # String Utilities

use std::borrow::Cow;

/// "stable" stub for for [`String::from_utf8_lossy`].
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8_lossy(&v) {
        Cow::Owned(string) => string,
        // Borrowed means `v` was already valid UTF-8.
        Cow::Borrowed(s) => s.to_string(),
    }
}
