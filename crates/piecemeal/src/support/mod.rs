//! # Support Utilities

pub mod ranges;
pub mod strings;
pub mod utf8;
