//! # Concurrency Support
//!
//! Batch-level parallelism over ``rayon``.

mod rayon_encoder;

#[doc(inline)]
pub use rayon_encoder::*;
