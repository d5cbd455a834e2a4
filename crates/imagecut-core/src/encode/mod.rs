//! Image encoding for exported cuts.
//!
//! Each cut is encoded independently as a PNG before any packaging happens,
//! so a failing archive step never leaves a half-written output behind.

mod png;

pub use png::{encode_png, EncodeError};
