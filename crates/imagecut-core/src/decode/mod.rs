//! Image decoding for the export pipeline.
//!
//! This module provides functionality for:
//! - Filtering user files by MIME type
//! - Probing natural dimensions without a full decode
//! - Decoding any supported format (JPEG, PNG, GIF, WebP, BMP) to RGBA,
//!   with EXIF orientation applied
//! - Scaling for the navigator overview and cut previews
//!
//! All operations are synchronous; the export coordinator wraps each decode
//! in its own future.

mod resize;
mod source;
mod types;

pub use resize::{fit_dimensions, resize, resize_to_width};
pub use source::{decode_image, get_orientation, is_image_mime, probe_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

#[cfg(test)]
pub(crate) use source::test_support;
