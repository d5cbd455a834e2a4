//! Image scaling used by the navigator overview and cut previews.
//!
//! Unlike export rasterization these helpers may upscale: a 10x10 cut still
//! fills its 32x32 preview tile.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target size and
/// `DecodeError::BufferMismatch` if the source buffer is inconsistent.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgba_image()?;
    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Resize an image to a fixed width, keeping its aspect ratio.
///
/// The height is rounded and never drops below one pixel.
pub fn resize_to_width(
    image: &DecodedImage,
    width: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if image.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }
    let height = (f64::from(image.height) * f64::from(width) / f64::from(image.width)).round();
    resize(image, width, (height as u32).max(1), filter)
}

/// Largest size with the source aspect ratio that fits a `box_w x box_h` box.
///
/// Scales by `min(box_w / src_w, box_h / src_h)`, so small sources grow.
/// Returns `(0, 0)` for an empty source or box.
pub fn fit_dimensions(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || box_w == 0 || box_h == 0 {
        return (0, 0);
    }

    let scale = (f64::from(box_w) / f64::from(src_w)).min(f64::from(box_h) / f64::from(src_h));
    let w = (f64::from(src_w) * scale).round() as u32;
    let h = (f64::from(src_h) * scale).round() as u32;
    (w.clamp(1, box_w), h.clamp(1, box_h))
}
