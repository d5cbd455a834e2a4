//! Small previews for the navigator panel.
//!
//! - [`cut_preview`]: a cut scaled into a square tile, centered, on a
//!   transparent background
//! - [`overview_thumbnail`]: the whole image at a fixed width, over which
//!   the host draws [`crate::viewport::Viewport::overview_rect`]

use crate::decode::{fit_dimensions, resize_to_width, DecodeError, DecodedImage, FilterType};
use crate::region::CutRegion;

/// Render a `size x size` preview tile of one cut.
///
/// Only the part of the cut that overlaps the image is shown. Returns
/// `Ok(None)` for a degenerate cut or a zero tile size.
pub fn cut_preview(
    image: &DecodedImage,
    region: &CutRegion,
    size: u32,
) -> Result<Option<DecodedImage>, DecodeError> {
    if size == 0 {
        return Ok(None);
    }
    let Some(rect) = region.clamp_to_image(image.width, image.height) else {
        return Ok(None);
    };

    let view = image.as_rgba_image()?;
    let sub = image::imageops::crop_imm(&view, rect.x, rect.y, rect.width, rect.height);

    let (w, h) = fit_dimensions(rect.width, rect.height, size, size);
    let scaled = image::imageops::resize(&*sub, w, h, FilterType::Bilinear.to_image_filter());

    let mut tile = image::RgbaImage::new(size, size);
    image::imageops::replace(
        &mut tile,
        &scaled,
        i64::from((size - w) / 2),
        i64::from((size - h) / 2),
    );

    Ok(Some(DecodedImage::from_rgba_image(tile)))
}

/// Scale the whole image to `width`, keeping its aspect ratio.
pub fn overview_thumbnail(image: &DecodedImage, width: u32) -> Result<DecodedImage, DecodeError> {
    resize_to_width(image, width, FilterType::Bilinear)
}
