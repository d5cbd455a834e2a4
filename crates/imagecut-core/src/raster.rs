//! Rasterization of a single cut.
//!
//! A cut is clamped to the image, an output buffer of the clamped size is
//! filled with an opaque background, and the source is composited on top
//! at `(-x, -y)` so exactly the covered sub-rectangle lands in the output.
//! Transparent source pixels therefore show the background, never holes.

use image::RgbImage;

use crate::decode::{DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::region::{CutRegion, PixelRect};

/// Rasterize one cut against a decoded source image.
///
/// Returns `Ok(None)` for a degenerate cut (no overlap with the image);
/// nothing is allocated in that case.
///
/// # Errors
///
/// Returns `DecodeError::BufferMismatch` if the source buffer does not
/// match its dimensions.
pub fn rasterize_region(
    image: &DecodedImage,
    region: &CutRegion,
    background: [u8; 3],
) -> Result<Option<RgbImage>, DecodeError> {
    let expected = image.width as usize * image.height as usize * DecodedImage::CHANNELS;
    if image.pixels.len() != expected {
        return Err(DecodeError::BufferMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    let Some(rect) = region.clamp_to_image(image.width, image.height) else {
        return Ok(None);
    };

    composite(image, rect, background).map(Some)
}

/// Rasterize a cut and encode it as PNG.
///
/// `Ok(None)` for degenerate cuts, like [`rasterize_region`].
pub fn render_cut_png(
    image: &DecodedImage,
    region: &CutRegion,
    background: [u8; 3],
) -> Result<Option<Vec<u8>>, RasterError> {
    let Some(output) = rasterize_region(image, region, background)? else {
        return Ok(None);
    };
    let (width, height) = output.dimensions();
    Ok(Some(encode_png(output.as_raw(), width, height)?))
}

/// Failure while turning a cut into PNG bytes.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Source(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

fn composite(
    image: &DecodedImage,
    rect: PixelRect,
    background: [u8; 3],
) -> Result<RgbImage, DecodeError> {
    let src_stride = image.width as usize * DecodedImage::CHANNELS;
    let mut output = Vec::with_capacity(rect.width as usize * rect.height as usize * 3);

    for row in 0..rect.height as usize {
        let src_row = (rect.y as usize + row) * src_stride;
        let start = src_row + rect.x as usize * DecodedImage::CHANNELS;
        let end = start + rect.width as usize * DecodedImage::CHANNELS;

        for px in image.pixels[start..end].chunks_exact(DecodedImage::CHANNELS) {
            let alpha = u32::from(px[3]);
            for channel in 0..3 {
                output.push(blend(px[channel], background[channel], alpha));
            }
        }
    }

    let expected = rect.width as usize * rect.height as usize * 3;
    let actual = output.len();
    RgbImage::from_raw(rect.width, rect.height, output)
        .ok_or(DecodeError::BufferMismatch { expected, actual })
}

/// Straight-alpha "over" onto an opaque background, rounded.
#[inline]
fn blend(src: u8, bg: u8, alpha: u32) -> u8 {
    ((u32::from(src) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::region::RegionId;
    use proptest::prelude::*;

    proptest! {
        /// Property: output size equals the overlap with the image, or nothing.
        #[test]
        fn prop_output_is_overlap(
            (img_w, img_h) in (1u32..=40, 1u32..=40),
            x in -60i32..=60, y in -60i32..=60,
            w in 0u32..=80, h in 0u32..=80,
        ) {
            let img = DecodedImage::filled(img_w, img_h, [1, 2, 3, 255]);
            let region = CutRegion::new(RegionId(0), f64::from(x), f64::from(y), f64::from(w), f64::from(h));
            let out = rasterize_region(&img, &region, [255, 255, 255]).unwrap();

            let left = i64::from(x).max(0);
            let top = i64::from(y).max(0);
            let right = (i64::from(x) + i64::from(w)).min(i64::from(img_w));
            let bottom = (i64::from(y) + i64::from(h)).min(i64::from(img_h));

            match out {
                Some(out) => {
                    prop_assert_eq!(i64::from(out.width()), right - left);
                    prop_assert_eq!(i64::from(out.height()), bottom - top);
                    prop_assert!(out.pixels().all(|p| p.0 == [1, 2, 3]));
                }
                None => prop_assert!(right <= left || bottom <= top),
            }
        }

        /// Property: outputs are opaque whatever the source alpha.
        #[test]
        fn prop_never_transparent(alpha in any::<u8>(), value in any::<u8>()) {
            let img = DecodedImage::filled(3, 3, [value, value, value, alpha]);
            let region = CutRegion::new(RegionId(0), -1.0, -1.0, 3.0, 3.0);
            let out = rasterize_region(&img, &region, [255, 255, 255]).unwrap().unwrap();

            // Blending toward white never darkens below the source value
            for p in out.pixels() {
                prop_assert!(p.0.iter().all(|&c| c >= value));
            }
        }
    }
}
