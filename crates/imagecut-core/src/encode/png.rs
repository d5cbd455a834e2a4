//! PNG encoding for exported cuts.
//!
//! Cuts are always written as 8-bit RGB PNGs: the rasterizer composites
//! onto an opaque background, so an alpha channel would carry no data.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&[255u8; 4 * 4 * 3], 4, 4).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let pixels: Vec<u8> = (0..6 * 2 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let png = encode_png(&pixels, 6, 2).unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 2));
        assert!(matches!(decoded, image::DynamicImage::ImageRgb8(_)));
        assert_eq!(decoded.into_rgb8().into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let result = encode_png(&[0u8; 10], 2, 2);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData { expected: 12, actual: 10 })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        assert!(matches!(
            encode_png(&[], 0, 10),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_png(&[], 10, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let png = encode_png(&[255, 0, 0], 1, 1).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }
}
