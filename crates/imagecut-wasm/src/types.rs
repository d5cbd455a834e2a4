//! WASM-compatible wrapper types for image data.
//!
//! Pixel buffers cross the boundary as RGBA so they can go straight into
//! an `ImageData` for canvas drawing.

use imagecut_core::decode::{DecodedImage, FilterType};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image held in WASM memory.
///
/// `pixels()` copies the buffer into a JS `Uint8Array`; keep the image on
/// the WASM side when it is only passed back into other bindings.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGBA pixel data (4 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGBA pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Release the WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Map a filter number from JS to the core filter.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3; anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Turn any displayable error into a JS string value.
pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20_000);
    }

    #[test]
    fn test_decoded_round_trip() {
        let decoded = DecodedImage::filled(3, 2, [1, 2, 3, 4]);
        let js_img = JsDecodedImage::from_decoded(decoded.clone());
        assert_eq!(js_img.pixels(), decoded.pixels);
        assert_eq!(js_img.to_decoded(), decoded);
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }
}
