//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`is_image_mime`] - Whether a file's MIME type is accepted
//! - [`probe_dimensions`] - Natural (oriented) size without decoding pixels
//! - [`decode_image`] - Decode any supported format to RGBA
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, probe_dimensions } from '@imagecut/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const [width, height] = probe_dimensions(bytes);
//! const image = decode_image(bytes);
//! ```

use crate::types::{filter_from_u8, js_error, JsDecodedImage};
use imagecut_core::decode;
use wasm_bindgen::prelude::*;

/// Whether a MIME type names an image (`image/*`).
#[wasm_bindgen]
pub fn is_image_mime(mime: &str) -> bool {
    decode::is_image_mime(mime)
}

/// Read `[width, height]` of an image with EXIF orientation applied.
///
/// # Errors
///
/// Returns an error string if the format is unknown or the header is
/// unreadable.
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::probe_dimensions(bytes)
        .map(|(width, height)| vec![width, height])
        .map_err(js_error)
}

/// Decode an image from bytes to RGBA, applying EXIF orientation.
///
/// JPEG, PNG, GIF, WebP and BMP are supported; the format is detected from
/// the content.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imagecut_core::encode::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png(width: u32, height: u32) -> Vec<u8> {
        let pixels = [10u8, 20, 30].repeat((width * height) as usize);
        encode_png(&pixels, width, height).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_probe_and_decode() {
        let bytes = png(12, 7);
        assert_eq!(probe_dimensions(&bytes).unwrap(), vec![12, 7]);

        let image = decode_image(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (12, 7));
        assert_eq!(&image.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[wasm_bindgen_test]
    fn test_decode_invalid_bytes() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize() {
        let image = decode_image(&png(10, 10)).unwrap();
        let small = resize(&image, 5, 4, 1).unwrap();
        assert_eq!((small.width(), small.height()), (5, 4));
    }
}
