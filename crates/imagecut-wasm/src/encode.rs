//! PNG encoding and single-cut rendering bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGB pixel data to PNG bytes
//! - [`render_cut`] - Clamp, composite and encode one cut of a decoded image
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, render_cut } from '@imagecut/wasm';
//!
//! const image = decode_image(bytes);
//! const png = render_cut(image, -50, 0, 200, 100); // 150x100 PNG
//! if (png) download(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::{js_error, JsDecodedImage};
use imagecut_core::region::{CutRegion, RegionId};
use imagecut_core::{encode, raster};
use wasm_bindgen::prelude::*;

const WHITE: [u8; 3] = [255, 255, 255];

/// Encode RGB pixel data (3 bytes per pixel) to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(js_error)
}

/// Render the cut `{x, y, width, height}` of an image as PNG bytes.
///
/// The cut is clamped to the image and composited onto `background`
/// (`[r, g, b]`, white when omitted). Returns `undefined` when the cut does
/// not overlap the image.
#[wasm_bindgen]
pub fn render_cut(
    image: &JsDecodedImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    background: Option<Vec<u8>>,
) -> Result<Option<Vec<u8>>, JsValue> {
    let region = CutRegion::new(RegionId(0), x, y, width, height);
    raster::render_cut_png(&image.to_decoded(), &region, background_from(background))
        .map_err(js_error)
}

/// `[r, g, b]` from JS, falling back to white for anything else.
pub(crate) fn background_from(value: Option<Vec<u8>>) -> [u8; 3] {
    match value.as_deref() {
        Some(&[r, g, b]) => [r, g, b],
        _ => WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_from() {
        assert_eq!(background_from(None), WHITE);
        assert_eq!(background_from(Some(vec![1, 2, 3])), [1, 2, 3]);
        assert_eq!(background_from(Some(vec![1, 2])), WHITE);
    }
}
