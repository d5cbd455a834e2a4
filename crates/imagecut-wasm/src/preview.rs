//! Navigator preview bindings.

use crate::types::{js_error, JsDecodedImage};
use imagecut_core::preview;
use imagecut_core::region::{CutRegion, RegionId};
use wasm_bindgen::prelude::*;

/// A `size x size` tile showing one cut, centered on transparency.
///
/// Returns `undefined` when the cut does not overlap the image.
#[wasm_bindgen]
pub fn cut_preview(
    image: &JsDecodedImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    size: u32,
) -> Result<Option<JsDecodedImage>, JsValue> {
    let region = CutRegion::new(RegionId(0), x, y, width, height);
    preview::cut_preview(&image.to_decoded(), &region, size)
        .map(|tile| tile.map(JsDecodedImage::from_decoded))
        .map_err(js_error)
}

/// The whole image scaled to `width`, for the navigator overview.
#[wasm_bindgen]
pub fn overview_thumbnail(image: &JsDecodedImage, width: u32) -> Result<JsDecodedImage, JsValue> {
    preview::overview_thumbnail(&image.to_decoded(), width)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
