//! Imagecut WASM - WebAssembly bindings for imagecut
//!
//! This crate exposes the imagecut-core editor session and export pipeline
//! to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `session` - The `EditorSession` class: images, cuts, gestures, zoom,
//!   navigation and async export
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (any supported format, resize)
//! - `encode` - PNG encoding and single-cut rendering
//! - `preview` - Cut preview tiles and the navigator overview
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditorSession } from '@imagecut/wasm';
//!
//! await init();
//! const session = new EditorSession();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod preview;
mod session;
mod types;

pub use decode::{decode_image, is_image_mime, probe_dimensions, resize};
pub use encode::{encode_png, render_cut};
pub use preview::{cut_preview, overview_thumbnail};
pub use session::JsEditorSession;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` output to the browser console and installs the panic hook.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed when the module is re-initialized
        web_sys::console::debug_1(&"imagecut: logger already initialized".into());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
