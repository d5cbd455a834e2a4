//! Editor and export settings.
//!
//! Settings are plain data handed to the session and the exporter. The host
//! passes them as a JS object; any missing field falls back to its default.

use serde::{Deserialize, Serialize};

/// Side length of a newly added cut, in image pixels.
pub const DEFAULT_CUT_SIZE: f64 = 300.0;

/// Name of the archive produced by a batch export.
pub const DEFAULT_ARCHIVE_NAME: &str = "all_cuts.zip";

/// Tunable settings shared by the editor session and the exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width and height of a new cut in image pixels
    pub default_cut_size: f64,
    /// Smallest width/height a resize gesture can produce, in image pixels
    pub min_cut_size: f64,
    /// Zoom factor applied by "zoom in"
    pub zoom_in_step: f64,
    /// Zoom factor applied by "zoom out"
    pub zoom_out_step: f64,
    /// Opaque RGB fill behind every exported cut
    pub background: [u8; 3],
    /// File name of the batch export archive
    pub archive_name: String,
    /// Edge length of the square cut preview tiles
    pub preview_size: u32,
    /// Width of the navigator overview image
    pub overview_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_cut_size: DEFAULT_CUT_SIZE,
            min_cut_size: 1.0,
            zoom_in_step: 1.1,
            zoom_out_step: 0.9,
            background: [255, 255, 255],
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            preview_size: 32,
            overview_width: 200,
        }
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }
}
