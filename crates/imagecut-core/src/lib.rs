//! Imagecut Core - cut-region geometry and export pipeline
//!
//! This crate holds everything behind the imagecut editor that is not UI:
//! the cut regions and their clamping, the zoom/scroll viewport, pointer
//! gestures, the editor session, and the export pipeline that rasterizes
//! cuts to PNG and packages them.

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod gesture;
pub mod preview;
pub mod raster;
pub mod region;
pub mod session;
pub mod viewport;

pub use config::Settings;
pub use export::{BatchExport, BatchReport, ExportError, ExportJob, ExportPhase, Packaging};
pub use gesture::{hit_test, DragHandle, Gesture, RegionEdit};
pub use raster::{rasterize_region, render_cut_png, RasterError};
pub use region::{CutRegion, PixelRect, Rect, RegionId};
pub use session::{EditError, EditorSession, FileInput, ImageEntry, LoadReport, Shortcut};
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
