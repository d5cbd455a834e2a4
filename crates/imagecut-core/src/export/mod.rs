//! Export of cuts: single-image and batch runs.
//!
//! This module provides:
//! - [`BatchExport`]: decodes every source, rasterizes every cut and
//!   packages the results, reporting [`ExportPhase`] changes
//! - Output naming (`"<file> (cut <n>).png"`) with de-duplication
//! - Zip packaging for batch exports

mod archive;
mod batch;
mod naming;

pub use archive::{build_archive, ArchiveError};
pub use batch::{
    BatchExport, BatchReport, ExportError, ExportFailure, ExportJob, ExportOutput, ExportPhase,
    ExportedFile, Packaging,
};
pub use naming::{cut_file_name, UniqueNames};
