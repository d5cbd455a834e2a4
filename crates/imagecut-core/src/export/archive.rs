//! Zip packaging of exported cuts.
//!
//! PNG data is already compressed, so entries are stored as-is.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ExportedFile;

/// Errors raised while writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while writing archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Write every file into one in-memory zip archive, in order.
///
/// Entry names must already be unique.
pub fn build_archive(files: &[ExportedFile]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(&file.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
