//! Export coordinator: decode, rasterize, package.
//!
//! A run owns snapshots of everything it needs, so the editor stays free to
//! change while the run is in flight. Each image is one task that decodes,
//! rasterizes its cuts and drops the bitmap before the next task starts, so
//! at most one decoded image is alive at a time. The caller hands the
//! resulting [`BatchReport`] back to the session, which decides which export
//! flags still apply.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::archive::{build_archive, ArchiveError};
use super::naming::{cut_file_name, UniqueNames};
use crate::config::Settings;
use crate::decode::{decode_image, DecodedImage};
use crate::raster::{render_cut_png, RasterError};
use crate::region::CutRegion;

/// Everything needed to export the cuts of one image.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub image_index: usize,
    pub file_name: String,
    pub bytes: Arc<[u8]>,
    /// Region list as it was when the job was created
    pub regions: Arc<[CutRegion]>,
}

/// One encoded cut, ready to be saved or archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Progress of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportPhase {
    #[default]
    Idle,
    Decoding,
    Rasterizing,
    Packaging,
    Done,
}

/// How the encoded cuts are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Packaging {
    /// One file per cut
    Individual,
    /// All cuts in a single zip archive
    Archive,
}

#[derive(Debug)]
pub enum ExportOutput {
    Files(Vec<ExportedFile>),
    Archive { name: String, bytes: Vec<u8> },
}

/// An image whose cuts could not be produced.
#[derive(Debug)]
pub struct ExportFailure {
    pub image_index: usize,
    pub file_name: String,
    pub error: RasterError,
}

/// Result of a finished export run.
#[derive(Debug)]
pub struct BatchReport {
    pub output: ExportOutput,
    /// Images whose cuts were all produced, with the snapshot they came from
    pub exported: Vec<(usize, Arc<[CutRegion]>)>,
    pub failures: Vec<ExportFailure>,
    /// Regions with no overlap with their image
    pub skipped_regions: usize,
    /// Number of encoded cuts delivered
    pub file_count: usize,
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// No image with at least one region
    #[error("Nothing to export: no image has any cut")]
    NoJobs,

    #[error("Failed to build archive: {0}")]
    Archive(#[from] ArchiveError),
}

/// A single export run over a set of jobs.
#[derive(Debug)]
pub struct BatchExport {
    jobs: Vec<ExportJob>,
    packaging: Packaging,
    background: [u8; 3],
    archive_name: String,
}

impl BatchExport {
    /// Jobs without regions are dropped here; they take no part in the run.
    pub fn new(jobs: Vec<ExportJob>, packaging: Packaging, settings: &Settings) -> Self {
        let jobs = jobs
            .into_iter()
            .filter(|job| !job.regions.is_empty())
            .collect();
        Self {
            jobs,
            packaging,
            background: settings.background,
            archive_name: settings.archive_name.clone(),
        }
    }

    pub fn jobs(&self) -> &[ExportJob] {
        &self.jobs
    }

    pub async fn run(self) -> Result<BatchReport, ExportError> {
        self.run_with(|_| {}).await
    }

    /// Run the export, reporting every phase change to `on_phase`.
    pub async fn run_with(
        self,
        on_phase: impl FnMut(ExportPhase),
    ) -> Result<BatchReport, ExportError> {
        if self.jobs.is_empty() {
            return Err(ExportError::NoJobs);
        }

        let phases = PhaseTracker::new(on_phase);
        phases.enter(ExportPhase::Decoding);
        let results = join_all(
            self.jobs
                .iter()
                .map(|job| export_job(job, self.background, &phases)),
        )
        .await;
        // Reached even when every decode failed
        phases.enter(ExportPhase::Rasterizing);

        let mut files = Vec::new();
        let mut exported = Vec::new();
        let mut failures = Vec::new();
        let mut skipped_regions = 0;

        for (job, result) in self.jobs.iter().zip(results) {
            match result {
                Ok((job_files, skipped)) => {
                    skipped_regions += skipped;
                    files.extend(job_files);
                    exported.push((job.image_index, Arc::clone(&job.regions)));
                }
                Err(e) => {
                    log::error!("Failed to export cuts of {}: {e}", job.file_name);
                    failures.push(ExportFailure {
                        image_index: job.image_index,
                        file_name: job.file_name.clone(),
                        error: e,
                    });
                }
            }
        }

        phases.enter(ExportPhase::Packaging);
        let mut names = UniqueNames::new();
        for file in &mut files {
            file.name = names.claim(&file.name);
        }
        let file_count = files.len();
        let output = match self.packaging {
            Packaging::Individual => ExportOutput::Files(files),
            Packaging::Archive => ExportOutput::Archive {
                bytes: build_archive(&files)?,
                name: self.archive_name,
            },
        };

        phases.enter(ExportPhase::Done);
        Ok(BatchReport {
            output,
            exported,
            failures,
            skipped_regions,
            file_count,
        })
    }
}

/// Forwards phase changes to the observer, each one once.
struct PhaseTracker<F> {
    current: Cell<ExportPhase>,
    on_phase: RefCell<F>,
}

impl<F: FnMut(ExportPhase)> PhaseTracker<F> {
    fn new(on_phase: F) -> Self {
        Self {
            current: Cell::new(ExportPhase::Idle),
            on_phase: RefCell::new(on_phase),
        }
    }

    fn enter(&self, phase: ExportPhase) {
        if self.current.replace(phase) == phase {
            return;
        }
        log::debug!("Export phase: {phase:?}");
        (self.on_phase.borrow_mut())(phase);
    }
}

/// Decode one image and render its cuts. The bitmap is dropped on return.
async fn export_job<F: FnMut(ExportPhase)>(
    job: &ExportJob,
    background: [u8; 3],
    phases: &PhaseTracker<F>,
) -> Result<(Vec<ExportedFile>, usize), RasterError> {
    let image = decode_image(&job.bytes)?;
    phases.enter(ExportPhase::Rasterizing);
    rasterize_job(job, &image, background)
}

/// Render every region of one job. Degenerate regions are counted, not
/// rendered; their positions still count towards the file names.
fn rasterize_job(
    job: &ExportJob,
    image: &DecodedImage,
    background: [u8; 3],
) -> Result<(Vec<ExportedFile>, usize), RasterError> {
    let mut files = Vec::with_capacity(job.regions.len());
    let mut skipped = 0;

    for (i, region) in job.regions.iter().enumerate() {
        match render_cut_png(image, region, background)? {
            Some(bytes) => files.push(ExportedFile {
                name: cut_file_name(&job.file_name, i + 1),
                bytes,
            }),
            None => {
                log::debug!(
                    "Skipping {} of {}: no overlap with the image",
                    region.id,
                    job.file_name
                );
                skipped += 1;
            }
        }
    }

    Ok((files, skipped))
}
