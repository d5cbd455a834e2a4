//! The editor session: loaded images, their cuts, and export status.
//!
//! Every image owns an ordered list of cuts. A list is never edited in
//! place: each mutation builds a new `Arc<[CutRegion]>` and swaps it in, so
//! a list captured by an export run stays exactly as it was captured.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::decode::{is_image_mime, probe_dimensions};
use crate::export::{BatchReport, ExportJob};
use crate::gesture::RegionEdit;
use crate::region::{CutRegion, RegionId};
use crate::viewport::Viewport;

/// Errors from editing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Unknown region {0}")]
    UnknownRegion(RegionId),

    #[error("Image index {index} out of range ({len} images loaded)")]
    ImageOutOfRange { index: usize, len: usize },
}

/// A file picked by the user, before filtering.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A loaded source image.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    /// Oriented natural size, `None` if it could not be read
    pub dimensions: Option<(u32, u32)>,
}

/// Outcome of [`EditorSession::load_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub accepted: usize,
    /// Names of files that are not images
    pub rejected: Vec<String>,
}

/// Keyboard shortcuts of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shortcut {
    PreviousImage,
    NextImage,
    AddRegion,
}

impl Shortcut {
    /// Map a DOM `KeyboardEvent.key` (or `code`) value to a shortcut.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::PreviousImage),
            "ArrowRight" => Some(Self::NextImage),
            " " | "Space" | "Spacebar" => Some(Self::AddRegion),
            _ => None,
        }
    }
}

/// All editing state of one browser session.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    settings: Settings,
    entries: Vec<ImageEntry>,
    regions: Vec<Arc<[CutRegion]>>,
    exported: Vec<bool>,
    active: usize,
    viewport: Viewport,
    next_id: u64,
}

impl EditorSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Replace the whole image set.
    ///
    /// Non-image files are left out and named in the report. Accepted images
    /// start without cuts and unexported; the first one becomes active.
    pub fn load_files(&mut self, files: Vec<FileInput>) -> LoadReport {
        let mut report = LoadReport::default();
        let mut entries = Vec::with_capacity(files.len());

        for file in files {
            if !is_image_mime(&file.mime) {
                log::warn!("Skipping {}: not an image ({})", file.name, file.mime);
                report.rejected.push(file.name);
                continue;
            }

            let dimensions = match probe_dimensions(&file.bytes) {
                Ok(dimensions) => Some(dimensions),
                Err(e) => {
                    log::warn!("Could not read size of {}: {e}", file.name);
                    None
                }
            };

            entries.push(ImageEntry {
                name: file.name,
                mime: file.mime,
                bytes: file.bytes.into(),
                dimensions,
            });
        }

        report.accepted = entries.len();
        self.regions = entries
            .iter()
            .map(|_| Arc::<[CutRegion]>::from(Vec::new()))
            .collect();
        self.exported = vec![false; entries.len()];
        self.entries = entries;
        self.active = 0;
        self.viewport.scroll_to(0.0, 0.0, (0, 0));
        log::debug!(
            "Loaded {} images, rejected {}",
            report.accepted,
            report.rejected.len()
        );
        report
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_entry(&self) -> Option<&ImageEntry> {
        self.entries.get(self.active)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Cuts of one image, in creation order.
    pub fn regions(&self, image_index: usize) -> Result<&Arc<[CutRegion]>, EditError> {
        self.check_index(image_index)?;
        Ok(&self.regions[image_index])
    }

    pub fn region(&self, id: RegionId) -> Option<&CutRegion> {
        self.regions
            .iter()
            .flat_map(|list| list.iter())
            .find(|region| region.id == id)
    }

    pub fn is_exported(&self, image_index: usize) -> Result<bool, EditError> {
        self.check_index(image_index)?;
        Ok(self.exported[image_index])
    }

    pub fn has_regions(&self, image_index: usize) -> Result<bool, EditError> {
        Ok(!self.regions(image_index)?.is_empty())
    }

    pub fn has_regions_in_any_image(&self) -> bool {
        self.regions.iter().any(|list| !list.is_empty())
    }

    /// Add a default-sized cut centered in the visible part of the image.
    pub fn add_region(&mut self, image_index: usize) -> Result<RegionId, EditError> {
        self.check_index(image_index)?;

        let size = self.settings.default_cut_size;
        let (cx, cy) = self.viewport.center();
        let id = RegionId(self.next_id);
        self.next_id += 1;
        let region = CutRegion::new(id, cx - size / 2.0, cy - size / 2.0, size, size);

        let list: Vec<CutRegion> = self.regions[image_index]
            .iter()
            .copied()
            .chain(std::iter::once(region))
            .collect();
        self.replace(image_index, list);
        log::debug!("Added {id} to image {image_index}");
        Ok(id)
    }

    /// Move a cut to a new origin, keeping its size.
    pub fn move_region(&mut self, id: RegionId, x: f64, y: f64) -> Result<(), EditError> {
        self.update_region(id, |region| region.moved_to(x, y))
    }

    /// Replace the geometry of a cut. Negative sizes become zero.
    pub fn resize_region(
        &mut self,
        id: RegionId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), EditError> {
        self.update_region(id, |region| region.reshaped(x, y, width, height))
    }

    pub fn remove_region(&mut self, id: RegionId) -> Result<(), EditError> {
        let (image_index, _) = self.locate(id)?;
        let list: Vec<CutRegion> = self.regions[image_index]
            .iter()
            .filter(|region| region.id != id)
            .copied()
            .collect();
        self.replace(image_index, list);
        log::debug!("Removed {id} from image {image_index}");
        Ok(())
    }

    /// Apply the result of a finished gesture.
    pub fn apply_edit(&mut self, id: RegionId, edit: RegionEdit) -> Result<(), EditError> {
        match edit {
            RegionEdit::Move { x, y } => self.move_region(id, x, y),
            RegionEdit::Resize {
                x,
                y,
                width,
                height,
            } => self.resize_region(id, x, y, width, height),
        }
    }

    pub fn next_image(&mut self) {
        if !self.entries.is_empty() {
            self.active = (self.active + 1) % self.entries.len();
        }
    }

    pub fn prev_image(&mut self) {
        if !self.entries.is_empty() {
            let len = self.entries.len();
            self.active = (self.active + len - 1) % len;
        }
    }

    pub fn select_image(&mut self, index: usize) -> Result<(), EditError> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Perform a shortcut on the active image.
    ///
    /// Returns the id of the new cut for [`Shortcut::AddRegion`].
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> Result<Option<RegionId>, EditError> {
        match shortcut {
            Shortcut::PreviousImage => {
                self.prev_image();
                Ok(None)
            }
            Shortcut::NextImage => {
                self.next_image();
                Ok(None)
            }
            Shortcut::AddRegion => self.add_region(self.active).map(Some),
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_by(self.settings.zoom_in_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_by(self.settings.zoom_out_step);
    }

    /// Fit the active image into the container. No-op if its size is unknown.
    pub fn fit_active(&mut self) {
        if let Some((width, height)) = self.active_entry().and_then(|entry| entry.dimensions) {
            self.viewport.fit_to(width, height);
        }
    }

    /// Scroll the canvas of the active image.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        let size = self.active_size();
        self.viewport.scroll_to(x, y, size);
    }

    /// Scroll by a drag on the navigator overview of the active image.
    pub fn pan_by_overview(&mut self, dx: f64, dy: f64) {
        let size = self.active_size();
        let (overview_width, overview_height) = self.overview_size();
        self.viewport
            .pan_by_overview(dx, dy, overview_width, overview_height, size);
    }

    /// Size of the navigator overview for the active image.
    pub fn overview_size(&self) -> (f64, f64) {
        let (width, height) = self.active_size();
        if width == 0 {
            return (0.0, 0.0);
        }
        let overview_width = f64::from(self.settings.overview_width);
        (
            overview_width,
            overview_width * f64::from(height) / f64::from(width),
        )
    }

    fn active_size(&self) -> (u32, u32) {
        self.active_entry()
            .and_then(|entry| entry.dimensions)
            .unwrap_or((0, 0))
    }

    /// Snapshot of one image for a single-image export.
    ///
    /// `None` when the image has no cuts.
    pub fn export_job(&self, image_index: usize) -> Result<Option<ExportJob>, EditError> {
        self.check_index(image_index)?;
        Ok(self.job(image_index))
    }

    /// Snapshots of every image that has at least one cut.
    pub fn batch_jobs(&self) -> Vec<ExportJob> {
        (0..self.entries.len())
            .filter_map(|index| self.job(index))
            .collect()
    }

    /// Mark images exported after a run.
    ///
    /// An image is marked only if its cut list is still the very list the
    /// run exported; anything edited since stays unexported.
    pub fn apply_export_report(&mut self, report: &BatchReport) {
        for (index, snapshot) in &report.exported {
            match self.regions.get(*index) {
                Some(current) if Arc::ptr_eq(current, snapshot) => self.exported[*index] = true,
                _ => log::debug!("Image {index} changed during export, flag left unset"),
            }
        }
    }

    fn job(&self, image_index: usize) -> Option<ExportJob> {
        let regions = &self.regions[image_index];
        if regions.is_empty() {
            return None;
        }
        let entry = &self.entries[image_index];
        Some(ExportJob {
            image_index,
            file_name: entry.name.clone(),
            bytes: Arc::clone(&entry.bytes),
            regions: Arc::clone(regions),
        })
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(EditError::ImageOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Image index and list position of a cut.
    fn locate(&self, id: RegionId) -> Result<(usize, usize), EditError> {
        self.regions
            .iter()
            .enumerate()
            .find_map(|(image_index, list)| {
                list.iter()
                    .position(|region| region.id == id)
                    .map(|position| (image_index, position))
            })
            .ok_or(EditError::UnknownRegion(id))
    }

    fn update_region(
        &mut self,
        id: RegionId,
        change: impl FnOnce(&CutRegion) -> CutRegion,
    ) -> Result<(), EditError> {
        let (image_index, position) = self.locate(id)?;
        let mut list = self.regions[image_index].to_vec();
        list[position] = change(&list[position]);
        self.replace(image_index, list);
        Ok(())
    }

    fn replace(&mut self, image_index: usize, list: Vec<CutRegion>) {
        self.regions[image_index] = list.into();
        self.exported[image_index] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::coordinate_png;
    use crate::export::{BatchExport, ExportOutput, Packaging};
    use futures::executor::block_on;

    fn png_file(name: &str, width: u32, height: u32) -> FileInput {
        FileInput {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: coordinate_png(width, height),
        }
    }

    fn session_with(files: Vec<FileInput>) -> EditorSession {
        let mut session = EditorSession::new(Settings::default());
        session.load_files(files);
        session
    }

    #[test]
    fn test_load_filters_non_images() {
        let mut session = EditorSession::new(Settings::default());
        let report = session.load_files(vec![
            png_file("a.png", 10, 10),
            FileInput {
                name: "notes.txt".to_string(),
                mime: "text/plain".to_string(),
                bytes: b"hello".to_vec(),
            },
            png_file("b.png", 20, 10),
        ]);

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, vec!["notes.txt".to_string()]);
        assert_eq!(session.entries().len(), 2);
        assert_eq!(session.entries()[1].dimensions, Some((20, 10)));
    }

    #[test]
    fn test_load_keeps_image_with_unreadable_size() {
        let session = session_with(vec![FileInput {
            name: "broken.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![0, 1, 2],
        }]);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.entries()[0].dimensions, None);
    }

    #[test]
    fn test_load_replaces_previous_set() {
        let mut session = session_with(vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)]);
        session.add_region(1).unwrap();
        session.select_image(1).unwrap();

        session.load_files(vec![png_file("c.png", 10, 10)]);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(session.active_index(), 0);
        assert!(!session.has_regions_in_any_image());
        assert!(!session.is_exported(0).unwrap());
    }

    #[test]
    fn test_add_region_centered_in_view() {
        let mut session = session_with(vec![png_file("a.png", 2000, 2000)]);
        session.viewport_mut().set_container(1000.0, 800.0);
        session.viewport_mut().scroll_to(100.0, 200.0, (2000, 2000));

        let id = session.add_region(0).unwrap();
        let region = session.region(id).unwrap();
        // Center (600, 600), default 300x300
        assert_eq!(region.rect(), crate::region::Rect::new(450.0, 450.0, 300.0, 300.0));
    }

    #[test]
    fn test_add_region_at_zoom_uses_image_space() {
        let mut session = session_with(vec![png_file("a.png", 2000, 2000)]);
        session.viewport_mut().set_container(1000.0, 1000.0);
        session.viewport_mut().set_zoom(2.0);

        let id = session.add_region(0).unwrap();
        let region = session.region(id).unwrap();
        // Visible area is 500x500 image px, center (250, 250)
        assert_eq!((region.x, region.y), (100.0, 100.0));
        assert_eq!((region.width, region.height), (300.0, 300.0));
    }

    #[test]
    fn test_new_settings_apply_to_next_cut() {
        let mut session = session_with(vec![png_file("a.png", 100, 100)]);
        let first = session.add_region(0).unwrap();
        session.set_settings(Settings {
            default_cut_size: 40.0,
            ..Settings::default()
        });
        let second = session.add_region(0).unwrap();

        assert_eq!(session.region(first).unwrap().width, 300.0);
        assert_eq!(session.region(second).unwrap().width, 40.0);
        assert_eq!(session.settings().default_cut_size, 40.0);
    }

    #[test]
    fn test_add_region_out_of_range() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        assert_eq!(
            session.add_region(3),
            Err(EditError::ImageOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_ids_are_unique_across_images() {
        let mut session = session_with(vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)]);
        let a = session.add_region(0).unwrap();
        let b = session.add_region(1).unwrap();
        let c = session.add_region(0).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_move_keeps_size_and_others() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let a = session.add_region(0).unwrap();
        let b = session.add_region(0).unwrap();
        let before_b = *session.region(b).unwrap();

        session.move_region(a, -40.0, 900.0).unwrap();
        let moved = session.region(a).unwrap();
        assert_eq!((moved.x, moved.y), (-40.0, 900.0));
        assert_eq!((moved.width, moved.height), (300.0, 300.0));
        assert_eq!(*session.region(b).unwrap(), before_b);
    }

    #[test]
    fn test_resize_clamps_negative_size() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let id = session.add_region(0).unwrap();
        session.resize_region(id, 1.0, 2.0, -5.0, 20.0).unwrap();

        let region = session.region(id).unwrap();
        assert_eq!(region.rect(), crate::region::Rect::new(1.0, 2.0, 0.0, 20.0));
    }

    #[test]
    fn test_remove_region() {
        let mut session = session_with(vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)]);
        let a = session.add_region(1).unwrap();
        let b = session.add_region(1).unwrap();

        session.remove_region(a).unwrap();
        let ids: Vec<_> = session.regions(1).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn test_unknown_region_changes_nothing() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let id = session.add_region(0).unwrap();
        session.exported[0] = true;
        let before = Arc::clone(session.regions(0).unwrap());

        let missing = RegionId(999);
        assert_eq!(
            session.move_region(missing, 0.0, 0.0),
            Err(EditError::UnknownRegion(missing))
        );
        assert_eq!(
            session.resize_region(missing, 0.0, 0.0, 1.0, 1.0),
            Err(EditError::UnknownRegion(missing))
        );
        assert_eq!(session.remove_region(missing), Err(EditError::UnknownRegion(missing)));

        assert!(Arc::ptr_eq(session.regions(0).unwrap(), &before));
        assert!(session.is_exported(0).unwrap());
        assert!(session.region(id).is_some());
    }

    #[test]
    fn test_every_mutation_resets_flag() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let id = session.add_region(0).unwrap();

        let mutations: Vec<Box<dyn Fn(&mut EditorSession)>> = vec![
            Box::new(|s: &mut EditorSession| {
                s.add_region(0).unwrap();
            }),
            Box::new(move |s: &mut EditorSession| s.move_region(id, 3.0, 4.0).unwrap()),
            Box::new(move |s: &mut EditorSession| s.resize_region(id, 0.0, 0.0, 5.0, 5.0).unwrap()),
            Box::new(move |s: &mut EditorSession| {
                s.apply_edit(id, RegionEdit::Move { x: 1.0, y: 1.0 }).unwrap();
            }),
            Box::new(|s: &mut EditorSession| {
                let last = s.regions(0).unwrap().last().unwrap().id;
                s.remove_region(last).unwrap();
            }),
        ];

        for mutate in mutations {
            session.exported[0] = true;
            mutate(&mut session);
            assert!(!session.is_exported(0).unwrap());
        }
    }

    #[test]
    fn test_mutation_does_not_touch_snapshot() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let id = session.add_region(0).unwrap();
        let snapshot = Arc::clone(session.regions(0).unwrap());
        let original = snapshot[0];

        session.move_region(id, 77.0, 88.0).unwrap();
        session.add_region(0).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], original);
        assert!(!Arc::ptr_eq(session.regions(0).unwrap(), &snapshot));
    }

    #[test]
    fn test_coordinates_invariant_under_zoom() {
        let mut session = session_with(vec![png_file("a.png", 10, 10)]);
        let id = session.add_region(0).unwrap();
        session.move_region(id, 10.0, 20.0).unwrap();

        session.viewport_mut().set_zoom(2.0);
        session.viewport_mut().set_zoom(1.0);
        let region = session.region(id).unwrap();
        assert_eq!(region.rect(), crate::region::Rect::new(10.0, 20.0, 300.0, 300.0));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut session = session_with(vec![
            png_file("a.png", 10, 10),
            png_file("b.png", 10, 10),
            png_file("c.png", 10, 10),
        ]);
        session.prev_image();
        assert_eq!(session.active_index(), 2);
        session.next_image();
        assert_eq!(session.active_index(), 0);
        session.next_image();
        assert_eq!(session.active_index(), 1);
        assert!(session.select_image(5).is_err());
        assert_eq!(session.active_index(), 1);
    }

    #[test]
    fn test_navigation_without_images() {
        let mut session = EditorSession::default();
        session.next_image();
        session.prev_image();
        assert_eq!(session.active_index(), 0);
        assert!(session.apply_shortcut(Shortcut::AddRegion).is_err());
    }

    #[test]
    fn test_shortcut_keys() {
        assert_eq!(Shortcut::from_key("ArrowLeft"), Some(Shortcut::PreviousImage));
        assert_eq!(Shortcut::from_key("ArrowRight"), Some(Shortcut::NextImage));
        assert_eq!(Shortcut::from_key(" "), Some(Shortcut::AddRegion));
        assert_eq!(Shortcut::from_key("Space"), Some(Shortcut::AddRegion));
        assert_eq!(Shortcut::from_key("Enter"), None);
    }

    #[test]
    fn test_apply_shortcut_adds_to_active_image() {
        let mut session = session_with(vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)]);
        session.apply_shortcut(Shortcut::NextImage).unwrap();
        let id = session.apply_shortcut(Shortcut::AddRegion).unwrap().unwrap();

        assert!(!session.has_regions(0).unwrap());
        assert_eq!(session.regions(1).unwrap()[0].id, id);
    }

    #[test]
    fn test_zoom_steps_and_fit() {
        let mut session = session_with(vec![png_file("a.png", 400, 200)]);
        session.zoom_in();
        assert!((session.viewport().zoom() - 1.1).abs() < 1e-12);
        session.zoom_out();
        assert!((session.viewport().zoom() - 0.99).abs() < 1e-12);

        session.viewport_mut().set_container(200.0, 200.0);
        session.fit_active();
        assert_eq!(session.viewport().zoom(), 0.5);
    }

    #[test]
    fn test_overview_size_and_pan() {
        let mut session = session_with(vec![png_file("a.png", 800, 600)]);
        session.viewport_mut().set_container(400.0, 300.0);
        assert_eq!(session.overview_size(), (200.0, 150.0));

        session.pan_by_overview(50.0, 0.0);
        assert_eq!(session.viewport().scroll(), (200.0, 0.0));
    }

    #[test]
    fn test_export_job_snapshot() {
        let mut session = session_with(vec![png_file("a.png", 10, 10), png_file("b.png", 10, 10)]);
        assert!(session.export_job(0).unwrap().is_none());
        assert!(session.export_job(9).is_err());

        session.add_region(1).unwrap();
        let job = session.export_job(1).unwrap().unwrap();
        assert_eq!(job.file_name, "b.png");
        assert!(Arc::ptr_eq(&job.regions, session.regions(1).unwrap()));
        assert_eq!(session.batch_jobs().len(), 1);
    }

    #[test]
    fn test_two_images_only_second_has_region() {
        let mut session = session_with(vec![png_file("one.png", 40, 40), png_file("two.png", 40, 40)]);
        let id = session.add_region(1).unwrap();
        session.resize_region(id, 5.0, 5.0, 10.0, 10.0).unwrap();

        let export = BatchExport::new(session.batch_jobs(), Packaging::Individual, session.settings());
        let report = block_on(export.run()).unwrap();
        session.apply_export_report(&report);

        let ExportOutput::Files(files) = report.output else {
            panic!("expected files");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "two.png (cut 1).png");
        assert!(!session.is_exported(0).unwrap());
        assert!(session.is_exported(1).unwrap());
    }

    #[test]
    fn test_edit_during_export_keeps_flag_unset() {
        let mut session = session_with(vec![png_file("a.png", 40, 40)]);
        let id = session.add_region(0).unwrap();

        let export = BatchExport::new(session.batch_jobs(), Packaging::Individual, session.settings());
        // Edit lands while the run is in flight
        session.move_region(id, 1.0, 1.0).unwrap();
        let report = block_on(export.run()).unwrap();
        session.apply_export_report(&report);

        assert!(!session.is_exported(0).unwrap());
    }

    #[test]
    fn test_report_after_reload_is_ignored() {
        let mut session = session_with(vec![png_file("a.png", 40, 40)]);
        session.add_region(0).unwrap();
        let export = BatchExport::new(session.batch_jobs(), Packaging::Individual, session.settings());
        let report = block_on(export.run()).unwrap();

        session.load_files(vec![png_file("b.png", 40, 40)]);
        session.apply_export_report(&report);
        assert!(!session.is_exported(0).unwrap());
    }
}
