//! Editor session bindings.
//!
//! `EditorSession` on the JS side wraps the core session in
//! `Rc<RefCell<_>>` so an export Promise can hand its report back to the
//! session once it resolves. The borrow is never held across an await.
//!
//! Pointer positions passed to the gesture methods are in canvas content
//! coordinates: screen pixels relative to the top-left of the zoomed image,
//! scroll offset already added.
//!
//! # Example
//!
//! ```typescript
//! import { EditorSession } from '@imagecut/wasm';
//!
//! const session = new EditorSession({ default_cut_size: 300 });
//! const report = session.load_files(await Promise.all(
//!   [...input.files].map(async (f) => ({
//!     name: f.name,
//!     type: f.type,
//!     bytes: new Uint8Array(await f.arrayBuffer()),
//!   })),
//! ));
//! report.rejected.forEach((name) => alert(`${name} is not an image`));
//!
//! const id = session.add_region(session.active_index);
//! const zip = await session.export_all((phase) => console.log(phase));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use imagecut_core::export::{BatchExport, BatchReport, ExportOutput, ExportPhase, Packaging};
use imagecut_core::gesture::{hit_test, DragHandle, Gesture};
use imagecut_core::session::{EditorSession, FileInput, Shortcut};
use imagecut_core::{RegionId, Settings};
use js_sys::{Array, Function, Object, Reflect, Uint8Array};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::types::js_error;

/// Summary of a loaded image for the host UI.
#[derive(Serialize)]
struct EntryInfo<'a> {
    name: &'a str,
    mime: &'a str,
    width: Option<u32>,
    height: Option<u32>,
    has_regions: bool,
    exported: bool,
}

/// The editor state of one page: images, cuts, viewport and gestures.
#[wasm_bindgen(js_name = EditorSession)]
pub struct JsEditorSession {
    inner: Rc<RefCell<EditorSession>>,
    gesture: Option<Gesture>,
}

#[wasm_bindgen(js_class = EditorSession)]
impl JsEditorSession {
    /// Create a session. `settings` may be omitted or partial.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<JsEditorSession, JsValue> {
        let settings: Settings = if settings.is_undefined() || settings.is_null() {
            Settings::default()
        } else {
            serde_wasm_bindgen::from_value(settings).map_err(js_error)?
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(EditorSession::new(settings))),
            gesture: None,
        })
    }

    /// Current settings as a plain object.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.borrow().settings()).map_err(js_error)
    }

    /// Replace the settings. Takes effect for the next cut and export.
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: Settings = serde_wasm_bindgen::from_value(settings).map_err(js_error)?;
        self.inner.borrow_mut().set_settings(settings);
        Ok(())
    }

    /// Replace the image set with `files`: an array of
    /// `{ name, type, bytes: Uint8Array }`.
    ///
    /// Returns `{ accepted, rejected: string[] }`.
    pub fn load_files(&mut self, files: Array) -> Result<JsValue, JsValue> {
        let inputs = files
            .iter()
            .map(|file| file_input_from_js(&file))
            .collect::<Result<Vec<_>, _>>()?;
        self.gesture = None;
        let report = self.inner.borrow_mut().load_files(inputs);
        serde_wasm_bindgen::to_value(&report).map_err(js_error)
    }

    /// `[{ name, mime, width, height, has_regions, exported }]` per image.
    pub fn entries(&self) -> Result<JsValue, JsValue> {
        let session = self.inner.borrow();
        let infos: Vec<EntryInfo> = session
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryInfo {
                name: &entry.name,
                mime: &entry.mime,
                width: entry.dimensions.map(|(w, _)| w),
                height: entry.dimensions.map(|(_, h)| h),
                has_regions: session.has_regions(index).unwrap_or(false),
                exported: session.is_exported(index).unwrap_or(false),
            })
            .collect();
        serde_wasm_bindgen::to_value(&infos).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn image_count(&self) -> usize {
        self.inner.borrow().entries().len()
    }

    #[wasm_bindgen(getter)]
    pub fn active_index(&self) -> usize {
        self.inner.borrow().active_index()
    }

    /// Cuts of an image as `[{ id, x, y, width, height }]` in image pixels.
    pub fn regions(&self, image_index: usize) -> Result<JsValue, JsValue> {
        let session = self.inner.borrow();
        let regions = session.regions(image_index).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&**regions).map_err(js_error)
    }

    pub fn is_exported(&self, image_index: usize) -> Result<bool, JsValue> {
        self.inner.borrow().is_exported(image_index).map_err(js_error)
    }

    pub fn has_regions(&self, image_index: usize) -> Result<bool, JsValue> {
        self.inner.borrow().has_regions(image_index).map_err(js_error)
    }

    pub fn has_regions_in_any_image(&self) -> bool {
        self.inner.borrow().has_regions_in_any_image()
    }

    /// Add a default-sized cut centered in view. Returns its id.
    pub fn add_region(&mut self, image_index: usize) -> Result<u32, JsValue> {
        let id = self
            .inner
            .borrow_mut()
            .add_region(image_index)
            .map_err(js_error)?;
        id_to_js(id)
    }

    pub fn move_region(&mut self, id: u32, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .move_region(RegionId(u64::from(id)), x, y)
            .map_err(js_error)
    }

    pub fn resize_region(
        &mut self,
        id: u32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .resize_region(RegionId(u64::from(id)), x, y, width, height)
            .map_err(js_error)
    }

    pub fn remove_region(&mut self, id: u32) -> Result<(), JsValue> {
        let id = RegionId(u64::from(id));
        if self.gesture.is_some_and(|gesture| gesture.region() == id) {
            self.gesture = None;
        }
        self.inner.borrow_mut().remove_region(id).map_err(js_error)
    }

    /// On-screen rectangle `{ x, y, width, height }` of a cut at the current zoom.
    pub fn screen_rect(&self, id: u32) -> Result<JsValue, JsValue> {
        let session = self.inner.borrow();
        let region = session
            .region(RegionId(u64::from(id)))
            .ok_or_else(|| JsValue::from_str(&format!("Unknown region cut-{id}")))?;
        let rect = session.viewport().to_screen(&region.rect());
        serde_wasm_bindgen::to_value(&rect).map_err(js_error)
    }

    /// Start a drag on a cut if the pointer is over it.
    ///
    /// Returns the grabbed handle (`"body"`, `"top"`, `"top-right"`, ...)
    /// or `undefined` when the pointer misses the cut.
    pub fn begin_gesture(
        &mut self,
        id: u32,
        x: f64,
        y: f64,
        tolerance: f64,
    ) -> Result<Option<String>, JsValue> {
        let session = self.inner.borrow();
        let region_id = RegionId(u64::from(id));
        let region = session
            .region(region_id)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown region {region_id}")))?;
        let viewport = session.viewport();
        let screen = viewport.to_screen(&region.rect());

        let Some(handle) = hit_test(&screen, x, y, tolerance) else {
            return Ok(None);
        };
        self.gesture = Some(Gesture::begin(
            region_id,
            handle,
            screen,
            (x, y),
            session.settings().min_cut_size,
            viewport,
        ));
        Ok(Some(handle_name(handle).to_string()))
    }

    /// Live on-screen rectangle of the cut being dragged, or `undefined`.
    pub fn update_gesture(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        match &self.gesture {
            Some(gesture) => serde_wasm_bindgen::to_value(&gesture.update((x, y))).map_err(js_error),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Finish the drag and store the result in image coordinates.
    pub fn finish_gesture(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        let edit = gesture.finish((x, y));
        self.inner
            .borrow_mut()
            .apply_edit(gesture.region(), edit)
            .map_err(js_error)
    }

    pub fn cancel_gesture(&mut self) {
        self.gesture = None;
    }

    pub fn next_image(&mut self) {
        self.inner.borrow_mut().next_image();
    }

    pub fn prev_image(&mut self) {
        self.inner.borrow_mut().prev_image();
    }

    pub fn select_image(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.borrow_mut().select_image(index).map_err(js_error)
    }

    /// Handle a `KeyboardEvent.key`. Returns `true` if the key was a
    /// shortcut, so the host can call `preventDefault()`.
    pub fn handle_key(&mut self, key: &str) -> Result<bool, JsValue> {
        let Some(shortcut) = Shortcut::from_key(key) else {
            return Ok(false);
        };
        self.inner
            .borrow_mut()
            .apply_shortcut(shortcut)
            .map_err(js_error)?;
        Ok(true)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.borrow().viewport().zoom()
    }

    // Zoom changes drop a live drag: its pointer coordinates were measured
    // at the old zoom.

    pub fn set_zoom(&mut self, zoom: f64) {
        self.gesture = None;
        self.inner.borrow_mut().viewport_mut().set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.gesture = None;
        self.inner.borrow_mut().zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.gesture = None;
        self.inner.borrow_mut().zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.gesture = None;
        self.inner.borrow_mut().viewport_mut().reset_zoom();
    }

    pub fn fit_to_container(&mut self) {
        self.gesture = None;
        self.inner.borrow_mut().fit_active();
    }

    /// Report the scroll container's client size.
    pub fn set_container(&mut self, width: f64, height: f64) {
        self.inner
            .borrow_mut()
            .viewport_mut()
            .set_container(width, height);
    }

    /// Report the scroll container's scroll offset.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.inner.borrow_mut().scroll_to(x, y);
    }

    /// `[scroll_left, scroll_top]` the host should apply.
    pub fn scroll(&self) -> Vec<f64> {
        let (x, y) = self.inner.borrow().viewport().scroll();
        vec![x, y]
    }

    /// Drag on the navigator overview by `(dx, dy)` overview pixels.
    pub fn pan_overview(&mut self, dx: f64, dy: f64) {
        self.inner.borrow_mut().pan_by_overview(dx, dy);
    }

    /// Where to draw the visible-area box on the overview.
    pub fn overview_rect(&self) -> Result<JsValue, JsValue> {
        let session = self.inner.borrow();
        let (width, height) = session.overview_size();
        let size = session
            .active_entry()
            .and_then(|entry| entry.dimensions)
            .unwrap_or((0, 0));
        let rect = session.viewport().overview_rect(width, height, size);
        serde_wasm_bindgen::to_value(&rect).map_err(js_error)
    }

    /// Export every cut of one image as separate PNG files.
    ///
    /// Resolves to `{ files: [{ name, bytes }], exported, failures, skipped }`.
    pub fn export_image(
        &self,
        image_index: usize,
        on_phase: Option<Function>,
    ) -> Result<js_sys::Promise, JsValue> {
        let job = self
            .inner
            .borrow()
            .export_job(image_index)
            .map_err(js_error)?;
        let jobs = job.into_iter().collect();
        Ok(self.spawn_export(jobs, Packaging::Individual, on_phase))
    }

    /// Export the cuts of all images into one zip archive.
    ///
    /// Resolves to `{ archive: { name, bytes }, exported, failures, skipped }`.
    pub fn export_all(&self, on_phase: Option<Function>) -> js_sys::Promise {
        let jobs = self.inner.borrow().batch_jobs();
        self.spawn_export(jobs, Packaging::Archive, on_phase)
    }
}

impl JsEditorSession {
    fn spawn_export(
        &self,
        jobs: Vec<imagecut_core::ExportJob>,
        packaging: Packaging,
        on_phase: Option<Function>,
    ) -> js_sys::Promise {
        let export = BatchExport::new(jobs, packaging, self.inner.borrow().settings());
        let session = Rc::clone(&self.inner);

        future_to_promise(async move {
            let report = export
                .run_with(|phase| {
                    if let Some(callback) = &on_phase {
                        if let Err(e) = callback.call1(&JsValue::NULL, &phase_name(phase).into()) {
                            log::warn!("Export phase callback failed: {e:?}");
                        }
                    }
                })
                .await
                .map_err(js_error)?;

            session.borrow_mut().apply_export_report(&report);
            report_to_js(report)
        })
    }
}

fn file_input_from_js(value: &JsValue) -> Result<FileInput, JsValue> {
    let field = |key: &str| Reflect::get(value, &JsValue::from_str(key));
    let name = field("name")?
        .as_string()
        .ok_or_else(|| JsValue::from_str("File entry is missing a name"))?;
    let mime = field("type")?.as_string().unwrap_or_default();
    let bytes = field("bytes")?;
    if !bytes.is_instance_of::<Uint8Array>() {
        return Err(JsValue::from_str(&format!("{name}: bytes must be a Uint8Array")));
    }
    Ok(FileInput {
        name,
        mime,
        bytes: Uint8Array::new(&bytes).to_vec(),
    })
}

fn report_to_js(report: BatchReport) -> Result<JsValue, JsValue> {
    let result = Object::new();

    match report.output {
        ExportOutput::Files(files) => {
            let list = Array::new();
            for file in files {
                list.push(&file_object(&file.name, &file.bytes)?);
            }
            Reflect::set(&result, &"files".into(), &list)?;
        }
        ExportOutput::Archive { name, bytes } => {
            Reflect::set(&result, &"archive".into(), &file_object(&name, &bytes)?)?;
        }
    }

    let exported = Array::new();
    for (index, _) in &report.exported {
        exported.push(&JsValue::from(*index as u32));
    }
    Reflect::set(&result, &"exported".into(), &exported)?;

    let failures = Array::new();
    for failure in &report.failures {
        let entry = Object::new();
        Reflect::set(&entry, &"index".into(), &JsValue::from(failure.image_index as u32))?;
        Reflect::set(&entry, &"name".into(), &JsValue::from_str(&failure.file_name))?;
        Reflect::set(&entry, &"error".into(), &JsValue::from_str(&failure.error.to_string()))?;
        failures.push(&entry);
    }
    Reflect::set(&result, &"failures".into(), &failures)?;
    Reflect::set(
        &result,
        &"skipped".into(),
        &JsValue::from(report.skipped_regions as u32),
    )?;

    Ok(result.into())
}

fn file_object(name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
    let file = Object::new();
    Reflect::set(&file, &"name".into(), &JsValue::from_str(name))?;
    Reflect::set(&file, &"bytes".into(), &Uint8Array::from(bytes))?;
    Ok(file.into())
}

fn id_to_js(id: RegionId) -> Result<u32, JsValue> {
    u32::try_from(id.0).map_err(|_| JsValue::from_str(&format!("Region id {id} exceeds u32")))
}

pub(crate) fn handle_name(handle: DragHandle) -> &'static str {
    match handle {
        DragHandle::Body => "body",
        DragHandle::Top => "top",
        DragHandle::Right => "right",
        DragHandle::Bottom => "bottom",
        DragHandle::Left => "left",
        DragHandle::TopRight => "top-right",
        DragHandle::BottomRight => "bottom-right",
        DragHandle::BottomLeft => "bottom-left",
    }
}

pub(crate) fn phase_name(phase: ExportPhase) -> &'static str {
    match phase {
        ExportPhase::Idle => "idle",
        ExportPhase::Decoding => "decoding",
        ExportPhase::Rasterizing => "rasterizing",
        ExportPhase::Packaging => "packaging",
        ExportPhase::Done => "done",
    }
}
