//! Zoom and scroll state, and the mapping between image and screen space.
//!
//! `screen = image * zoom` and `image = screen / zoom`. Stored cut geometry
//! is always in image space; only rendering and gesture interpretation go
//! through the zoom.

use serde::{Deserialize, Serialize};

use crate::region::Rect;

/// Smallest allowed zoom factor (10%).
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor (400%).
pub const MAX_ZOOM: f64 = 4.0;

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// The visible, zoomed and scrolled window onto the image canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    /// Scroll offset of the container, in screen pixels
    scroll_x: f64,
    scroll_y: f64,
    /// Size of the scroll container, in screen pixels
    container_width: f64,
    container_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            container_width: 0.0,
            container_height: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(container_width: f64, container_height: f64) -> Self {
        let mut viewport = Self::default();
        viewport.set_container(container_width, container_height);
        viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn scroll(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn container(&self) -> (f64, f64) {
        (self.container_width, self.container_height)
    }

    /// Set the zoom factor directly (clamped).
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = clamp_zoom(zoom);
        }
    }

    /// Multiply the zoom by `factor`, clamping the result.
    ///
    /// Non-finite and non-positive factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = clamp_zoom(self.zoom * factor);
        }
    }

    /// Back to 100%.
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Zoom so the whole image fits the container.
    ///
    /// Does nothing when either the image or the container has no area.
    pub fn fit_to(&mut self, image_width: u32, image_height: u32) {
        if image_width == 0
            || image_height == 0
            || self.container_width <= 0.0
            || self.container_height <= 0.0
        {
            return;
        }

        let width_ratio = self.container_width / f64::from(image_width);
        let height_ratio = self.container_height / f64::from(image_height);
        self.zoom = clamp_zoom(width_ratio.min(height_ratio));
    }

    /// Update the container size (screen pixels). Negative sizes become zero.
    pub fn set_container(&mut self, width: f64, height: f64) {
        self.container_width = width.max(0.0);
        self.container_height = height.max(0.0);
    }

    /// Scroll to an offset, clamped the way a scroll container clamps it.
    pub fn scroll_to(&mut self, x: f64, y: f64, image_size: (u32, u32)) {
        let (max_x, max_y) = self.max_scroll(image_size);
        self.scroll_x = x.clamp(0.0, max_x);
        self.scroll_y = y.clamp(0.0, max_y);
    }

    fn max_scroll(&self, (image_width, image_height): (u32, u32)) -> (f64, f64) {
        let content_w = f64::from(image_width) * self.zoom;
        let content_h = f64::from(image_height) * self.zoom;
        (
            (content_w - self.container_width).max(0.0),
            (content_h - self.container_height).max(0.0),
        )
    }

    /// Image-space rectangle to screen space.
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.scaled(self.zoom)
    }

    /// Screen-space rectangle to image space.
    pub fn to_image(&self, rect: &Rect) -> Rect {
        rect.scaled(1.0 / self.zoom)
    }

    /// The part of the image currently visible, in image space.
    pub fn visible_area(&self) -> Rect {
        Rect::new(
            self.scroll_x,
            self.scroll_y,
            self.container_width,
            self.container_height,
        )
        .scaled(1.0 / self.zoom)
    }

    /// Image-space center of the visible area.
    pub fn center(&self) -> (f64, f64) {
        let area = self.visible_area();
        (area.x + area.width / 2.0, area.y + area.height / 2.0)
    }

    /// Where the visible area sits on a downscaled overview of the image.
    pub fn overview_rect(
        &self,
        overview_width: f64,
        overview_height: f64,
        image_size: (u32, u32),
    ) -> Rect {
        let (image_width, image_height) = image_size;
        if image_width == 0 || image_height == 0 {
            return Rect::default();
        }
        let sx = overview_width / f64::from(image_width);
        let sy = overview_height / f64::from(image_height);
        let area = self.visible_area();
        Rect::new(area.x * sx, area.y * sy, area.width * sx, area.height * sy)
    }

    /// Scroll by a drag of `(dx, dy)` on the overview.
    ///
    /// Overview pixels map to image pixels by `image / overview`, and image
    /// pixels to scroll pixels by the zoom.
    pub fn pan_by_overview(
        &mut self,
        dx: f64,
        dy: f64,
        overview_width: f64,
        overview_height: f64,
        image_size: (u32, u32),
    ) {
        if overview_width <= 0.0 || overview_height <= 0.0 {
            return;
        }
        let (image_width, image_height) = image_size;
        let scale_x = f64::from(image_width) / overview_width;
        let scale_y = f64::from(image_height) / overview_height;
        self.scroll_to(
            self.scroll_x + dx * scale_x * self.zoom,
            self.scroll_y + dy * scale_y * self.zoom,
            image_size,
        );
    }
}
