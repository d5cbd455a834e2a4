//! Pointer gestures on a cut: dragging the body or one of its handles.
//!
//! Gestures run in screen space, where the pointer lives. When the gesture
//! finishes, the resulting rectangle goes through the inverse mapping of the
//! viewport the gesture began under, so the session only ever stores
//! image-space geometry and a zoom change mid-drag cannot move a cut.

use serde::{Deserialize, Serialize};

use crate::region::{Rect, RegionId};
use crate::viewport::Viewport;

/// The part of a cut being dragged.
///
/// There is no top-left handle: that corner holds the remove button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragHandle {
    /// Move the whole cut
    Body,
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl DragHandle {
    /// Corners first so they win over the edges they touch.
    const HIT_ORDER: [DragHandle; 7] = [
        DragHandle::TopRight,
        DragHandle::BottomRight,
        DragHandle::BottomLeft,
        DragHandle::Top,
        DragHandle::Right,
        DragHandle::Bottom,
        DragHandle::Left,
    ];

    fn moves_left(self) -> bool {
        matches!(self, DragHandle::Left | DragHandle::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            DragHandle::Right | DragHandle::TopRight | DragHandle::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(self, DragHandle::Top | DragHandle::TopRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            DragHandle::Bottom | DragHandle::BottomRight | DragHandle::BottomLeft
        )
    }

    fn is_near(self, rect: &Rect, px: f64, py: f64, tolerance: f64) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= tolerance;
        let within_x = px >= rect.x - tolerance && px <= rect.right() + tolerance;
        let within_y = py >= rect.y - tolerance && py <= rect.bottom() + tolerance;

        match self {
            DragHandle::Body => rect.contains(px, py),
            DragHandle::Top => near(py, rect.y) && within_x,
            DragHandle::Bottom => near(py, rect.bottom()) && within_x,
            DragHandle::Left => near(px, rect.x) && within_y,
            DragHandle::Right => near(px, rect.right()) && within_y,
            DragHandle::TopRight => near(px, rect.right()) && near(py, rect.y),
            DragHandle::BottomRight => near(px, rect.right()) && near(py, rect.bottom()),
            DragHandle::BottomLeft => near(px, rect.x) && near(py, rect.bottom()),
        }
    }
}

/// Find which handle of an on-screen cut is under the pointer.
///
/// Corners win over edges, edges over the body. The top-left corner falls
/// through to the top/left edge.
pub fn hit_test(screen_rect: &Rect, px: f64, py: f64, tolerance: f64) -> Option<DragHandle> {
    DragHandle::HIT_ORDER
        .into_iter()
        .find(|handle| handle.is_near(screen_rect, px, py, tolerance))
        .or_else(|| {
            DragHandle::Body
                .is_near(screen_rect, px, py, tolerance)
                .then_some(DragHandle::Body)
        })
}

/// Mutation produced by a finished gesture, in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RegionEdit {
    Move {
        x: f64,
        y: f64,
    },
    Resize {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// An in-progress drag on one cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    region: RegionId,
    handle: DragHandle,
    start_rect: Rect,
    start_pointer: (f64, f64),
    /// Minimum width/height in screen pixels
    min_size: f64,
    /// Viewport in effect when the drag started
    viewport: Viewport,
}

impl Gesture {
    /// Start dragging `handle` of a cut currently drawn at `screen_rect`.
    ///
    /// `min_size` is the smallest allowed size in image pixels; it is
    /// converted to screen pixels with the viewport's zoom.
    pub fn begin(
        region: RegionId,
        handle: DragHandle,
        screen_rect: Rect,
        pointer: (f64, f64),
        min_size: f64,
        viewport: &Viewport,
    ) -> Self {
        Self {
            region,
            handle,
            start_rect: screen_rect,
            start_pointer: pointer,
            min_size: min_size.max(0.0) * viewport.zoom(),
            viewport: *viewport,
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn handle(&self) -> DragHandle {
        self.handle
    }

    /// Screen rectangle for the current pointer position.
    ///
    /// The edges not attached to the handle stay where they were; a
    /// dragged edge stops `min_size` away from the opposite one.
    pub fn update(&self, pointer: (f64, f64)) -> Rect {
        let dx = pointer.0 - self.start_pointer.0;
        let dy = pointer.1 - self.start_pointer.1;
        let start = self.start_rect;

        if self.handle == DragHandle::Body {
            return Rect::new(start.x + dx, start.y + dy, start.width, start.height);
        }

        let mut left = start.x;
        let mut top = start.y;
        let mut right = start.right();
        let mut bottom = start.bottom();

        if self.handle.moves_left() {
            left = (left + dx).min(right - self.min_size);
        }
        if self.handle.moves_right() {
            right = (right + dx).max(left + self.min_size);
        }
        if self.handle.moves_top() {
            top = (top + dy).min(bottom - self.min_size);
        }
        if self.handle.moves_bottom() {
            bottom = (bottom + dy).max(top + self.min_size);
        }

        Rect::new(left, top, right - left, bottom - top)
    }

    /// Zoom the screen coordinates of this gesture are measured at.
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Finish the drag and express the result in image-pixel space.
    pub fn finish(self, pointer: (f64, f64)) -> RegionEdit {
        let image = self.viewport.to_image(&self.update(pointer));
        match self.handle {
            DragHandle::Body => RegionEdit::Move {
                x: image.x,
                y: image.y,
            },
            _ => RegionEdit::Resize {
                x: image.x,
                y: image.y,
                width: image.width,
                height: image.height,
            },
        }
    }
}
