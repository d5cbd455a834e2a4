//! Cut regions and their clamping against image bounds.
//!
//! # Coordinate System
//!
//! - Regions live in unscaled image-pixel space, origin top-left
//! - Positions may be negative or lie past the image edge; nothing is
//!   clamped while editing
//! - Width and height are never negative
//!
//! Clamping happens only at export time, through [`CutRegion::clamp_to_image`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-unique identifier of a cut region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cut-{}", self.0)
    }
}

/// An axis-aligned rectangle with floating point coordinates.
///
/// Used both for image-space geometry and for on-screen (zoomed) geometry;
/// [`crate::viewport::Viewport`] converts between the two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Multiply every component by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// A user-defined cut in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutRegion {
    pub id: RegionId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CutRegion {
    /// Create a region. Negative (or NaN) sizes are clamped to zero.
    pub fn new(id: RegionId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Same region with a new origin.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Same id with replaced geometry.
    pub fn reshaped(&self, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(self.id, x, y, width, height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Clamp the region to an image of `width x height` pixels.
    ///
    /// The four edges are rounded to whole pixels, so the output covers the
    /// cut's own pixel span. Then any overhang past the left/top edge shrinks
    /// the size and moves the origin to zero, and any overhang past the
    /// right/bottom edge is cut off.
    ///
    /// Returns `None` when nothing of the region overlaps the image.
    pub fn clamp_to_image(&self, image_width: u32, image_height: u32) -> Option<PixelRect> {
        let left = to_pixels(self.x).max(0);
        let top = to_pixels(self.y).max(0);
        let right = to_pixels(self.x + self.width).min(i64::from(image_width));
        let bottom = to_pixels(self.y + self.height).min(i64::from(image_height));

        if right <= left || bottom <= top {
            return None;
        }

        // 0 <= left < right <= image_w here, so everything fits u32
        Some(PixelRect {
            x: left as u32,
            y: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Integer pixel rectangle fully inside an image, never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Round to the nearest whole pixel, saturating on huge or NaN input.
fn to_pixels(value: f64) -> i64 {
    // `as` saturates for out-of-range floats and maps NaN to 0
    value.round() as i64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: regions fully inside the image keep their exact size.
        #[test]
        fn prop_inside_keeps_size(
            (img_w, img_h) in (1u32..=2000, 1u32..=2000),
            fx in 0.0f64..1.0, fy in 0.0f64..1.0,
            fw in 0.0f64..1.0, fh in 0.0f64..1.0,
        ) {
            let x = (fx * f64::from(img_w - 1)).floor();
            let y = (fy * f64::from(img_h - 1)).floor();
            let w = ((f64::from(img_w) - x) * fw).floor().max(1.0);
            let h = ((f64::from(img_h) - y) * fh).floor().max(1.0);

            let rect = CutRegion::new(RegionId(0), x, y, w, h).clamp_to_image(img_w, img_h).unwrap();
            prop_assert_eq!((rect.width, rect.height), (w as u32, h as u32));
            prop_assert_eq!((rect.x, rect.y), (x as u32, y as u32));
        }

        /// Property: clamped output equals the overlap with (0,0)-(W,H).
        #[test]
        fn prop_clamp_is_overlap(
            (img_w, img_h) in (1u32..=500, 1u32..=500),
            x in -600i64..=600, y in -600i64..=600,
            w in 0i64..=800, h in 0i64..=800,
        ) {
            let region = CutRegion::new(RegionId(0), x as f64, y as f64, w as f64, h as f64);
            let left = x.max(0);
            let top = y.max(0);
            let right = (x + w).min(i64::from(img_w));
            let bottom = (y + h).min(i64::from(img_h));

            match region.clamp_to_image(img_w, img_h) {
                Some(rect) => {
                    prop_assert_eq!(i64::from(rect.x), left);
                    prop_assert_eq!(i64::from(rect.y), top);
                    prop_assert_eq!(i64::from(rect.width), right - left);
                    prop_assert_eq!(i64::from(rect.height), bottom - top);
                    prop_assert!(rect.x + rect.width <= img_w);
                    prop_assert!(rect.y + rect.height <= img_h);
                }
                None => prop_assert!(right <= left || bottom <= top),
            }
        }
    }
}
