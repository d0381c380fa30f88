//! Planar geometry used by cover derivation.
//!
//! Detector output arrives as [`Rect`] (origin + size). Derivation works on
//! [`BBox`] (min/max corners) and, for the leftover eye pairing, on the
//! polygon form of each box so that the distance between two boxes is the
//! true minimum distance between their outlines rather than a center
//! distance.
//!
//! # Coordinate System
//!
//! - Pixel units, origin at the top-left corner
//! - x grows to the right, y grows downward

mod bbox;
mod polygon;

pub use bbox::BBox;
pub use polygon::{Point, Polygon, Segment};

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle as produced by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (pixels)
    pub x: f64,
    /// Top edge (pixels)
    pub y: f64,
    /// Width (pixels, non-negative)
    pub width: f64,
    /// Height (pixels, non-negative)
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

    /// Convert to min/max form.
    pub fn to_bbox(self) -> BBox {
        BBox::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for BBox {
    fn from(rect: Rect) -> Self {
        rect.to_bbox()
    }
}
