//! Mapping between display space and image space.

use crate::geometry::Point;

/// Per-axis scale between the image and its on-screen rendering.
///
/// The host reports the rendered size of the editor container whenever it
/// changes; pointer positions arrive in that space and are mapped back into
/// image pixels before they touch cover geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayMapping {
    pub image_width: f64,
    pub image_height: f64,
    pub display_width: f64,
    pub display_height: f64,
}

impl DisplayMapping {
    pub fn new(image_width: f64, image_height: f64, display_width: f64, display_height: f64) -> Self {
        Self {
            image_width,
            image_height,
            display_width,
            display_height,
        }
    }

    /// Whether both spaces have a usable, non-zero size.
    pub fn is_valid(&self) -> bool {
        [
            self.image_width,
            self.image_height,
            self.display_width,
            self.display_height,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Display-per-image scale as `(x, y)`.
    pub fn scale(&self) -> Option<(f64, f64)> {
        self.is_valid().then(|| {
            (
                self.display_width / self.image_width,
                self.display_height / self.image_height,
            )
        })
    }

    /// Map a pointer position (relative to the container) into image space.
    pub fn to_image(&self, display: Point) -> Option<Point> {
        self.is_valid().then(|| {
            Point::new(
                display.x * self.image_width / self.display_width,
                display.y * self.image_height / self.display_height,
            )
        })
    }

    /// Map an image-space point to display space.
    pub fn to_display(&self, image: Point) -> Option<Point> {
        self.is_valid().then(|| {
            Point::new(
                self.display_width * image.x / self.image_width,
                self.display_height * image.y / self.image_height,
            )
        })
    }
}
