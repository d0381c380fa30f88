//! Cover placements.
//!
//! A cover is the artwork placed over one face: a box in image space plus a
//! rotation and a horizontal mirror about the box center. The renderer
//! consumes the cover's transform text, which is kept in lockstep with the
//! orientation fields by routing every orientation change through
//! [`Cover::set_orientation`].

use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point};
use crate::transform::{derive_transform_text, Orientation};

/// Artwork style of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverKind {
    #[default]
    Doremi,
    Koishi,
}

impl CoverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverKind::Doremi => "doremi",
            CoverKind::Koishi => "koishi",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "doremi" => Some(CoverKind::Doremi),
            "koishi" => Some(CoverKind::Koishi),
            _ => None,
        }
    }
}

/// Session-scoped identifier of a cover.
///
/// Ids are never reused within a session, so a stale id simply resolves to
/// no cover after a delete or reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoverId(pub u64);

/// An oriented cover placement in image space.
#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    pub kind: CoverKind,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    rotation: f64,
    mirrored: bool,
    transform_text: String,
}

impl Cover {
    pub fn new(kind: CoverKind, bbox: BBox, orientation: Orientation) -> Self {
        Self {
            kind,
            left: bbox.xmin,
            top: bbox.ymin,
            width: bbox.width(),
            height: bbox.height(),
            rotation: orientation.rotation,
            mirrored: orientation.mirrored,
            transform_text: orientation.to_text(),
        }
    }

    /// Square cover of side `2 * half_size` centered on `center`, unrotated.
    pub fn square(kind: CoverKind, center: Point, half_size: f64) -> Self {
        Self::new(
            kind,
            BBox::new(
                center.x - half_size,
                center.y - half_size,
                center.x + half_size,
                center.y + half_size,
            ),
            Orientation::default(),
        )
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.rotation, self.mirrored)
    }

    /// Renderer transform, always in sync with rotation and mirror.
    pub fn transform_text(&self) -> &str {
        &self.transform_text
    }

    /// Replace rotation and mirror together and re-derive the transform text.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.rotation = orientation.rotation;
        self.mirrored = orientation.mirrored;
        self.transform_text = derive_transform_text(self.rotation, self.mirrored);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.set_orientation(Orientation::new(rotation, self.mirrored));
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.set_orientation(Orientation::new(self.rotation, mirrored));
    }

    pub fn toggle_mirrored(&mut self) {
        self.set_mirrored(!self.mirrored);
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Move the cover so its center sits on `center`, keeping its size.
    pub fn center_on(&mut self, center: Point) {
        self.left = center.x - self.width / 2.0;
        self.top = center.y - self.height / 2.0;
    }
}

/// A cover owned by a session, tagged with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverEntry {
    pub id: CoverId,
    pub cover: Cover,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cover_takes_box_extents() {
        let cover = Cover::new(
            CoverKind::Doremi,
            BBox::new(10.0, 20.0, 50.0, 80.0),
            Orientation::default(),
        );
        assert_eq!(cover.left, 10.0);
        assert_eq!(cover.top, 20.0);
        assert_eq!(cover.width, 40.0);
        assert_eq!(cover.height, 60.0);
        assert_eq!(cover.transform_text(), "none");
    }

    #[test]
    fn test_setters_keep_text_in_sync() {
        let mut cover = Cover::square(CoverKind::Koishi, Point::new(50.0, 50.0), 10.0);
        cover.set_rotation(0.25);
        assert_eq!(cover.transform_text(), "rotate(0.25rad)");
        cover.toggle_mirrored();
        assert_eq!(cover.transform_text(), "rotate(0.25rad) scaleX(-1)");
        cover.set_rotation(0.0);
        assert_eq!(cover.transform_text(), "scaleX(-1)");
        cover.set_mirrored(false);
        assert_eq!(cover.transform_text(), "none");
    }

    #[test]
    fn test_square_is_centered() {
        let cover = Cover::square(CoverKind::Doremi, Point::new(100.0, 50.0), 20.0);
        assert_eq!(cover.bbox(), BBox::new(80.0, 30.0, 120.0, 70.0));
        assert_eq!(cover.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_center_on() {
        let mut cover = Cover::square(CoverKind::Doremi, Point::new(0.0, 0.0), 5.0);
        cover.center_on(Point::new(30.0, 40.0));
        assert_eq!(cover.left, 25.0);
        assert_eq!(cover.top, 35.0);
        assert_eq!(cover.width, 10.0);
    }

    #[test]
    fn test_kind_serde() {
        assert_eq!(serde_json::to_string(&CoverKind::Koishi).unwrap(), "\"koishi\"");
        let kind: CoverKind = serde_json::from_str("\"doremi\"").unwrap();
        assert_eq!(kind, CoverKind::Doremi);
    }

    #[test]
    fn test_kind_from_name() {
        for kind in [CoverKind::Doremi, CoverKind::Koishi] {
            assert_eq!(CoverKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(CoverKind::from_name("Doremi"), None);
    }
}
