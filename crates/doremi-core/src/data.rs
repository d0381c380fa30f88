//! Session exchange record.
//!
//! The shape hosts use to hand an editing session in and out:
//!
//! ```json
//! {
//!   "id": 0, "width": 800, "height": 600,
//!   "covers": [{ "type": "doremi", "transform": "rotate(0.1rad)",
//!                "left": 10, "top": 20, "width": 100, "height": 100 }],
//!   "eyes": [], "faces": []
//! }
//! ```
//!
//! Only `transform` is authoritative for orientation on import; `rotate`
//! and `flip` are written on export for hosts that want the decoded values.

use serde::{Deserialize, Serialize};

use crate::cover::{Cover, CoverKind};
use crate::geometry::{BBox, Rect};
use crate::transform::parse_transform;

/// Serialized cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverRecord {
    #[serde(rename = "type", default)]
    pub kind: CoverKind,
    #[serde(default)]
    pub transform: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip: Option<bool>,
}

impl CoverRecord {
    /// Rebuild a cover, recovering orientation from the transform text.
    pub fn to_cover(&self) -> Cover {
        Cover::new(
            self.kind,
            BBox::new(
                self.left,
                self.top,
                self.left + self.width,
                self.top + self.height,
            ),
            parse_transform(&self.transform),
        )
    }

    /// Whether the record describes a usable cover.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

impl From<&Cover> for CoverRecord {
    fn from(cover: &Cover) -> Self {
        Self {
            kind: cover.kind,
            transform: cover.transform_text().to_string(),
            left: cover.left,
            top: cover.top,
            width: cover.width,
            height: cover.height,
            rotate: Some(cover.rotation()),
            flip: Some(cover.mirrored()),
        }
    }
}

/// A whole editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub id: u64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub covers: Vec<CoverRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<Vec<Rect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<Rect>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_import_reverse_derives_orientation() {
        let json = r#"{
            "id": 3, "width": 200, "height": 100,
            "covers": [
                {"type": "doremi", "transform": "rotate(0.5rad) scaleX(-1)",
                 "left": 10, "top": 20, "width": 30, "height": 40},
                {"type": "koishi", "transform": "none",
                 "left": 0, "top": 0, "width": 5, "height": 5}
            ]
        }"#;
        let data: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(data.id, 3);
        assert!(data.eyes.is_none());

        let first = data.covers[0].to_cover();
        assert_eq!(first.rotation(), 0.5);
        assert!(first.mirrored());
        assert_eq!(first.transform_text(), "rotate(0.5rad) scaleX(-1)");
        assert_eq!(first.bbox(), BBox::new(10.0, 20.0, 40.0, 60.0));

        let second = data.covers[1].to_cover();
        assert_eq!(second.kind, CoverKind::Koishi);
        assert_eq!(second.rotation(), 0.0);
        assert!(!second.mirrored());
    }

    #[test]
    fn test_import_ignores_stale_rotate_field() {
        let record: CoverRecord = serde_json::from_str(
            r#"{"type":"doremi","transform":"rotate(0.25rad)","left":0,"top":0,
                "width":1,"height":1,"rotate":2.0,"flip":true}"#,
        )
        .unwrap();
        let cover = record.to_cover();
        assert_eq!(cover.rotation(), 0.25);
        assert!(!cover.mirrored());
    }

    #[test]
    fn test_export_writes_decoded_fields() {
        let mut cover = Cover::square(CoverKind::Doremi, Point::new(10.0, 10.0), 5.0);
        cover.set_rotation(-0.75);
        let record = CoverRecord::from(&cover);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "doremi");
        assert_eq!(json["transform"], "rotate(-0.75rad)");
        assert_eq!(json["rotate"], -0.75);
        assert_eq!(json["flip"], false);
        assert_eq!(record.to_cover(), cover);
    }

    #[test]
    fn test_record_validity() {
        let mut record = CoverRecord::from(&Cover::square(
            CoverKind::Doremi,
            Point::new(0.0, 0.0),
            1.0,
        ));
        assert!(record.is_valid());
        record.width = 0.0;
        assert!(!record.is_valid());
        record.width = f64::NAN;
        assert!(!record.is_valid());
    }
}
