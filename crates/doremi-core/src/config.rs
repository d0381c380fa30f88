//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::cover::CoverKind;

/// Tunables of an editing session.
///
/// Every field has a default so hosts can pass a partial object (or none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Hard cap on the number of covers `add_cover` will create
    pub max_covers: usize,
    /// Half-side of a newly added cover relative to the longest image edge
    pub new_cover_scale: f64,
    /// Kind used for derived and added covers
    pub default_kind: CoverKind,
    /// Working resolution budget: images are downscaled by
    /// `ceil(sqrt(w * h) / budget)` before detection and editing
    pub working_pixel_budget: u32,
    /// JPEG quality of exported images (1-100)
    pub export_quality: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_covers: 20,
            new_cover_scale: 0.1,
            default_kind: CoverKind::Doremi,
            working_pixel_budget: 1000,
            export_quality: 95,
        }
    }
}
