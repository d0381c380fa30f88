//! Stateless derivation bindings.
//!
//! For hosts that keep their own cover state and only want the placement
//! math. `JsEditor` runs the same derivation on `finish_load`.

use doremi_core::{CoverDeriver, CoverKind, CoverRecord, Rect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::invalid_data;

/// Orientation as seen from JavaScript.
#[derive(Serialize)]
struct OrientationJs {
    rotation: f64,
    mirrored: bool,
}

/// Parse an optional cover kind name (`doremi` or `koishi`).
pub(crate) fn parse_kind(kind: Option<String>) -> Result<Option<CoverKind>, JsValue> {
    match kind.as_deref() {
        None => Ok(None),
        Some(name) => CoverKind::from_name(name)
            .map(Some)
            .ok_or_else(|| invalid_data(format!("unknown cover kind: {name}"))),
    }
}

fn parse_rects(value: JsValue, what: &str) -> Result<Vec<Rect>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| invalid_data(format!("{what}: {e}")))
}

/// Derive cover placements from detector rectangles.
///
/// `faces` and `eyes` are arrays of `{x, y, width, height}`. Returns an
/// array of `{type, transform, left, top, width, height, rotate, flip}`.
#[wasm_bindgen]
pub fn derive_covers(
    faces: JsValue,
    eyes: JsValue,
    width: f64,
    height: f64,
    kind: Option<String>,
) -> Result<JsValue, JsValue> {
    let faces = parse_rects(faces, "faces")?;
    let eyes = parse_rects(eyes, "eyes")?;
    let deriver = CoverDeriver::new(parse_kind(kind)?.unwrap_or_default());

    let records: Vec<CoverRecord> = deriver
        .derive(&faces, &eyes, width, height)
        .iter()
        .map(CoverRecord::from)
        .collect();
    serde_wasm_bindgen::to_value(&records).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Canonical transform text for a rotation (radians) and mirror flag.
#[wasm_bindgen]
pub fn derive_transform_text(rotation: f64, mirrored: bool) -> String {
    doremi_core::derive_transform_text(rotation, mirrored)
}

/// Recover `{rotation, mirrored}` from transform text.
#[wasm_bindgen]
pub fn parse_transform(text: &str) -> Result<JsValue, JsValue> {
    let orientation = doremi_core::parse_transform(text);
    serde_wasm_bindgen::to_value(&OrientationJs {
        rotation: orientation.rotation,
        mirrored: orientation.mirrored,
    })
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
