//! Editing session bindings.
//!
//! `JsEditor` wraps a core `Session`. The host renders covers from
//! `covers()`, hit-tests pointer presses itself and reports what was hit.
//! Image loading is split around the host's asynchronous detector:
//!
//! ```typescript
//! const generation = editor.begin_load();
//! try {
//!   const source = decode_image(bytes);
//!   const working = decode_to_working(source, editor.working_pixel_budget);
//!   const detection = await detector.detect(working);
//!   const result = editor.finish_load(generation, working.width, working.height, detection);
//!   if (result.status === 'stale') return;
//! } catch (e) {
//!   editor.fail_load(generation, e.code ?? 'DETECTION_FAILED', String(e.message ?? e));
//! }
//! ```
//!
//! Pointer coordinates are display pixels relative to the editor container;
//! call `set_display_size` whenever the container is laid out.

use doremi_core::{
    ArtworkSet, Corner, CoverId, CoverRecord, Detection, EditorConfig, EditorError, LoadOutcome,
    LoadTicket, Phase, Point, PointerTarget, Session, SessionData,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::derive::parse_kind;
use crate::types::{JsArtwork, JsDecodedImage};
use crate::{editor_error, invalid_data};

/// One cover as seen from JavaScript.
#[derive(Serialize)]
struct CoverView<'a> {
    id: u64,
    selected: bool,
    #[serde(flatten)]
    record: &'a CoverRecord,
}

/// Result of `finish_load`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum LoadResult {
    Ready { covers: usize },
    Stale,
}

impl From<LoadOutcome> for LoadResult {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Ready { covers } => LoadResult::Ready { covers },
            LoadOutcome::Stale => LoadResult::Stale,
        }
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading { .. } => "loading",
        Phase::Ready => "ready",
        Phase::Exporting => "exporting",
    }
}

/// Map a host-side load failure to an editor error.
fn load_failure(code: &str, message: String) -> EditorError {
    match code {
        "IMAGE_UNREADABLE" => EditorError::ImageUnreadable(message),
        _ => EditorError::Detection(message),
    }
}

/// Build a pointer target from the host's hit-test result.
///
/// `kind` is `empty`, `cover`, `resize` or `rotate`. `resize` needs a
/// `corner` (`topleft`, `top-right`, ...).
fn parse_target(kind: &str, id: Option<f64>, corner: Option<&str>) -> Result<PointerTarget, String> {
    let cover_id = || {
        id.filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| CoverId(v as u64))
            .ok_or_else(|| format!("pointer target `{kind}` needs a cover id"))
    };
    match kind {
        "empty" => Ok(PointerTarget::Empty),
        "cover" => Ok(PointerTarget::Cover(cover_id()?)),
        "resize" => {
            let corner = corner
                .and_then(Corner::from_name)
                .ok_or_else(|| format!("invalid resize corner: {corner:?}"))?;
            Ok(PointerTarget::ResizeHandle(cover_id()?, corner))
        }
        "rotate" => Ok(PointerTarget::RotateHandle(cover_id()?)),
        other => Err(format!("unknown pointer target: {other}")),
    }
}

fn parse_config(config: JsValue) -> Result<EditorConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| invalid_data(format!("config: {e}")))
}

/// Serialize to plain JS objects; flattened structs would otherwise become `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Interactive cover editor.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Session,
    artworks: ArtworkSet,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor. `config` is an optional partial `EditorConfig`
    /// (`{ maxCovers, newCoverScale, defaultKind, workingPixelBudget, exportQuality }`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        Ok(Self {
            inner: Session::new(parse_config(config)?),
            artworks: ArtworkSet::new(),
        })
    }

    /// Create a ready editor from exchanged session data.
    pub fn from_data(data: JsValue, config: JsValue) -> Result<JsEditor, JsValue> {
        let data: SessionData =
            serde_wasm_bindgen::from_value(data).map_err(|e| invalid_data(format!("data: {e}")))?;
        let inner = Session::from_data(data, parse_config(config)?).map_err(editor_error)?;
        Ok(Self {
            inner,
            artworks: ArtworkSet::new(),
        })
    }

    /// `idle`, `loading`, `ready` or `exporting`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.phase()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.inner.is_busy()
    }

    #[wasm_bindgen(getter)]
    pub fn working_pixel_budget(&self) -> u32 {
        self.inner.config().working_pixel_budget
    }

    /// Working-resolution `[width, height]` of the loaded image, if any.
    pub fn image_size(&self) -> Option<Vec<u32>> {
        self.inner.image_size().map(|(w, h)| vec![w, h])
    }

    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.inner.set_display_size(width, height);
    }

    // Loading

    /// Start a load; returns its generation.
    pub fn begin_load(&mut self) -> f64 {
        self.inner.begin_load().generation() as f64
    }

    /// Finish a load with detector output `{ faces, eyes }`.
    ///
    /// Returns `{ status: 'ready', covers }` or `{ status: 'stale' }`.
    /// Throws `FACE_NOT_FOUND` when nothing could be derived; the editor is
    /// still ready for manual covers in that case.
    pub fn finish_load(
        &mut self,
        generation: f64,
        width: u32,
        height: u32,
        detection: JsValue,
    ) -> Result<JsValue, JsValue> {
        let detection: Detection = if detection.is_undefined() || detection.is_null() {
            Detection::default()
        } else {
            serde_wasm_bindgen::from_value(detection)
                .map_err(|e| invalid_data(format!("detection: {e}")))?
        };
        let ticket = LoadTicket::from_generation(generation as u64);
        let outcome = self
            .inner
            .finish_load(ticket, width, height, detection)
            .map_err(editor_error)?;
        to_js(&LoadResult::from(outcome))
    }

    /// Abort a load. Returns the error to surface, or `undefined` when the
    /// load was already superseded.
    pub fn fail_load(&mut self, generation: f64, code: &str, message: String) -> JsValue {
        let ticket = LoadTicket::from_generation(generation as u64);
        match self.inner.fail_load(ticket, load_failure(code, message)) {
            Some(e) => editor_error(e),
            None => JsValue::UNDEFINED,
        }
    }

    // Covers

    /// All covers in z-order:
    /// `[{ id, selected, type, transform, left, top, width, height, rotate, flip }]`.
    pub fn covers(&self) -> Result<JsValue, JsValue> {
        let selected = self.inner.selected();
        let records: Vec<(u64, bool, CoverRecord)> = self
            .inner
            .covers()
            .iter()
            .map(|e| (e.id.0, selected == Some(e.id), CoverRecord::from(&e.cover)))
            .collect();
        let views: Vec<CoverView<'_>> = records
            .iter()
            .map(|(id, selected, record)| CoverView {
                id: *id,
                selected: *selected,
                record,
            })
            .collect();
        to_js(&views)
    }

    /// Raw detector output of the current image.
    pub fn detection(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.detection())
    }

    pub fn selected(&self) -> Option<f64> {
        self.inner.selected().map(|id| id.0 as f64)
    }

    pub fn select(&mut self, id: f64) -> bool {
        self.inner.select(CoverId(id as u64))
    }

    pub fn deselect(&mut self) {
        self.inner.deselect();
    }

    /// Add a centered cover; returns its id, or `undefined` when busy, without
    /// an image, or at the cover cap.
    pub fn add_cover(&mut self) -> Option<f64> {
        self.inner.add_cover().map(|id| id.0 as f64)
    }

    /// Delete the selected cover.
    pub fn delete_cover(&mut self) -> bool {
        self.inner.delete_cover()
    }

    // Gestures

    /// Report a press. `target` is `empty`, `cover`, `resize` or `rotate`.
    pub fn pointer_down(
        &mut self,
        target: &str,
        id: Option<f64>,
        corner: Option<String>,
        x: f64,
        y: f64,
    ) -> Result<bool, JsValue> {
        let target = parse_target(target, id, corner.as_deref()).map_err(invalid_data)?;
        Ok(self.inner.pointer_down(target, Point::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    // Exchange

    pub fn import_data(&mut self, data: JsValue) -> Result<(), JsValue> {
        let data: SessionData =
            serde_wasm_bindgen::from_value(data).map_err(|e| invalid_data(format!("data: {e}")))?;
        self.inner.import_data(data).map_err(editor_error)
    }

    pub fn to_data(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_data())
    }

    // Export

    /// Register artwork for a cover kind (`doremi` or `koishi`).
    pub fn set_artwork(&mut self, kind: &str, artwork: &JsArtwork) -> Result<(), JsValue> {
        let kind = parse_kind(Some(kind.to_string()))?.unwrap_or_default();
        self.artworks.insert(kind, artwork.artwork().clone());
        Ok(())
    }

    /// Flatten the covers over the full-resolution `source` and encode JPEG.
    pub fn export_image(&mut self, source: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export(&source.to_decoded(), &self.artworks)
            .map_err(editor_error)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use doremi_core::Rect;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn error_code(err: &JsValue) -> Option<String> {
        js_sys::Reflect::get(err, &"code".into()).ok()?.as_string()
    }

    fn loaded_editor() -> JsEditor {
        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        let generation = editor.begin_load();
        let detection = serde_wasm_bindgen::to_value(&Detection::new(
            vec![Rect::new(10.0, 10.0, 40.0, 40.0)],
            vec![],
        ))
        .unwrap();
        editor.finish_load(generation, 100, 100, detection).unwrap();
        editor.set_display_size(100.0, 100.0);
        editor
    }

    #[wasm_bindgen_test]
    fn test_load_and_list_covers() {
        let editor = loaded_editor();
        assert_eq!(editor.phase(), "ready");
        let covers = js_sys::Array::from(&editor.covers().unwrap());
        assert_eq!(covers.length(), 1);
        let first = covers.get(0);
        let transform = js_sys::Reflect::get(&first, &"transform".into()).unwrap();
        assert_eq!(transform.as_string().as_deref(), Some("scaleX(-1)"));
    }

    #[wasm_bindgen_test]
    fn test_no_face_throws_code() {
        let mut editor = JsEditor::new(JsValue::NULL).unwrap();
        let generation = editor.begin_load();
        let err = editor
            .finish_load(generation, 10, 10, JsValue::UNDEFINED)
            .err()
            .unwrap();
        assert_eq!(error_code(&err).as_deref(), Some("FACE_NOT_FOUND"));
        assert!(editor.add_cover().is_some());
    }

    #[wasm_bindgen_test]
    fn test_stale_generation() {
        let mut editor = JsEditor::new(JsValue::UNDEFINED).unwrap();
        let old = editor.begin_load();
        editor.begin_load();
        let result = editor.finish_load(old, 10, 10, JsValue::UNDEFINED).unwrap();
        let status = js_sys::Reflect::get(&result, &"status".into()).unwrap();
        assert_eq!(status.as_string().as_deref(), Some("stale"));
        assert!(editor.fail_load(old, "DETECTION_FAILED", "late".into()).is_undefined());
        assert!(editor.busy());
    }

    #[wasm_bindgen_test]
    fn test_gesture_round_trip() {
        let mut editor = loaded_editor();
        let id = editor.add_cover().unwrap();
        assert!(editor.pointer_down("cover", Some(id), None, 30.0, 70.0).unwrap());
        editor.pointer_move(20.0, 20.0);
        editor.pointer_up();
        assert_eq!(editor.selected(), Some(id));
        assert!(editor.pointer_down("nowhere", None, None, 0.0, 0.0).is_err());
        assert!(editor.delete_cover());
    }

    #[wasm_bindgen_test]
    fn test_export_data_round_trip() {
        let editor = loaded_editor();
        let data = editor.to_data().unwrap();
        let copy = JsEditor::from_data(data, JsValue::UNDEFINED).unwrap();
        assert_eq!(copy.image_size(), Some(vec![100, 100]));
        assert_eq!(js_sys::Array::from(&copy.covers().unwrap()).length(), 1);
    }

    #[wasm_bindgen_test]
    fn test_export_image() {
        let mut editor = loaded_editor();
        let source = JsDecodedImage::new(200, 200, vec![255u8; 200 * 200 * 3]);
        let jpeg = editor.export_image(&source).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(editor.phase(), "ready");
    }
}
