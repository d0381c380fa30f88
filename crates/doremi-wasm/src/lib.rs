//! Doremi WASM - WebAssembly bindings for the doremi cover editor
//!
//! This crate exposes doremi-core to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The editing session (`JsEditor`): loads, gestures, add/delete, export
//! - `derive` - Stateless cover derivation and transform text helpers
//! - `decode` - Photo decoding and working-resolution downscaling
//! - `export` - JPEG encoding
//! - `types` - WASM-compatible wrappers for image data
//! - `logger` - `log` output routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor, decode_image, decode_to_working } from '@doremi/wasm';
//!
//! await init();
//!
//! const editor = new JsEditor();
//! const generation = editor.begin_load();
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const working = decode_to_working(source, editor.working_pixel_budget);
//! const detection = await detect(working); // { faces: [...], eyes: [...] }
//! editor.finish_load(generation, working.width, working.height, detection);
//! ```
//!
//! # Errors
//!
//! Failures are thrown as JavaScript `Error` objects carrying a `code`
//! property (`IMAGE_UNREADABLE`, `FACE_NOT_FOUND`, `EXPORT_FAILED`, ...).

use doremi_core::EditorError;
use wasm_bindgen::prelude::*;

mod decode;
mod derive;
mod editor;
mod export;
mod logger;
mod types;

pub use decode::{decode_image, decode_to_working, resize, working_size};
pub use derive::{derive_covers, derive_transform_text, parse_transform};
pub use editor::JsEditor;
pub use export::{encode_jpeg, encode_jpeg_from_image};
pub use logger::set_log_level;
pub use types::{JsArtwork, JsDecodedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Build a JS `Error` with a machine-readable `code` property.
pub(crate) fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    err.into()
}

pub(crate) fn editor_error(e: EditorError) -> JsValue {
    make_error(e.code(), &e.to_string())
}

/// Error for malformed arguments coming from JavaScript.
pub(crate) fn invalid_data(message: impl std::fmt::Display) -> JsValue {
    editor_error(EditorError::InvalidData(message.to_string()))
}
