//! JPEG encoding WASM bindings.
//!
//! The editor's own export goes through `JsEditor.export_image`; these are
//! for hosts that composite or post-process on their side.

use doremi_core::encode;
use wasm_bindgen::prelude::*;

use crate::editor_error;
use crate::types::JsDecodedImage;

/// Encode RGB pixel data (3 bytes per pixel, row-major) as JPEG.
///
/// `quality` is clamped to 1-100. Throws `EXPORT_FAILED` when the buffer
/// does not match the dimensions.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| editor_error(e.into()))
}

/// Encode a decoded image as JPEG.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_decoded(), quality).map_err(|e| editor_error(e.into()))
}
