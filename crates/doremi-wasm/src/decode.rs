//! Photo decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, decode_to_working } from '@doremi/wasm';
//!
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const working = decode_to_working(source, 1000);
//! console.log(`Editing ${working.width}x${working.height} of ${source.width}x${source.height}`);
//! ```

use doremi_core::decode;
use wasm_bindgen::prelude::*;

use crate::editor_error;
use crate::types::{filter_from_u8, JsDecodedImage};

/// Decode a JPEG or PNG photo, applying EXIF orientation.
///
/// Throws an `Error` with code `IMAGE_UNREADABLE` when the bytes cannot be
/// decoded.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| editor_error(e.into()))
}

/// Downscale a photo to its working resolution for detection and editing.
#[wasm_bindgen]
pub fn decode_to_working(image: &JsDecodedImage, budget: u32) -> Result<JsDecodedImage, JsValue> {
    decode::to_working_resolution(&image.to_decoded(), budget)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| editor_error(e.into()))
}

/// Working-resolution size as `[width, height]`.
#[wasm_bindgen]
pub fn working_size(width: u32, height: u32, budget: u32) -> Vec<u32> {
    let (w, h) = decode::working_size(width, height, budget);
    vec![w, h]
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| editor_error(e.into()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid_bytes() {
        let err = decode_image(&[0x00, 0x01, 0x02]).err().unwrap();
        let code = js_sys::Reflect::get(&err, &"code".into()).unwrap();
        assert_eq!(code.as_string().as_deref(), Some("IMAGE_UNREADABLE"));
    }

    #[wasm_bindgen_test]
    fn test_decode_encoded_jpeg() {
        let jpeg = doremi_core::encode::encode_jpeg(&vec![90u8; 40 * 30 * 3], 40, 30, 90).unwrap();
        let img = decode_image(&jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[wasm_bindgen_test]
    fn test_decode_to_working() {
        let img = JsDecodedImage::new(30, 20, vec![0u8; 30 * 20 * 3]);
        let working = decode_to_working(&img, 10).unwrap();
        assert_eq!((working.width(), working.height()), (10, 7));
    }

    #[wasm_bindgen_test]
    fn test_resize_zero_is_error() {
        let img = JsDecodedImage::new(2, 2, vec![0u8; 12]);
        assert!(resize(&img, 0, 1, 1).is_err());
    }
}
