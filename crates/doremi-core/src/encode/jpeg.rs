//! JPEG output of the flattened composite.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("RGB buffer holds {actual} bytes, {expected} needed")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Cannot encode a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("JPEG encoder: {0}")]
    EncodingFailed(String),
}

/// Encode row-major RGB pixels as JPEG.
///
/// `quality` is clamped to 1..=100. The editor exports at 95 unless
/// configured otherwise.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::with_capacity(expected / 8));
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out.into_inner())
}

/// Encode a decoded image as JPEG.
pub fn encode_image(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, quality)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any quality byte encodes a well-formed JPEG once clamped.
        #[test]
        fn prop_any_quality_encodes(
            (width, height) in (1u32..=24, 1u32..=24),
            quality in any::<u8>(),
            shade in any::<u8>(),
        ) {
            let pixels = vec![shade; width as usize * height as usize * 3];
            let jpeg = encode_jpeg(&pixels, width, height, quality);
            prop_assert!(jpeg.is_ok());
            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        }

        /// Property: a buffer of the wrong length is always rejected.
        #[test]
        fn prop_wrong_length_rejected(
            (width, height) in (1u32..=24, 1u32..=24),
            delta in 1usize..10,
            longer in any::<bool>(),
        ) {
            let expected = width as usize * height as usize * 3;
            let len = if longer { expected + delta } else { expected.saturating_sub(delta) };
            let result = encode_jpeg(&vec![0u8; len], width, height, 90);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "expected InvalidPixelData"
            );
        }
    }
}
