//! Pixel buffers produced by decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a JPEG or PNG.
    #[error("Unrecognized image format")]
    InvalidFormat,

    /// The format was recognized but the data could not be decoded.
    #[error("Image data could not be decoded: {0}")]
    CorruptedFile(String),

    /// Requested or decoded dimensions are unusable.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Resampling used by `resize`. Working copies use `Bilinear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Nearest,
    #[default]
    Bilinear,
    Lanczos3,
}

impl FilterType {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType as Resample;
        match self {
            Self::Nearest => Resample::Nearest,
            Self::Bilinear => Resample::Triangle,
            Self::Lanczos3 => Resample::Lanczos3,
        }
    }
}

/// A decoded photo with RGB pixel data.
///
/// Used both for the full-resolution source (export) and for the working
/// copy handed to the detector.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB, 3 bytes per pixel.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        Self { width, height, pixels }
    }

    pub fn from_rgb_image(rgb: image::RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        Self::new(width, height, rgb.into_raw())
    }

    /// Copy into an `RgbImage`; `None` if the buffer does not fit the size.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() || self.width.min(self.height) == 0
    }
}

/// Cover artwork with straight (non-premultiplied) RGBA pixels.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Artwork {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self { width, height, pixels }
    }

    pub fn from_rgba_image(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self::new(width, height, rgba.into_raw())
    }

    /// RGBA of the pixel at (x, y), clamped to the edges.
    pub fn pixel_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() || self.width.min(self.height) == 0
    }
}
