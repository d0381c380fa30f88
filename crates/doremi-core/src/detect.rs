//! Detector boundary.
//!
//! Face and eye detection is a black box to the editor. Implement
//! [`Detector`] to plug a backend in (a cascade classifier, a neural model,
//! or a host callback); an empty [`Detection`] is a successful result, not
//! an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rect;

/// Raw detector output for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub faces: Vec<Rect>,
    #[serde(default)]
    pub eyes: Vec<Rect>,
}

impl Detection {
    pub fn new(faces: Vec<Rect>, eyes: Vec<Rect>) -> Self {
        Self { faces, eyes }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.eyes.is_empty()
    }
}

/// Errors raised by a detection backend.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The backend could not be initialised (model or cascade missing).
    #[error("Detector unavailable: {0}")]
    Unavailable(String),

    /// The pixel buffer does not match the given dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The backend failed while running.
    #[error("Detection failed: {0}")]
    Failed(String),
}

/// Pluggable face and eye detection backend.
pub trait Detector {
    /// Detect faces and eyes in a row-major RGB buffer of `width` x `height`
    /// pixels.
    fn detect(&self, rgb: &[u8], width: u32, height: u32) -> Result<Detection, DetectError>;
}

/// Validate that an RGB buffer matches its dimensions.
pub fn check_rgb_len(rgb: &[u8], width: u32, height: u32) -> Result<(), DetectError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(DetectError::InvalidPixelData {
            expected,
            actual: rgb.len(),
        });
    }
    Ok(())
}
