//! Session-level error kinds.
//!
//! All of these are recoverable: the session stays usable after any of
//! them. Gesture problems (stale selection, zero-sized display) are not
//! errors at all; those calls are silent no-ops.

use thiserror::Error;

use crate::composite::CompositeError;
use crate::decode::DecodeError;
use crate::detect::DetectError;
use crate::encode::EncodeError;

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    /// The source image could not be decoded.
    #[error("Unable to read image: {0}")]
    ImageUnreadable(String),

    /// Detection succeeded but produced no covers.
    #[error("No face found")]
    FaceNotFound,

    /// The detection backend failed.
    #[error("Face detection failed: {0}")]
    Detection(String),

    /// Compositing or encoding could not produce output.
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// A load or export is in progress.
    #[error("Editor is busy")]
    Busy,

    /// No image has been loaded yet.
    #[error("No image loaded")]
    NoImage,

    /// Imported session data is malformed.
    #[error("Invalid session data: {0}")]
    InvalidData(String),
}

impl EditorError {
    /// Machine-readable code for host applications.
    pub fn code(&self) -> &'static str {
        match self {
            EditorError::ImageUnreadable(_) => "IMAGE_UNREADABLE",
            EditorError::FaceNotFound => "FACE_NOT_FOUND",
            EditorError::Detection(_) => "DETECTION_FAILED",
            EditorError::ExportFailed(_) => "EXPORT_FAILED",
            EditorError::Busy => "BUSY",
            EditorError::NoImage => "NO_IMAGE",
            EditorError::InvalidData(_) => "INVALID_DATA",
        }
    }
}

impl From<DecodeError> for EditorError {
    fn from(e: DecodeError) -> Self {
        EditorError::ImageUnreadable(e.to_string())
    }
}

impl From<EncodeError> for EditorError {
    fn from(e: EncodeError) -> Self {
        EditorError::ExportFailed(e.to_string())
    }
}

impl From<CompositeError> for EditorError {
    fn from(e: CompositeError) -> Self {
        EditorError::ExportFailed(e.to_string())
    }
}

impl From<DetectError> for EditorError {
    fn from(e: DetectError) -> Self {
        EditorError::Detection(e.to_string())
    }
}
