//! Doremi Core - face cover editing library
//!
//! This crate provides the core functionality of the doremi cover editor:
//! deriving oriented cover placements from face and eye detections, the
//! interactive editing session (select, move, resize, rotate, add, delete),
//! image decoding at working resolution, and the flattened JPEG export.
//!
//! It has no JavaScript dependencies; `doremi-wasm` wraps it for browsers.
//!
//! ```ignore
//! use doremi_core::{decode, EditorConfig, Session};
//!
//! let photo = decode::decode_image(&bytes)?;
//! let working = decode::to_working_resolution(&photo, 1000)?;
//!
//! let mut session = Session::new(EditorConfig::default());
//! session.load_with(&my_detector, &working)?;
//! for entry in session.covers() {
//!     println!("{} at {},{}", entry.cover.transform_text(), entry.cover.left, entry.cover.top);
//! }
//! ```

pub mod composite;
pub mod config;
pub mod cover;
pub mod data;
pub mod decode;
pub mod derive;
pub mod detect;
pub mod editor;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod transform;

pub use composite::{composite_covers, ArtworkSet, CompositeError};
pub use config::EditorConfig;
pub use cover::{Cover, CoverEntry, CoverId, CoverKind};
pub use data::{CoverRecord, SessionData};
pub use derive::{derive_covers, CoverDeriver};
pub use detect::{Detection, DetectError, Detector};
pub use editor::{Corner, Drag, Gesture, LoadOutcome, LoadTicket, Phase, PointerTarget, Session};
pub use error::EditorError;
pub use geometry::{BBox, Point, Rect};
pub use transform::{derive_transform_text, parse_transform, DisplayMapping, Orientation};
