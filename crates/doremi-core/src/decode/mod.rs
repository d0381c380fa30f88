//! Image source for the editor.
//!
//! This module provides functionality for:
//! - Decoding photos (JPEG, PNG) with EXIF orientation applied
//! - Decoding cover artwork with its alpha channel
//! - Downscaling photos to the working resolution used for detection and
//!   editing
//!
//! # Architecture
//!
//! Decoding is designed to be called from the WASM bindings. All operations
//! are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use doremi_core::decode::{decode_image, to_working_resolution};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! let working = to_working_resolution(&source, 1000).unwrap();
//! println!("Editing at {}x{}", working.width, working.height);
//! ```

mod resize;
mod source;
mod types;

pub use resize::{resize, to_working_resolution, working_size};
pub use source::{decode_artwork, decode_image};
pub use types::{Artwork, DecodeError, DecodedImage, FilterType};
