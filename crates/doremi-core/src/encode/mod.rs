//! Export encoding.
//!
//! The flattened composite is written as JPEG with configurable quality.
//!
//! # Examples
//!
//! ```ignore
//! use doremi_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3];
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 95).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};
