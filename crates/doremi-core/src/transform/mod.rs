//! Cover orientation text and display/image coordinate mapping.
//!
//! Every cover carries a textual transform used by the renderer
//! (`rotate(<r>rad) scaleX(-1)`). The text is always derived from the
//! cover's rotation and mirror flag, never edited directly. Session data
//! coming from outside only carries the text, so [`parse_transform`]
//! recovers the orientation from it once on import.
//!
//! # Coordinate System
//!
//! - Image space: working-resolution pixels, origin top-left
//! - Display space: on-screen pixels relative to the editor container
//! - Rotation angles are in radians, positive = clockwise on screen

mod display;
mod text;

pub use display::DisplayMapping;
pub use text::{derive_transform_text, parse_transform, Orientation, NO_TRANSFORM};
