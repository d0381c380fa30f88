//! Pointer gestures on covers.
//!
//! Mouse and touch input arrive as the same three calls: press
//! ([`Session::pointer_down`]), move ([`Session::pointer_move`]) and release
//! ([`Session::pointer_up`]). The host hit-tests the press and reports what
//! was under the pointer as a [`PointerTarget`]; positions are relative to
//! the editor container, in display pixels.
//!
//! # States
//!
//! ```text
//! Unselected --press cover--> Selected
//! Selected --press body--> Moving --release--> Selected
//! Selected --press corner--> Resizing --release--> Selected
//! Selected --press rotate handle--> Rotating --release--> Selected
//! any --press empty area--> Unselected
//! ```
//!
//! Every gesture applies the press position immediately, so a move snaps
//! the cover center to the pointer on the first event.

use std::f64::consts::FRAC_PI_2;

use log::debug;

use crate::cover::{Cover, CoverId};
use crate::geometry::Point;

use super::Session;

/// Smallest half-side a resize can shrink a cover to, in image pixels.
const MIN_HALF_SIZE: f64 = 0.5;

/// Resize handle position on the unrotated cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// The same corner seen in a horizontal mirror.
    pub fn mirrored(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::TopRight,
            Corner::TopRight => Corner::TopLeft,
            Corner::BottomRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::BottomRight,
        }
    }

    /// Parse the handle names used by renderers (`topleft`, `top-left`, ...).
    pub fn from_name(name: &str) -> Option<Corner> {
        match name.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "topleft" => Some(Corner::TopLeft),
            "topright" => Some(Corner::TopRight),
            "bottomright" => Some(Corner::BottomRight),
            "bottomleft" => Some(Corner::BottomLeft),
            _ => None,
        }
    }
}

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Background, outside every cover
    Empty,
    /// The body of a cover
    Cover(CoverId),
    /// One of the four resize handles of a cover
    ResizeHandle(CoverId, Corner),
    /// The rotate handle of a cover
    RotateHandle(CoverId),
}

/// Gesture in progress on the selected cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Moving,
    /// `anchor` is the cover center when the gesture started, in image space.
    /// `corner` is relabeled when the drag crosses the anchor horizontally.
    Resizing { corner: Corner, anchor: Point },
    Rotating,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct ActiveGesture {
    id: CoverId,
    gesture: Gesture,
}

impl Session {
    /// The gesture in progress and the cover it acts on.
    pub fn active_gesture(&self) -> Option<(CoverId, Gesture)> {
        self.gesture.map(|g| (g.id, g.gesture))
    }

    /// Handle a press. Returns whether the session reacted.
    ///
    /// Pressing an unselected cover selects it; pressing the selected cover
    /// (or one of its handles) starts a gesture. Handles of unselected
    /// covers are ignored.
    pub fn pointer_down(&mut self, target: PointerTarget, position: Point) -> bool {
        if self.is_busy() {
            return false;
        }
        self.gesture = None;

        let (id, gesture) = match target {
            PointerTarget::Empty => {
                self.deselect();
                return true;
            }
            PointerTarget::Cover(id) => {
                if self.selected() != Some(id) {
                    return self.select(id);
                }
                (id, Gesture::Moving)
            }
            PointerTarget::ResizeHandle(id, corner) => {
                let Some(cover) = self.cover(id).filter(|_| self.selected() == Some(id)) else {
                    return false;
                };
                let anchor = cover.center();
                (id, Gesture::Resizing { corner, anchor })
            }
            PointerTarget::RotateHandle(id) => {
                if self.selected() != Some(id) {
                    return false;
                }
                (id, Gesture::Rotating)
            }
        };

        debug!("cover {}: {:?} started", id.0, gesture);
        self.gesture = Some(ActiveGesture { id, gesture });
        self.pointer_move(position);
        true
    }

    /// Apply the gesture in progress to a pointer position.
    pub fn pointer_move(&mut self, position: Point) {
        if self.is_busy() {
            return;
        }
        let Some(mut active) = self.gesture else {
            return;
        };
        let Some(mapping) = self.mapping() else {
            return;
        };
        let Some(image_pos) = mapping.to_image(position) else {
            return;
        };
        let Some(cover) = self.cover_mut(active.id) else {
            self.gesture = None;
            return;
        };

        match &mut active.gesture {
            Gesture::Moving => cover.center_on(image_pos),
            Gesture::Resizing { corner, anchor } => resize_from_anchor(cover, corner, *anchor, image_pos),
            Gesture::Rotating => {
                if let Some(center) = mapping.to_display(cover.center()) {
                    cover.set_rotation(rotation_towards(center, position));
                }
            }
        }

        self.gesture = Some(active);
    }

    /// End the gesture in progress; the selection is kept.
    pub fn pointer_up(&mut self) {
        if let Some(active) = self.gesture.take() {
            debug!("cover {}: {:?} ended", active.id.0, active.gesture);
        }
    }

    /// Start a gesture scoped to the returned guard.
    ///
    /// The guard forwards moves and ends the gesture when dropped, so a
    /// gesture cannot outlive the code driving it. Returns `None` when the
    /// press did not start a gesture (for example, it only selected).
    pub fn drag(&mut self, target: PointerTarget, position: Point) -> Option<Drag<'_>> {
        if self.pointer_down(target, position) && self.gesture.is_some() {
            Some(Drag { session: self })
        } else {
            None
        }
    }
}

/// Scoped gesture. See [`Session::drag`].
#[derive(Debug)]
pub struct Drag<'a> {
    session: &'a mut Session,
}

impl Drag<'_> {
    pub fn move_to(&mut self, position: Point) {
        self.session.pointer_move(position);
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.session.active_gesture().map(|(_, g)| g)
    }

    pub fn cover(&self) -> Option<&Cover> {
        let (id, _) = self.session.active_gesture()?;
        self.session.cover(id)
    }
}

impl Drop for Drag<'_> {
    fn drop(&mut self) {
        self.session.pointer_up();
    }
}

/// Resize a cover into a square around a fixed anchor.
///
/// Dragging past the anchor horizontally flips the cover and relabels the
/// corner, so the drag continues on the other side instead of producing a
/// negative width.
fn resize_from_anchor(cover: &mut Cover, corner: &mut Corner, anchor: Point, pointer: Point) {
    let mut width = if corner.is_left() {
        anchor.x - pointer.x
    } else {
        pointer.x - anchor.x
    };
    let height = (anchor.y - pointer.y).abs();

    if width < 0.0 {
        width = -width;
        cover.toggle_mirrored();
        *corner = corner.mirrored();
    }

    let size = width.min(height).max(MIN_HALF_SIZE);
    cover.left = anchor.x - size;
    cover.top = anchor.y - size;
    cover.width = size * 2.0;
    cover.height = size * 2.0;
}

/// Rotation that points the cover's rotate handle (straight up at zero)
/// from `center` towards `pointer`, both in display space.
fn rotation_towards(center: Point, pointer: Point) -> f64 {
    (center.y - pointer.y).atan2(center.x - pointer.x) - FRAC_PI_2
}
