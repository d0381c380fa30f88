//! Cover derivation from detector output.
//!
//! Turns the axis-aligned face and eye rectangles of a detector into oriented
//! cover placements.
//!
//! # Algorithm
//!
//! 1. Every face gets one cover equal to its box. Eyes inside the face decide
//!    the orientation:
//!    - no eye: mirrored when the face sits left of the faces' mean center
//!    - one eye: mirrored when the eye sits left of the face center
//!    - two or more: the two widest eyes give the rotation (angle of the
//!      left-to-right eye vector) and the mirror (left eye wider than right)
//! 2. Eyes no face claimed are paired up by proximity, and each accepted pair
//!    yields a synthesized face box (see [`pairing`]).
//!
//! An eye is consumed by at most one cover. Consumption is tracked by index
//! into the eye list, first come first served in face order.

mod pairing;

use std::collections::HashSet;

use log::debug;

use crate::cover::{Cover, CoverKind};
use crate::geometry::{BBox, Rect};
use crate::transform::Orientation;

/// A derived cover and the eyes it consumed, as indices into the eye list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Claim {
    pub cover: Cover,
    pub eyes: Vec<usize>,
}

/// Derives covers of a fixed kind from detector rectangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverDeriver {
    pub kind: CoverKind,
}

impl CoverDeriver {
    pub fn new(kind: CoverKind) -> Self {
        Self { kind }
    }

    /// Derive cover placements for one image.
    ///
    /// Pure and deterministic: the same input always yields the same covers.
    /// Empty faces and eyes produce an empty list; callers decide whether
    /// that means "no face found".
    pub fn derive(&self, faces: &[Rect], eyes: &[Rect], image_width: f64, image_height: f64) -> Vec<Cover> {
        self.claims(faces, eyes, image_width, image_height)
            .into_iter()
            .map(|claim| claim.cover)
            .collect()
    }

    /// [`derive`](Self::derive), keeping which eyes each cover consumed.
    pub(crate) fn claims(
        &self,
        faces: &[Rect],
        eyes: &[Rect],
        image_width: f64,
        image_height: f64,
    ) -> Vec<Claim> {
        let faces: Vec<BBox> = faces.iter().map(|r| r.to_bbox()).collect();
        let eyes: Vec<BBox> = eyes.iter().map(|r| r.to_bbox()).collect();

        let center_x = if faces.len() <= 1 {
            image_width / 2.0
        } else {
            faces.iter().map(|f| f.center().x).sum::<f64>() / faces.len() as f64
        };

        let mut consumed: HashSet<usize> = HashSet::new();
        let mut covers = Vec::with_capacity(faces.len());

        for face in &faces {
            let contained: Vec<usize> = (0..eyes.len())
                .filter(|i| !consumed.contains(i) && face.contains(&eyes[*i]))
                .collect();

            let (orientation, claimed) = match contained.as_slice() {
                [] => (Orientation::new(0.0, face.center().x < center_x), vec![]),
                [only] => (
                    Orientation::new(0.0, eyes[*only].center().x < face.center().x),
                    vec![*only],
                ),
                _ => {
                    let (left, right) = widest_pair(&eyes, &contained);
                    (pair_orientation(&eyes[left], &eyes[right]), vec![left, right])
                }
            };

            consumed.extend(claimed.iter().copied());
            covers.push(Claim {
                cover: Cover::new(self.kind, *face, orientation),
                eyes: claimed,
            });
        }

        let leftover: Vec<usize> = (0..eyes.len()).filter(|i| !consumed.contains(i)).collect();
        if leftover.len() >= 2 {
            let leftover_boxes: Vec<BBox> = leftover.iter().map(|i| eyes[*i]).collect();
            for paired in pairing::pair_leftover_eyes(&leftover_boxes) {
                covers.push(Claim {
                    cover: Cover::new(self.kind, paired.face, paired.orientation),
                    eyes: paired.eyes.iter().map(|i| leftover[*i]).collect(),
                });
            }
        }

        debug!(
            "derived {} covers from {} faces and {} eyes ({}x{})",
            covers.len(),
            faces.len(),
            eyes.len(),
            image_width,
            image_height
        );

        covers
    }
}

/// Derive covers of the default kind. See [`CoverDeriver::derive`].
pub fn derive_covers(faces: &[Rect], eyes: &[Rect], image_width: f64, image_height: f64) -> Vec<Cover> {
    CoverDeriver::default().derive(faces, eyes, image_width, image_height)
}

/// Pick the eye pair from two or more candidates, returned as (left, right).
///
/// With more than two, the two widest win; the sort is stable so exact ties
/// keep detector order and exactly two are always chosen.
fn widest_pair(eyes: &[BBox], candidates: &[usize]) -> (usize, usize) {
    let mut ranked = candidates.to_vec();
    if ranked.len() > 2 {
        ranked.sort_by(|a, b| eyes[*b].width().total_cmp(&eyes[*a].width()));
    }
    order_left_right(eyes, ranked[0], ranked[1])
}

/// Order two eyes by center x.
pub(crate) fn order_left_right(eyes: &[BBox], a: usize, b: usize) -> (usize, usize) {
    if eyes[a].center().x < eyes[b].center().x {
        (a, b)
    } else {
        (b, a)
    }
}

/// Orientation implied by an ordered eye pair.
///
/// Rotation is the angle of the left-to-right center vector; the cover is
/// mirrored when the left eye is wider (the near side of a turned face).
pub(crate) fn pair_orientation(left: &BBox, right: &BBox) -> Orientation {
    Orientation::new(
        left.center().angle_to(&right.center()),
        left.width() > right.width(),
    )
}
