//! Pairing of eyes that no detected face claimed.
//!
//! Any two leftover eyes whose outlines are closer than the sum of their
//! sizes form a candidate pair. Candidates are ranked so that eyes at the
//! same height win and overlapping eyes come last, then accepted greedily.
//! Each accepted pair becomes a synthesized face box: the union of the two
//! eyes widened by half the eye distance on each side, then grown
//! vertically into a square, biased downward (30% up, 70% down).

use std::cmp::Ordering;

use crate::geometry::{BBox, Polygon};
use crate::transform::Orientation;

use super::{order_left_right, pair_orientation};

const GROW_UP: f64 = 0.3;
const GROW_DOWN: f64 = 0.7;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    i: usize,
    j: usize,
    vertical_distance: f64,
    intersect: bool,
}

/// Face box synthesized from an accepted eye pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PairedFace {
    pub face: BBox,
    pub orientation: Orientation,
    /// Indices into the eye slice handed to [`pair_leftover_eyes`]
    pub eyes: [usize; 2],
}

/// Pair leftover eyes, returning one synthesized face per accepted pair in
/// acceptance order.
pub(super) fn pair_leftover_eyes(eyes: &[BBox]) -> Vec<PairedFace> {
    let polygons: Vec<Polygon> = eyes.iter().map(|e| e.to_polygon()).collect();
    let sizes: Vec<f64> = eyes.iter().map(|e| e.max_dimension()).collect();

    let mut candidates = Vec::new();
    for i in 0..eyes.len() {
        for j in (i + 1)..eyes.len() {
            let distance = polygons[i].distance_to(&polygons[j]);
            if distance < sizes[i] + sizes[j] {
                candidates.push(Candidate {
                    i,
                    j,
                    vertical_distance: (eyes[j].center().y - eyes[i].center().y).abs(),
                    intersect: polygons[i].intersects(&polygons[j]),
                });
            }
        }
    }

    candidates.sort_by(rank);

    let mut used = vec![false; eyes.len()];
    let mut pairs = Vec::new();
    for candidate in candidates {
        if used[candidate.i] || used[candidate.j] {
            continue;
        }
        used[candidate.i] = true;
        used[candidate.j] = true;

        let (left, right) = order_left_right(eyes, candidate.i, candidate.j);
        pairs.push(PairedFace {
            face: face_from_eyes(&eyes[left], &eyes[right]),
            orientation: pair_orientation(&eyes[left], &eyes[right]),
            eyes: [left, right],
        });
    }
    pairs
}

/// Non-overlapping pairs first, each group by ascending vertical distance.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    a.intersect
        .cmp(&b.intersect)
        .then(a.vertical_distance.total_cmp(&b.vertical_distance))
}

/// Approximate the face around an ordered eye pair.
fn face_from_eyes(left: &BBox, right: &BBox) -> BBox {
    let half_distance = left.center().distance_to(&right.center()) / 2.0;

    let mut face = left.union(right);
    face.xmin -= half_distance;
    face.xmax += half_distance;

    let add_height = face.width() - face.height();
    face.ymin -= add_height * GROW_UP;
    face.ymax += add_height * GROW_DOWN;
    face
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_eyes_are_not_paired() {
        let eyes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(100.0, 0.0, 110.0, 10.0),
        ];
        assert!(pair_leftover_eyes(&eyes).is_empty());
    }

    #[test]
    fn test_gate_uses_sum_of_sizes() {
        // Gap of 18 exceeds either size (10) but not their sum (20)
        let eyes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(28.0, 0.0, 38.0, 10.0),
        ];
        assert_eq!(pair_leftover_eyes(&eyes).len(), 1);
    }

    #[test]
    fn test_gap_equal_to_size_sum_is_not_paired() {
        // Gap of exactly 20 = 10 + 10
        let eyes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(30.0, 0.0, 40.0, 10.0),
        ];
        assert!(pair_leftover_eyes(&eyes).is_empty());
    }

    #[test]
    fn test_same_height_pair_preferred() {
        // Eye 0 can pair with 1 (same height) or 2 (lower); 1 wins
        let eyes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(20.0, 0.0, 30.0, 10.0),
            BBox::new(0.0, 15.0, 10.0, 25.0),
        ];
        let pairs = pair_leftover_eyes(&eyes);
        assert_eq!(pairs.len(), 1);
        let PairedFace { face, orientation, eyes: paired } = pairs[0];
        assert_eq!(paired, [0, 1]);
        assert_eq!(orientation.rotation, 0.0);
        assert!((face.height() - 50.0).abs() < 1e-9);
        // Union of eyes 0 and 1 widened by half of 20 on each side
        assert_eq!(face.xmin, -10.0);
        assert_eq!(face.xmax, 40.0);
    }

    #[test]
    fn test_overlapping_pairs_ranked_last() {
        // 0 and 1 overlap at the same height; 0 and 2 are apart but lower
        let eyes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(5.0, 0.0, 15.0, 10.0),
            BBox::new(15.0, 4.0, 25.0, 14.0),
        ];
        // 1 and 2 touch at x = 15 so they intersect as well; 0-2 is the only
        // clean candidate and is accepted first, leaving 1 alone
        let pairs = pair_leftover_eyes(&eyes);
        assert_eq!(pairs.len(), 1);
        let face = pairs[0].face;
        assert_eq!(pairs[0].eyes, [0, 2]);
        assert_eq!(face.union(&eyes[0]), face);
        assert_eq!(face.union(&eyes[2]), face);
    }

    #[test]
    fn test_synthesized_face_is_square() {
        let left = BBox::new(0.0, 0.0, 10.0, 8.0);
        let right = BBox::new(30.0, 2.0, 40.0, 10.0);
        let face = face_from_eyes(&left, &right);
        assert!((face.width() - face.height()).abs() < 1e-9);
    }

    #[test]
    fn test_rank_orders_intersecting_last() {
        let clean = Candidate {
            i: 0,
            j: 1,
            vertical_distance: 50.0,
            intersect: false,
        };
        let overlapping = Candidate {
            i: 0,
            j: 2,
            vertical_distance: 0.0,
            intersect: true,
        };
        assert_eq!(rank(&clean, &overlapping), Ordering::Less);
        assert_eq!(rank(&overlapping, &clean), Ordering::Greater);
    }
}
