//! Points, segments and simple polygons.
//!
//! Only what the eye pairing needs: the minimum distance between two
//! polygon outlines and whether two polygons share any point.

/// A point (or vector) in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector `self -> other` in radians, `atan2(dy, dx)`.
    #[inline]
    pub fn angle_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Cross product of `(b - a) x (c - a)`.
#[inline]
fn cross(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// A closed line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether `p` (known to be collinear) lies within the segment's extent.
    fn covers_collinear(&self, p: &Point) -> bool {
        p.x >= self.start.x.min(self.end.x)
            && p.x <= self.start.x.max(self.end.x)
            && p.y >= self.start.y.min(self.end.y)
            && p.y <= self.start.y.max(self.end.y)
    }

    /// Whether the two closed segments share a point.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2, q1, q2) = (&self.start, &self.end, &other.start, &other.end);
        let d1 = cross(q1, q2, p1);
        let d2 = cross(q1, q2, p2);
        let d3 = cross(p1, p2, q1);
        let d4 = cross(p1, p2, q2);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        (d1 == 0.0 && other.covers_collinear(p1))
            || (d2 == 0.0 && other.covers_collinear(p2))
            || (d3 == 0.0 && self.covers_collinear(q1))
            || (d4 == 0.0 && self.covers_collinear(q2))
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to_point(&self, p: &Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.start.distance_to(p);
        }
        let t = (((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq).clamp(0.0, 1.0);
        let closest = Point::new(self.start.x + t * dx, self.start.y + t * dy);
        closest.distance_to(p)
    }

    /// Minimum distance between two segments (0 when they intersect).
    pub fn distance_to(&self, other: &Segment) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }
        self.distance_to_point(&other.start)
            .min(self.distance_to_point(&other.end))
            .min(other.distance_to_point(&self.start))
            .min(other.distance_to_point(&self.end))
    }
}

/// A simple closed polygon given by its vertices in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Edges, including the closing edge from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Even-odd test; points on the outline count as inside.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.edges().any(|edge| edge.distance_to_point(p) == 0.0) {
            return true;
        }

        let mut inside = false;
        for edge in self.edges() {
            let (a, b) = (edge.start, edge.end);
            if (a.y > p.y) != (b.y > p.y) {
                let x_at = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_at {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Minimum distance between the two outlines.
    ///
    /// Outlines that cross yield 0. A polygon nested inside another without
    /// touching reports the gap between the outlines, not 0.
    pub fn distance_to(&self, other: &Polygon) -> f64 {
        let mut best = f64::INFINITY;
        for edge in self.edges() {
            for other_edge in other.edges() {
                best = best.min(edge.distance_to(&other_edge));
                if best == 0.0 {
                    return 0.0;
                }
            }
        }
        best
    }

    /// Whether the polygons share any point: outlines cross or one polygon
    /// lies inside the other.
    pub fn intersects(&self, other: &Polygon) -> bool {
        let edges_cross = self
            .edges()
            .any(|edge| other.edges().any(|other_edge| edge.intersects(&other_edge)));
        if edges_cross {
            return true;
        }
        other
            .vertices
            .first()
            .is_some_and(|v| self.contains_point(v))
            || self
                .vertices
                .first()
                .is_some_and(|v| other.contains_point(v))
    }
}
