//! 2D line segment type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A directed segment between two ring vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Returns the direction vector from start to end.
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Returns the segment length.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns the midpoint.
    #[inline]
    pub fn midpoint(self) -> Point2<F> {
        self.start.midpoint(self.end)
    }

    /// Returns the point at parameter `t` (0 at `start`, 1 at `end`).
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start.lerp(self.end, t)
    }

    /// Parameter of the orthogonal projection of `p` onto the supporting
    /// line, unclamped. A degenerate segment projects everything to 0.
    pub fn parameter_of(self, p: Point2<F>) -> F {
        let v = self.direction();
        let len_sq = v.magnitude_squared();
        if len_sq <= F::zero() {
            return F::zero();
        }
        (p - self.start).dot(v) / len_sq
    }

    /// Closest point on the segment to `p`, with its clamped parameter.
    pub fn closest_point(self, p: Point2<F>) -> (Point2<F>, F) {
        let t = self.parameter_of(p).max(F::zero()).min(F::one());
        (self.point_at(t), t)
    }

    /// Returns the squared distance from `p` to the closest point.
    #[inline]
    pub fn distance_squared_to_point(self, p: Point2<F>) -> F {
        let (closest, _) = self.closest_point(p);
        p.distance_squared(closest)
    }

    /// Distance from `p` to the infinite line through the segment.
    pub fn distance_to_line(self, p: Point2<F>) -> F {
        let v = self.direction();
        let len = v.magnitude();
        if len <= F::zero() {
            return p.distance(self.start);
        }
        v.cross(p - self.start).abs() / len
    }

    /// Returns `true` if `p` is equal (within `tolerance`) to either extremity.
    #[inline]
    pub fn has_extremity(self, p: Point2<F>, tolerance: F) -> bool {
        self.start.is_equal_to(p, tolerance) || self.end.is_equal_to(p, tolerance)
    }

    /// Returns `true` if the two segments share an extremity.
    pub fn links_to(self, other: Self, tolerance: F) -> bool {
        self.has_extremity(other.start, tolerance) || self.has_extremity(other.end, tolerance)
    }

    /// Returns the segment travelled backwards.
    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }
}
