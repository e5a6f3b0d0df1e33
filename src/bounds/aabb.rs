//! Axis-aligned extent with tolerance-aware overlap tests.

use crate::primitives::Point2;
use crate::tolerance::{fuzzy_ge, fuzzy_gt, fuzzy_le, fuzzy_lt};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new extent from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an extent from two arbitrary corners.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates an extent from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), Self::expand_to_include))
    }

    /// Returns the extent along x.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the extent along y.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the center point.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Returns width times height.
    #[inline]
    pub fn area(self) -> F {
        self.width() * self.height()
    }

    /// Returns a new extent expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns the smallest extent containing both.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        self.expand_to_include(other.min).expand_to_include(other.max)
    }

    /// Containment test where coordinates within `tolerance` of the
    /// boundary count as inside.
    #[inline]
    pub fn contains_point_fuzzy(self, p: Point2<F>, tolerance: F) -> bool {
        fuzzy_ge(p.x, self.min.x, tolerance)
            && fuzzy_le(p.x, self.max.x, tolerance)
            && fuzzy_ge(p.y, self.min.y, tolerance)
            && fuzzy_le(p.y, self.max.y, tolerance)
    }

    /// Returns `true` if the extents overlap or touch, within `tolerance`.
    pub fn outer_overlaps(self, other: Self, tolerance: F) -> bool {
        fuzzy_ge(self.max.x, other.min.x, tolerance)
            && fuzzy_le(self.min.x, other.max.x, tolerance)
            && fuzzy_ge(self.max.y, other.min.y, tolerance)
            && fuzzy_le(self.min.y, other.max.y, tolerance)
    }

    /// Returns `true` if the extents share interior area: touching along an
    /// edge or a corner, within `tolerance`, does not count.
    pub fn inner_overlaps(self, other: Self, tolerance: F) -> bool {
        fuzzy_gt(self.max.x, other.min.x, tolerance)
            && fuzzy_lt(self.min.x, other.max.x, tolerance)
            && fuzzy_gt(self.max.y, other.min.y, tolerance)
            && fuzzy_lt(self.min.y, other.max.y, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb2<f64> {
        Aabb2::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn test_from_corners() {
        let aabb: Aabb2<f64> = Aabb2::from_corners(Point2::new(10.0, 10.0), Point2::new(0.0, 0.0));
        assert_eq!(aabb, ext(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_from_points() {
        let points = vec![
            Point2::new(1.0, 2.0),
            Point2::new(-3.0, 5.0),
            Point2::new(4.0, -1.0),
        ];
        let aabb: Aabb2<f64> = Aabb2::from_points(points).unwrap();
        assert_eq!(aabb, ext(-3.0, -1.0, 4.0, 5.0));

        let empty: Vec<Point2<f64>> = vec![];
        assert!(Aabb2::from_points(empty).is_none());
    }

    #[test]
    fn test_dimensions() {
        let aabb = ext(0.0, 0.0, 10.0, 5.0);
        assert_eq!(aabb.width(), 10.0);
        assert_eq!(aabb.height(), 5.0);
        assert_eq!(aabb.area(), 50.0);
        assert_eq!(aabb.center(), Point2::new(5.0, 2.5));
    }

    #[test]
    fn test_union() {
        let u = ext(0.0, 0.0, 5.0, 5.0).union(ext(3.0, 3.0, 10.0, 10.0));
        assert_eq!(u, ext(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_fuzzy_containment() {
        let aabb = ext(0.0, 0.0, 10.0, 10.0);
        assert!(aabb.contains_point_fuzzy(Point2::new(10.0, 10.0), 0.0));
        assert!(!aabb.contains_point_fuzzy(Point2::new(10.0 + 1e-9, 5.0), 0.0));
        assert!(aabb.contains_point_fuzzy(Point2::new(10.0 + 1e-9, 5.0), 1e-8));
        assert!(!aabb.contains_point_fuzzy(Point2::new(10.1, 5.0), 1e-8));
    }

    #[test]
    fn test_outer_overlaps_counts_touching() {
        let a = ext(0.0, 0.0, 1.0, 1.0);
        let b = ext(1.0, 0.0, 2.0, 1.0);
        let c = ext(1.0 + 1e-10, 0.0, 2.0, 1.0);
        let d = ext(3.0, 3.0, 4.0, 4.0);
        assert!(a.outer_overlaps(b, 1e-8));
        assert!(a.outer_overlaps(c, 1e-8));
        assert!(!a.outer_overlaps(d, 1e-8));
    }

    #[test]
    fn test_inner_overlaps_ignores_touching() {
        let a = ext(0.0, 0.0, 1.0, 1.0);
        let touching = ext(1.0, 0.0, 2.0, 1.0);
        let overlapping = ext(0.5, 0.5, 1.5, 1.5);
        assert!(!a.inner_overlaps(touching, 1e-8));
        assert!(a.inner_overlaps(overlapping, 1e-8));
        assert!(overlapping.inner_overlaps(a, 1e-8));
    }
}
