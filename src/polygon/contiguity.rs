//! Shared-boundary queries between rings.
//!
//! Two rings are contiguous when some stretch of boundary of positive length
//! is common to both. They are adjacent when their boundaries meet, at a
//! shared stretch or at a single point, without crossing.

use super::ring::Ring;
use crate::bounds::Aabb2;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{combined, intersect_segments, point_on_segment, SegmentIntersection};
use num_traits::Float;

impl<F: Float> Ring<F> {
    /// Returns `true` if the boundaries share a stretch of positive length.
    pub fn are_contiguous(&self, other: &Ring<F>) -> bool {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());
        if !self.extent().outer_overlaps(other.extent(), tol) {
            return false;
        }
        self.segments()
            .any(|s| !runs_on_segment(s, other, tol).is_empty())
    }

    /// Returns `true` if `point` lies on a stretch of boundary shared by
    /// both rings.
    pub fn are_contiguous_at(&self, other: &Ring<F>, point: Point2<F>) -> bool {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());
        if !self.extent().outer_overlaps(other.extent(), tol) {
            return false;
        }
        self.segments().any(|s| {
            runs_on_segment(s, other, tol)
                .into_iter()
                .any(|(first, second)| point_on_segment(point, Segment2::new(first, second), tol))
        })
    }

    /// End points of the shared stretches, in the order `self` travels them.
    ///
    /// Each stretch gives a start and an end point. Stretches that follow
    /// each other across a vertex are merged, including one that wraps
    /// around the ring's start point, so the list always has even length.
    /// Rings whose boundaries coincide entirely give an empty list.
    pub fn contiguousness_points(&self, other: &Ring<F>) -> Vec<Point2<F>> {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());
        let mut points: Vec<Point2<F>> = Vec::new();
        if !self.extent().outer_overlaps(other.extent(), tol) {
            return points;
        }

        for s in self.segments() {
            for (first, second) in runs_on_segment(s, other, tol) {
                let joins = points.last().map_or(false, |last| last.is_equal_to(first, tol));
                if joins {
                    points.pop();
                } else {
                    points.push(first);
                }
                points.push(second);
            }
        }

        let n = points.len();
        if n >= 2 && points[0].is_equal_to(points[n - 1], tol) {
            // The last stretch runs into the first one.
            if n > 2 {
                points[0] = points[n - 2];
            }
            points.truncate(n - 2);
        }
        points
    }

    /// Returns `true` if the boundaries meet without crossing.
    pub fn are_adjacent(&self, other: &Ring<F>) -> bool {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());
        if !self.extent().outer_overlaps(other.extent(), tol) {
            return false;
        }
        let touches = self.segments().any(|s| {
            other
                .segments()
                .any(|g| intersect_segments(s, g, tol) != SegmentIntersection::None)
        });
        touches && !self.crosses(other)
    }
}

/// Stretches of `s` lying on the boundary of `other`, ordered along `s`.
fn runs_on_segment<F: Float>(
    s: Segment2<F>,
    other: &Ring<F>,
    tol: F,
) -> Vec<(Point2<F>, Point2<F>)> {
    let s_box = Aabb2::from_corners(s.start, s.end);
    let mut runs: Vec<_> = other
        .segments()
        .filter(|g| s_box.outer_overlaps(Aabb2::from_corners(g.start, g.end), tol))
        .filter_map(|g| match intersect_segments(s, g, tol) {
            SegmentIntersection::Contiguous { first, second } => Some((first, second)),
            _ => None,
        })
        .collect();
    runs.sort_by(|a, b| {
        s.parameter_of(a.0)
            .partial_cmp(&s.parameter_of(b.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring<f64> {
        Ring::rectangle(x0, y0, x1, y1).unwrap()
    }

    fn assert_points(actual: &[Point2<f64>], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "got {:?}", actual);
        for (p, &(x, y)) in actual.iter().zip(expected) {
            assert_relative_eq!(p.x, x, epsilon = 1e-12);
            assert_relative_eq!(p.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shared_full_edge() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 0.0, 2.0, 1.0);

        assert!(a.are_contiguous(&b));
        assert!(b.are_contiguous(&a));
        assert_points(&a.contiguousness_points(&b), &[(1.0, 0.0), (1.0, 1.0)]);
        // `b` travels the shared edge downwards.
        assert_points(&b.contiguousness_points(&a), &[(1.0, 1.0), (1.0, 0.0)]);
        assert!(a.are_adjacent(&b));

        assert!(a.are_contiguous_at(&b, Point2::new(1.0, 0.5)));
        assert!(!a.are_contiguous_at(&b, Point2::new(0.0, 0.5)));
    }

    #[test]
    fn test_shared_partial_edge() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(2.0, 0.5, 3.0, 1.5);

        assert!(a.are_contiguous(&b));
        assert_points(&a.contiguousness_points(&b), &[(2.0, 0.5), (2.0, 1.5)]);
        assert!(a.are_adjacent(&b));
        assert!(a.are_contiguous_at(&b, Point2::new(2.0, 1.0)));
        assert!(!a.are_contiguous_at(&b, Point2::new(2.0, 1.8)));
    }

    #[test]
    fn test_stretch_wrapping_start_point() {
        // The L hugs the square's first vertex along both of its edges.
        let a = square(0.0, 0.0, 2.0, 2.0);
        let l_shape = Ring::new(
            [(0.0, 0.0), (0.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 0.0)]
                .iter()
                .map(|&(x, y)| Point2::new(x, y))
                .collect(),
        )
        .unwrap();

        assert!(a.are_contiguous(&l_shape));
        assert_points(&a.contiguousness_points(&l_shape), &[(0.0, 1.0), (1.0, 0.0)]);
        assert!(a.are_adjacent(&l_shape));
    }

    #[test]
    fn test_corner_touch_is_adjacent_only() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 1.0, 2.0, 2.0);

        assert!(!a.are_contiguous(&b));
        assert!(a.contiguousness_points(&b).is_empty());
        assert!(a.are_adjacent(&b));
        assert!(!a.are_contiguous_at(&b, Point2::new(1.0, 1.0)));
    }

    #[test]
    fn test_crossing_and_disjoint_rings() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let crossing = square(0.5, 0.5, 1.5, 1.5);
        assert!(!a.are_contiguous(&crossing));
        assert!(!a.are_adjacent(&crossing));

        let far = square(3.0, 3.0, 4.0, 4.0);
        assert!(!a.are_contiguous(&far));
        assert!(!a.are_adjacent(&far));
        assert!(a.contiguousness_points(&far).is_empty());
    }
}
