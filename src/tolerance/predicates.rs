//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// `eps` is compared against the absolute value of the cross product
/// `(b - a) x (c - a)`, i.e. twice the signed area of the triangle.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a segment within `tolerance` (Euclidean).
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, tolerance: F) -> bool {
    segment.distance_squared_to_point(p) <= tolerance * tolerance
}

/// How two segments interact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// No common point.
    None,
    /// The segments cross at a point interior to both, away from all four
    /// extremities.
    Crossing {
        point: Point2<F>,
        /// Parameter along the first segment.
        t1: F,
        /// Parameter along the second segment.
        t2: F,
    },
    /// The segments meet at a single point equal to an extremity of at least
    /// one of them.
    AtExtremity { point: Point2<F> },
    /// The segments are collinear and overlap over more than the tolerance.
    ///
    /// `first` and `second` are the ends of the shared interval, ordered
    /// along the first segment. Each one is an actual extremity of one of
    /// the two segments.
    Contiguous { first: Point2<F>, second: Point2<F> },
}

/// Classifies the interaction of two segments.
///
/// Segments shorter than `tolerance` never interact.
pub fn intersect_segments<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    tolerance: F,
) -> SegmentIntersection<F> {
    let len1 = s1.length();
    let len2 = s2.length();
    if len1 <= tolerance || len2 <= tolerance {
        return SegmentIntersection::None;
    }

    // Collinearity is measured against the longer supporting line.
    let (long, short) = if len1 >= len2 { (s1, s2) } else { (s2, s1) };
    if long.distance_to_line(short.start) <= tolerance
        && long.distance_to_line(short.end) <= tolerance
    {
        return collinear_overlap(s1, s2, len1, tolerance);
    }

    let d1 = s1.direction();
    let d2 = s2.direction();
    let cross = d1.cross(d2);
    if cross == F::zero() {
        return SegmentIntersection::None;
    }

    // s1.start + t1 * d1 = s2.start + t2 * d2
    let d = s2.start - s1.start;
    let t1 = d.cross(d2) / cross;
    let t2 = d.cross(d1) / cross;

    let e1 = tolerance / len1;
    let e2 = tolerance / len2;
    if t1 < -e1 || t1 > F::one() + e1 || t2 < -e2 || t2 > F::one() + e2 {
        return SegmentIntersection::None;
    }

    let point = s1.point_at(t1.max(F::zero()).min(F::one()));
    if s1.has_extremity(point, tolerance) || s2.has_extremity(point, tolerance) {
        SegmentIntersection::AtExtremity { point }
    } else {
        SegmentIntersection::Crossing { point, t1, t2 }
    }
}

fn collinear_overlap<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    len1: F,
    tolerance: F,
) -> SegmentIntersection<F> {
    let u0 = s1.parameter_of(s2.start);
    let u1 = s1.parameter_of(s2.end);
    let (lo2, lo_point, hi2, hi_point) = if u0 <= u1 {
        (u0, s2.start, u1, s2.end)
    } else {
        (u1, s2.end, u0, s2.start)
    };

    let (lo, first) = if lo2 > F::zero() {
        (lo2, lo_point)
    } else {
        (F::zero(), s1.start)
    };
    let (hi, second) = if hi2 < F::one() {
        (hi2, hi_point)
    } else {
        (F::one(), s1.end)
    };

    let overlap = (hi - lo) * len1;
    if overlap < -tolerance {
        SegmentIntersection::None
    } else if overlap <= tolerance || first.is_equal_to(second, tolerance) {
        SegmentIntersection::AtExtremity { point: first }
    } else {
        SegmentIntersection::Contiguous { first, second }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment2<f64> {
        Segment2::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    const TOL: f64 = 1e-9;

    #[test]
    fn test_orient2d() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(orient2d(a, b, Point2::new(0.5, 1.0), 1e-10), Orientation::CounterClockwise);
        assert_eq!(orient2d(a, b, Point2::new(0.5, -1.0), 1e-10), Orientation::Clockwise);
        assert_eq!(orient2d(a, b, Point2::new(2.0, 1e-12), 1e-10), Orientation::Collinear);
    }

    #[test]
    fn test_point_on_segment() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!(point_on_segment(Point2::new(5.0, 0.0), s, TOL));
        assert!(point_on_segment(Point2::new(5.0, 1e-10), s, TOL));
        assert!(!point_on_segment(Point2::new(5.0, 1e-3), s, TOL));
        assert!(!point_on_segment(Point2::new(11.0, 0.0), s, TOL));
    }

    #[test]
    fn test_proper_crossing() {
        let r = intersect_segments(seg(0.0, 0.0, 2.0, 2.0), seg(0.0, 2.0, 2.0, 0.0), TOL);
        match r {
            SegmentIntersection::Crossing { point, t1, t2 } => {
                assert!(point.is_equal_to(Point2::new(1.0, 1.0), 1e-12));
                assert!((t1 - 0.5).abs() < 1e-12);
                assert!((t2 - 0.5).abs() < 1e-12);
            }
            other => panic!("expected crossing, got {:?}", other),
        }
    }

    #[test]
    fn test_t_junction_is_at_extremity() {
        let r = intersect_segments(seg(0.0, 0.0, 2.0, 0.0), seg(1.0, 0.0, 1.0, 1.0), TOL);
        assert_eq!(
            r,
            SegmentIntersection::AtExtremity {
                point: Point2::new(1.0, 0.0)
            }
        );
    }

    #[test]
    fn test_disjoint() {
        let r = intersect_segments(seg(0.0, 0.0, 1.0, 0.0), seg(0.0, 1.0, 1.0, 2.0), TOL);
        assert_eq!(r, SegmentIntersection::None);

        let parallel = intersect_segments(seg(0.0, 0.0, 1.0, 0.0), seg(0.0, 1.0, 1.0, 1.0), TOL);
        assert_eq!(parallel, SegmentIntersection::None);
    }

    #[test]
    fn test_contiguous_reports_vertices_in_first_segment_order() {
        let r = intersect_segments(seg(0.0, 0.0, 4.0, 0.0), seg(3.0, 0.0, 1.0, 0.0), TOL);
        assert_eq!(
            r,
            SegmentIntersection::Contiguous {
                first: Point2::new(1.0, 0.0),
                second: Point2::new(3.0, 0.0),
            }
        );

        let partial = intersect_segments(seg(0.0, 0.0, 2.0, 0.0), seg(1.0, 0.0, 5.0, 0.0), TOL);
        assert_eq!(
            partial,
            SegmentIntersection::Contiguous {
                first: Point2::new(1.0, 0.0),
                second: Point2::new(2.0, 0.0),
            }
        );
    }

    #[test]
    fn test_collinear_end_to_end_touch() {
        let r = intersect_segments(seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 2.0, 0.0), TOL);
        assert_eq!(
            r,
            SegmentIntersection::AtExtremity {
                point: Point2::new(1.0, 0.0)
            }
        );

        let gap = intersect_segments(seg(0.0, 0.0, 1.0, 0.0), seg(1.5, 0.0, 2.0, 0.0), TOL);
        assert_eq!(gap, SegmentIntersection::None);
    }

    #[test]
    fn test_degenerate_segment_never_interacts() {
        let r = intersect_segments(seg(1.0, 1.0, 1.0, 1.0), seg(0.0, 0.0, 2.0, 2.0), TOL);
        assert_eq!(r, SegmentIntersection::None);
    }
}
