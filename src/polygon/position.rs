//! Tolerance-aware spatial classification against rings.

use super::ring::Ring;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{
    combined, fuzzy_eq, fuzzy_gt, fuzzy_le, fuzzy_lt, intersect_segments, point_on_segment,
    SegmentIntersection,
};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where something lies relative to a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpatialPosition {
    /// Strictly inside.
    In,
    /// Strictly outside.
    Out,
    /// On the boundary, within tolerance.
    On,
    /// Boundaries cross: partly inside and partly outside. Only produced
    /// when comparing two rings.
    PartiallyIn,
}

impl SpatialPosition {
    /// Swaps `In` and `Out`.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            SpatialPosition::In => SpatialPosition::Out,
            SpatialPosition::Out => SpatialPosition::In,
            other => other,
        }
    }
}

/// Classifies a point against a ring with an even-odd ray cast.
///
/// The ray runs horizontally towards negative x. A point within `tolerance`
/// of any edge is `On`. When the ray grazes a vertex, only the edge whose
/// lower end sits on the ray is counted, so touching a vertex from above or
/// below is never counted twice.
pub fn classify_point<F: Float>(ring: &Ring<F>, point: Point2<F>, tolerance: F) -> SpatialPosition {
    if !ring.extent().contains_point_fuzzy(point, tolerance) {
        return SpatialPosition::Out;
    }

    let (x, y) = (point.x, point.y);
    let mut crossings = 0usize;

    for segment in ring.segments() {
        let (a, b) = (segment.start, segment.end);
        let (xmin, xmax) = (a.x.min(b.x), a.x.max(b.x));
        let (ymin, ymax) = (a.y.min(b.y), a.y.max(b.y));

        let near = fuzzy_le(xmin, x, tolerance)
            && fuzzy_le(x, xmax, tolerance)
            && fuzzy_le(ymin, y, tolerance)
            && fuzzy_le(y, ymax, tolerance);

        if near {
            if point_on_segment(point, segment, tolerance) {
                return SpatialPosition::On;
            }
            if fuzzy_eq(ymin, y, tolerance) && !fuzzy_eq(y, ymax, tolerance) {
                let low = if a.y == ymin { a } else { b };
                if fuzzy_lt(low.x, x, tolerance) {
                    crossings += 1;
                }
            } else if fuzzy_lt(ymin, y, tolerance) && fuzzy_gt(ymax, y, tolerance) {
                let x_at = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x_at < x {
                    crossings += 1;
                }
            }
        } else if fuzzy_le(xmin, x, tolerance) {
            if fuzzy_lt(ymin, y, tolerance) && fuzzy_gt(ymax, y, tolerance) {
                crossings += 1;
            } else if fuzzy_gt(ymax, y, tolerance) && fuzzy_eq(ymin, y, tolerance) {
                let grazed = (fuzzy_eq(a.y, y, tolerance) && a.x < x)
                    || (fuzzy_eq(b.y, y, tolerance) && b.x < x);
                if grazed {
                    crossings += 1;
                }
            }
        }
    }

    if crossings % 2 == 1 {
        SpatialPosition::In
    } else {
        SpatialPosition::Out
    }
}

/// Classifies the segment `a`-`b` by its midpoint, re-checking `b` and then
/// `a` when the midpoint is on the boundary.
///
/// This is a fast approximation: a segment that flirts with the boundary
/// several times can still be misjudged.
pub fn classify_segment_midpoint<F: Float>(
    ring: &Ring<F>,
    a: Point2<F>,
    b: Point2<F>,
    tolerance: F,
) -> SpatialPosition {
    [a.midpoint(b), b, a]
        .into_iter()
        .map(|p| classify_point(ring, p, tolerance))
        .find(|&pos| pos != SpatialPosition::On)
        .unwrap_or(SpatialPosition::On)
}

/// Classifies the segment `a`-`b` by sampling its midpoint, its ends and its
/// quarter points. The first sample off the boundary decides.
pub fn classify_segment_strict<F: Float>(
    ring: &Ring<F>,
    a: Point2<F>,
    b: Point2<F>,
    tolerance: F,
) -> SpatialPosition {
    let quarter = F::from(0.25).unwrap_or_else(F::epsilon);
    let three_quarters = F::one() - quarter;
    [a.midpoint(b), b, a, a.lerp(b, quarter), a.lerp(b, three_quarters)]
        .into_iter()
        .map(|p| classify_point(ring, p, tolerance))
        .find(|&pos| pos != SpatialPosition::On)
        .unwrap_or(SpatialPosition::On)
}

/// Vertices interleaved with segment midpoints, in travel order.
fn samples<F: Float>(ring: &Ring<F>) -> impl Iterator<Item = Point2<F>> + '_ {
    ring.segments().flat_map(|s| [s.start, s.midpoint()])
}

/// Remembers the first sample off the boundary and reports whether a later
/// one lies on the other side.
fn flips(first: &mut SpatialPosition, position: SpatialPosition) -> bool {
    match (*first, position) {
        (SpatialPosition::On, p) => {
            *first = p;
            false
        }
        (SpatialPosition::In, SpatialPosition::Out) | (SpatialPosition::Out, SpatialPosition::In) => {
            true
        }
        _ => false,
    }
}

impl<F: Float> Ring<F> {
    /// Returns `true` only for points strictly inside.
    pub fn contains(&self, point: Point2<F>) -> bool {
        self.spatial_position_of_point(point) == SpatialPosition::In
    }

    /// Returns where `point` lies, using the ring's own tolerance.
    pub fn spatial_position_of_point(&self, point: Point2<F>) -> SpatialPosition {
        classify_point(self, point, self.tolerance())
    }

    /// Position of `other` relative to `self`: `PartiallyIn` when the
    /// boundaries cross.
    pub fn spatial_position_of(&self, other: &Ring<F>) -> SpatialPosition {
        if self.crosses(other) {
            SpatialPosition::PartiallyIn
        } else {
            self.non_crossing_position_of(other)
        }
    }

    /// Returns `true` if the two boundaries cross each other, as opposed to
    /// merely touching.
    pub fn crosses(&self, other: &Ring<F>) -> bool {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());
        if !self.extent().outer_overlaps(other.extent(), tol) {
            return false;
        }

        let mut own_samples = samples(self);
        let mut other_samples = samples(other);
        let mut own_first = SpatialPosition::On;
        let mut other_first = SpatialPosition::On;

        loop {
            let own = own_samples.next();
            let theirs = other_samples.next();
            if own.is_none() && theirs.is_none() {
                break;
            }
            if let Some(p) = own {
                if flips(&mut own_first, classify_point(other, p, tol)) {
                    return true;
                }
            }
            if let Some(p) = theirs {
                if flips(&mut other_first, classify_point(self, p, tol)) {
                    return true;
                }
            }
        }

        let all_on = own_first == SpatialPosition::On && other_first == SpatialPosition::On;
        let both_out = own_first == SpatialPosition::Out && other_first == SpatialPosition::Out;
        if !all_on && (both_out || !self.is_convex() || !other.is_convex()) {
            return segments_cross(self, other, tol);
        }
        false
    }

    /// Position of `other` relative to `self`, assuming the boundaries do
    /// not cross.
    ///
    /// Falls back on comparing areas when every sample of both rings lies on
    /// the other boundary.
    pub fn non_crossing_position_of(&self, other: &Ring<F>) -> SpatialPosition {
        let tol = combined(self.tolerance_mode(), other.tolerance_mode());

        let own_view = other
            .points()
            .iter()
            .copied()
            .chain(other.segments().map(|s| s.midpoint()))
            .map(|p| classify_point(self, p, tol))
            .find(|&pos| pos != SpatialPosition::On);
        if let Some(position) = own_view {
            return position;
        }

        let other_view = self
            .points()
            .iter()
            .copied()
            .chain(self.segments().map(|s| s.midpoint()))
            .map(|p| classify_point(other, p, tol))
            .find(|&pos| pos != SpatialPosition::On);
        if let Some(position) = other_view {
            return position.inverted();
        }

        let (own_area, other_area) = (self.area(), other.area());
        if fuzzy_eq(own_area, other_area, tol * tol) {
            SpatialPosition::On
        } else if other_area < own_area {
            SpatialPosition::In
        } else {
            SpatialPosition::Out
        }
    }
}

/// Segment-level crossing test used when sampling alone is inconclusive.
fn segments_cross<F: Float>(a: &Ring<F>, b: &Ring<F>, tol: F) -> bool {
    for s in a.segments() {
        for t in b.segments() {
            if let SegmentIntersection::Crossing { .. } = intersect_segments(s, t, tol) {
                return true;
            }
        }
    }
    passes_through_vertex(a, b, tol) || passes_through_vertex(b, a, tol)
}

/// Returns `true` if `ring` goes from inside `other` to outside it (or the
/// reverse) through one of its own vertices lying on `other`'s boundary.
fn passes_through_vertex<F: Float>(ring: &Ring<F>, other: &Ring<F>, tol: F) -> bool {
    let points = ring.points();
    let n = points.len();
    (0..n - 1).any(|i| {
        let vertex = points[i];
        if classify_point(other, vertex, tol) != SpatialPosition::On {
            return false;
        }
        let before = if i == 0 { points[n - 2] } else { points[i - 1] };
        let after = points[i + 1];
        let entering = classify_point(other, Segment2::new(before, vertex).midpoint(), tol);
        let leaving = classify_point(other, Segment2::new(vertex, after).midpoint(), tol);
        matches!(
            (entering, leaving),
            (SpatialPosition::In, SpatialPosition::Out) | (SpatialPosition::Out, SpatialPosition::In)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring<f64> {
        Ring::rectangle(x0, y0, x1, y1).unwrap()
    }

    fn ring(coords: &[(f64, f64)]) -> Ring<f64> {
        Ring::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_classify_point_basic() {
        let s = square(0.0, 0.0, 2.0, 2.0);
        assert_eq!(classify_point(&s, Point2::new(1.0, 1.0), TOL), SpatialPosition::In);
        assert_eq!(classify_point(&s, Point2::new(3.0, 1.0), TOL), SpatialPosition::Out);
        assert_eq!(classify_point(&s, Point2::new(-1.0, 1.0), TOL), SpatialPosition::Out);
        assert_eq!(classify_point(&s, Point2::new(2.0, 1.0), TOL), SpatialPosition::On);
        assert_eq!(classify_point(&s, Point2::new(0.0, 0.0), TOL), SpatialPosition::On);
        assert_eq!(
            classify_point(&s, Point2::new(1.0, 2.0 + 1e-10), TOL),
            SpatialPosition::On
        );
    }

    #[test]
    fn test_ray_through_vertex_counts_once() {
        let diamond = ring(&[(2.0, 0.0), (4.0, 2.0), (2.0, 4.0), (0.0, 2.0)]);
        // The ray towards -x passes exactly through the vertex (0, 2).
        assert_eq!(
            classify_point(&diamond, Point2::new(2.0, 2.0), TOL),
            SpatialPosition::In
        );
        assert_eq!(
            classify_point(&diamond, Point2::new(5.0, 2.0), TOL),
            SpatialPosition::Out
        );
    }

    #[test]
    fn test_ray_grazing_a_spike_tip() {
        // Concave ring whose notch tip lies at y = 2, left of the sample point.
        let notched = ring(&[(0.0, 0.0), (6.0, 0.0), (6.0, 4.0), (0.0, 4.0), (2.0, 2.0)]);
        assert_eq!(
            classify_point(&notched, Point2::new(4.0, 2.0), TOL),
            SpatialPosition::In
        );
        assert_eq!(
            classify_point(&notched, Point2::new(1.0, 2.0), TOL),
            SpatialPosition::Out
        );
    }

    #[test]
    fn test_ray_along_horizontal_edge() {
        let step = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0), (0.0, 2.0)]);
        // The ray runs along the horizontal edge (0,2)-(2,2).
        assert_eq!(
            classify_point(&step, Point2::new(3.0, 2.0), TOL),
            SpatialPosition::In
        );
        assert_eq!(
            classify_point(&step, Point2::new(5.0, 2.0), TOL),
            SpatialPosition::Out
        );
    }

    #[test]
    fn test_classify_segment_midpoint_rechecks_ends() {
        let s = square(0.0, 0.0, 2.0, 2.0);
        // The midpoint lies on the boundary, the end point inside.
        let pos = classify_segment_midpoint(&s, Point2::new(0.0, 0.0), Point2::new(0.0, 2.0), TOL);
        assert_eq!(pos, SpatialPosition::On);

        let pos = classify_segment_midpoint(&s, Point2::new(-1.0, 1.0), Point2::new(1.0, 1.0), TOL);
        assert_eq!(pos, SpatialPosition::In);

        let pos = classify_segment_midpoint(&s, Point2::new(1.0, -1.0), Point2::new(1.0, 3.0), TOL);
        assert_eq!(pos, SpatialPosition::In);
    }

    #[test]
    fn test_classify_segment_strict_samples_quarters() {
        let s = square(0.0, 0.0, 2.0, 2.0);
        let pos = classify_segment_strict(&s, Point2::new(2.0, 0.0), Point2::new(2.0, 2.0), TOL);
        assert_eq!(pos, SpatialPosition::On);

        let pos = classify_segment_strict(&s, Point2::new(-1.0, 1.0), Point2::new(3.0, 1.0), TOL);
        assert_eq!(pos, SpatialPosition::In);
    }

    #[test]
    fn test_contains() {
        let s = square(0.0, 0.0, 1.0, 1.0);
        assert!(s.contains(Point2::new(0.5, 0.5)));
        assert!(!s.contains(Point2::new(1.0, 0.5)));
        assert!(!s.contains(Point2::new(1.5, 0.5)));
    }

    #[test]
    fn test_crosses() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(0.5, 0.5, 1.5, 1.5);
        let inner = square(0.25, 0.25, 0.75, 0.75);
        let far = square(5.0, 5.0, 6.0, 6.0);
        let neighbour = square(1.0, 0.0, 2.0, 1.0);

        assert!(a.crosses(&b));
        assert!(b.crosses(&a));
        assert!(!a.crosses(&inner));
        assert!(!a.crosses(&far));
        assert!(!a.crosses(&neighbour));
        assert!(!a.crosses(&a.clone()));
    }

    #[test]
    fn test_crosses_through_shared_vertex() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        // A triangle entering the square through its corner (2, 2).
        let t = ring(&[(2.0, 2.0), (1.0, 1.5), (3.0, 3.0)]);
        assert!(a.crosses(&t));
    }

    #[test]
    fn test_spatial_position_of_ring() {
        let a = square(0.0, 0.0, 4.0, 4.0);
        assert_eq!(a.spatial_position_of(&square(1.0, 1.0, 2.0, 2.0)), SpatialPosition::In);
        assert_eq!(a.spatial_position_of(&square(5.0, 5.0, 6.0, 6.0)), SpatialPosition::Out);
        assert_eq!(
            a.spatial_position_of(&square(3.0, 3.0, 5.0, 5.0)),
            SpatialPosition::PartiallyIn
        );
        assert_eq!(
            a.spatial_position_of(&square(-1.0, -1.0, 5.0, 5.0)),
            SpatialPosition::Out
        );
    }

    #[test]
    fn test_non_crossing_position_of_equal_rings() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.non_crossing_position_of(&a.reversed()), SpatialPosition::On);
    }

    #[test]
    fn test_non_crossing_position_with_shared_edges() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        // Every vertex and midpoint of `a` lies on the boundary of `big`.
        let big = ring(&[
            (0.0, 0.0),
            (0.5, 0.0),
            (1.0, 0.0),
            (1.0, 0.5),
            (1.0, 1.0),
            (0.5, 1.0),
            (0.0, 1.0),
            (0.0, 0.5),
        ]);
        assert_eq!(a.non_crossing_position_of(&big), SpatialPosition::On);

        let c = square(0.0, 0.0, 2.0, 1.0);
        assert_eq!(c.non_crossing_position_of(&a), SpatialPosition::In);
        assert_eq!(a.non_crossing_position_of(&c), SpatialPosition::Out);
    }

    #[test]
    fn test_inverted() {
        assert_eq!(SpatialPosition::In.inverted(), SpatialPosition::Out);
        assert_eq!(SpatialPosition::Out.inverted(), SpatialPosition::In);
        assert_eq!(SpatialPosition::On.inverted(), SpatialPosition::On);
    }
}
