//! Closed point rings and their geometric properties.

use crate::bounds::Aabb2;
use crate::error::GeometryError;
use crate::primitives::{Affine2, Point2, Segment2, Vec2};
use crate::tolerance::{intersect_segments, orient2d, Orientation, SegmentIntersection, Tolerance};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angular slack used when recognizing axis-aligned edges.
const RECTANGLE_ANGLE_EPSILON: f64 = 1e-8;

/// Direction of travel along a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Winding {
    /// Negative signed area.
    Clockwise,
    /// Positive signed area.
    CounterClockwise,
}

impl Winding {
    /// Returns the opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// A simple polygon boundary stored as a closed point sequence.
///
/// The first point is repeated at the end, so a triangle holds four points.
/// Rings are immutable: every builder returns a new value with its extent,
/// winding and (automatic) tolerance recomputed.
///
/// # Example
///
/// ```
/// use ringops::polygon::{Ring, Winding};
/// use ringops::primitives::Point2;
///
/// let ring = Ring::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 3.0),
/// ])
/// .unwrap();
///
/// assert_eq!(ring.len(), 4);
/// assert_eq!(ring.area(), 6.0);
/// assert_eq!(ring.winding(), Winding::CounterClockwise);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<F> {
    points: Vec<Point2<F>>,
    tolerance: Tolerance<F>,
    extent: Aabb2<F>,
    winding: Winding,
}

impl<F: Float> Ring<F> {
    /// Builds a ring with an automatic tolerance.
    ///
    /// The list may be open or closed. A last point within tolerance of the
    /// first one is snapped onto it; otherwise the first point is appended.
    /// Consecutive duplicates are dropped.
    pub fn new(points: Vec<Point2<F>>) -> Result<Self, GeometryError> {
        let tolerance = Tolerance::auto_for(points.iter().copied());
        Self::assemble(points, tolerance)
    }

    /// Builds a ring with a fixed tolerance.
    pub fn with_tolerance(points: Vec<Point2<F>>, tolerance: F) -> Result<Self, GeometryError> {
        Self::assemble(points, Tolerance::fixed(tolerance)?)
    }

    /// Builds the counter-clockwise rectangle spanning the given bounds.
    pub fn rectangle(xmin: F, ymin: F, xmax: F, ymax: F) -> Result<Self, GeometryError> {
        if !(xmax > xmin && ymax > ymin) {
            return Err(GeometryError::ZeroArea);
        }
        Self::new(vec![
            Point2::new(xmin, ymin),
            Point2::new(xmax, ymin),
            Point2::new(xmax, ymax),
            Point2::new(xmin, ymax),
        ])
    }

    /// Builds the rectangle covering an extent.
    pub fn from_extent(extent: &Aabb2<F>) -> Result<Self, GeometryError> {
        Self::rectangle(extent.min.x, extent.min.y, extent.max.x, extent.max.y)
    }

    /// Builds a ring from points produced by a walk, keeping the tolerance
    /// mode of `tolerance`: automatic tolerances are recomputed.
    pub(crate) fn from_fragment(
        points: Vec<Point2<F>>,
        tolerance: Tolerance<F>,
    ) -> Result<Self, GeometryError> {
        Self::assemble(points, tolerance)
    }

    fn assemble(mut points: Vec<Point2<F>>, tolerance: Tolerance<F>) -> Result<Self, GeometryError> {
        let tolerance = if tolerance.is_auto() {
            Tolerance::auto_for(points.iter().copied())
        } else {
            tolerance
        };
        let tol = tolerance.value();

        let first = match points.first() {
            Some(&p) => p,
            None => return Err(GeometryError::TooFewPoints { count: 0 }),
        };
        points.dedup_by(|b, a| b.is_equal_to(*a, tol));
        let n = points.len();
        if n > 1 && points[n - 1].is_equal_to(first, tol) {
            points[n - 1] = first;
        } else {
            points.push(first);
        }

        let distinct = points.len() - 1;
        if distinct < 3 {
            return Err(GeometryError::TooFewPoints { count: distinct });
        }

        let area = signed_area(&points);
        if area.abs() <= tol * tol {
            return Err(GeometryError::ZeroArea);
        }

        Ok(Self::from_parts(points, tolerance, area))
    }

    /// Wraps an already validated closed point list.
    fn from_parts(points: Vec<Point2<F>>, tolerance: Tolerance<F>, area: F) -> Self {
        let tolerance = if tolerance.is_auto() {
            Tolerance::auto_for(points.iter().copied())
        } else {
            tolerance
        };
        let extent = Aabb2::from_points(points.iter().copied())
            .unwrap_or_else(|| Aabb2::new(Point2::origin(), Point2::origin()));
        let winding = if area < F::zero() {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        };
        Self {
            points,
            tolerance,
            extent,
            winding,
        }
    }

    /// Applies an affine transform to every point.
    ///
    /// A singular transform collapses the ring and gives
    /// [`GeometryError::ZeroArea`].
    pub fn transformed(&self, transform: &Affine2<F>) -> Result<Self, GeometryError> {
        if transform.determinant() == F::zero() {
            return Err(GeometryError::ZeroArea);
        }
        let points = self.points.iter().map(|&p| transform.apply_point(p)).collect();
        Self::assemble(points, self.tolerance)
    }

    /// Scales uniformly around `origin`.
    pub fn scaled(&self, factor: F, origin: Point2<F>) -> Result<Self, GeometryError> {
        self.transformed(&Affine2::scale_around(factor, origin))
    }

    /// Scales each axis independently around `origin`.
    pub fn scaled_xy(&self, fx: F, fy: F, origin: Point2<F>) -> Result<Self, GeometryError> {
        self.transformed(&Affine2::scale_xy_around(fx, fy, origin))
    }

    /// Rotates counter-clockwise by `angle` radians around `origin`.
    pub fn rotated(&self, angle: F, origin: Point2<F>) -> Result<Self, GeometryError> {
        self.transformed(&Affine2::rotation_around(angle, origin))
    }

    /// Moves every point by `offset`.
    pub fn translated(&self, offset: Vec2<F>) -> Result<Self, GeometryError> {
        self.transformed(&Affine2::translation(offset))
    }

    /// Returns the same boundary travelled the other way.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            tolerance: self.tolerance,
            extent: self.extent,
            winding: self.winding.reversed(),
        }
    }

    /// Removes collinear points, never going below a triangle.
    pub fn simplified(&self) -> Self {
        let points = simplify_points(&self.points, self.tolerance.value());
        let area = signed_area(&points);
        Self::from_parts(points, self.tolerance, area)
    }

    /// Removes repeated vertices and fold-back spikes.
    pub fn without_needles(&self) -> Result<Self, GeometryError> {
        let points = remove_needles(self.points.clone(), self.tolerance.value());
        Self::assemble(points, self.tolerance)
    }

    /// Replaces the tolerance with a fixed value.
    pub fn with_fixed_tolerance(&self, tolerance: F) -> Result<Self, GeometryError> {
        Ok(Self {
            tolerance: Tolerance::fixed(tolerance)?,
            ..self.clone()
        })
    }

    /// Copy whose tolerance is multiplied by `factor` and frozen.
    pub(crate) fn with_escalated_tolerance(&self, factor: F) -> Self {
        Self {
            tolerance: self.tolerance.escalated(factor),
            ..self.clone()
        }
    }

    /// The closed point list; the last point equals the first.
    #[inline]
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    /// Number of stored points, closing point included.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a valid ring has at least four points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the tolerance value in use.
    #[inline]
    pub fn tolerance(&self) -> F {
        self.tolerance.value()
    }

    /// Returns `true` if the tolerance follows the coordinates.
    #[inline]
    pub fn is_auto_tolerance(&self) -> bool {
        self.tolerance.is_auto()
    }

    #[inline]
    pub(crate) fn tolerance_mode(&self) -> Tolerance<F> {
        self.tolerance
    }

    /// Returns the bounding box.
    #[inline]
    pub fn extent(&self) -> Aabb2<F> {
        self.extent
    }

    /// Returns the direction of travel.
    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Iterates over the boundary segments in travel order.
    pub fn segments(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        self.points.windows(2).map(|w| Segment2::new(w[0], w[1]))
    }

    /// Shoelace area: positive for counter-clockwise rings.
    pub fn signed_area(&self) -> F {
        signed_area(&self.points)
    }

    /// Returns the unsigned enclosed area.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the total boundary length.
    pub fn perimeter(&self) -> F {
        self.segments().fold(F::zero(), |acc, s| acc + s.length())
    }

    /// Returns `true` if every turn, the wrap-around one included, goes the
    /// same way within tolerance.
    pub fn is_convex(&self) -> bool {
        let tol = self.tolerance.value();
        let n = self.points.len();
        let mut left = false;
        let mut right = false;
        for i in 0..n - 1 {
            let a = if i == 0 { self.points[n - 2] } else { self.points[i - 1] };
            match orient2d(a, self.points[i], self.points[i + 1], tol) {
                Orientation::CounterClockwise => left = true,
                Orientation::Clockwise => right = true,
                Orientation::Collinear => {}
            }
            if left && right {
                return false;
            }
        }
        true
    }

    /// Returns `true` for a four-cornered ring with axis-aligned edges.
    pub fn represents_rectangle(&self) -> bool {
        let eps = F::from(RECTANGLE_ANGLE_EPSILON).unwrap_or_else(F::epsilon);
        self.points.len() == 5 && self.segments().all(|s| s.direction().is_axis_aligned(eps))
    }

    /// Returns `true` if two non-adjacent segments cross each other.
    pub fn is_self_crossing(&self) -> bool {
        let tol = self.tolerance.value();
        let segments: Vec<Segment2<F>> = self.segments().collect();
        let m = segments.len();
        for i in 0..m {
            for j in i + 2..m {
                if i == 0 && j == m - 1 {
                    continue;
                }
                if let SegmentIntersection::Crossing { .. } =
                    intersect_segments(segments[i], segments[j], tol)
                {
                    return true;
                }
            }
        }
        false
    }
}

/// Shoelace formula over a closed point list.
pub(crate) fn signed_area<F: Float>(points: &[Point2<F>]) -> F {
    let twice = points
        .windows(2)
        .fold(F::zero(), |acc, w| acc + w[0].x * w[1].y - w[1].x * w[0].y);
    twice / (F::one() + F::one())
}

/// Collinear-point removal over a closed point list.
///
/// Interior triplets are measured from the last kept point so that long
/// collinear runs collapse in one pass. The wrap-around triplet is checked
/// separately.
fn simplify_points<F: Float>(points: &[Point2<F>], tol: F) -> Vec<Point2<F>> {
    let n = points.len();
    if n <= 4 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    kept.push(points[0]);
    for i in 1..n - 1 {
        let anchor = kept[kept.len() - 1];
        let v1 = points[i] - anchor;
        let v2 = points[i + 1] - anchor;
        let scale = v1.magnitude().max(v2.magnitude());
        let remaining = n - i - 1;
        if v1.cross(v2).abs() <= scale * tol && kept.len() + remaining >= 4 {
            continue;
        }
        kept.push(points[i]);
    }
    kept.push(points[0]);

    let m = kept.len();
    if m > 4 {
        let v1 = kept[0] - kept[m - 2];
        let v2 = kept[1] - kept[0];
        let scale = v1.magnitude().max(v2.magnitude());
        if v1.cross(v2).abs() <= scale * tol && v1.dot(v2) > F::zero() {
            kept.remove(0);
            let first = kept[0];
            if let Some(last) = kept.last_mut() {
                *last = first;
            }
        }
    }
    kept
}

/// Drops repeated vertices and spikes from a closed point list, restarting
/// after every removal.
pub(crate) fn remove_needles<F: Float>(mut points: Vec<Point2<F>>, tol: F) -> Vec<Point2<F>> {
    'restart: loop {
        let n = points.len();
        if n < 4 {
            return points;
        }
        for i in 0..n - 1 {
            let previous = if i == 0 { points[n - 2] } else { points[i - 1] };
            let current = points[i];
            let next = points[i + 1];

            let v1 = current - previous;
            let v2 = next - current;
            let scale = v1.magnitude().max(v2.magnitude());
            let folds = v1.cross(v2).abs() <= scale * tol && v1.dot(v2) < F::zero();

            if current.is_equal_to(next, tol) || folds {
                points.remove(i);
                if i == 0 {
                    let first = points[0];
                    if let Some(last) = points.last_mut() {
                        *last = first;
                    }
                }
                continue 'restart;
            }
        }
        return points;
    }
}
