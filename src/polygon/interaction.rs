//! Crossing and contiguousness extraction between two rings.
//!
//! The output is a pair of augmented point sequences: copies of both rings,
//! oriented for the requested operation, with every interaction point
//! inserted where it belongs along each segment. The sequences are frozen
//! once built so that the walks can address points by index.

use super::ring::{Ring, Winding};
use crate::bounds::Aabb2;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{combined, intersect_segments, point_on_segment, SegmentIntersection};
use num_traits::Float;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The Boolean operation a decomposition is carried out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    /// `self - given`
    Difference,
    /// `given - self`
    DifferenceFrom,
    Intersection,
    Union,
}

impl Operation {
    /// Winding the first operand is walked in.
    pub fn self_winding(self) -> Winding {
        match self {
            Operation::DifferenceFrom => Winding::CounterClockwise,
            _ => Winding::Clockwise,
        }
    }

    /// Winding the second operand is walked in.
    pub fn given_winding(self) -> Winding {
        match self {
            Operation::Difference => Winding::CounterClockwise,
            _ => Winding::Clockwise,
        }
    }
}

/// Augmented copies of two rings and what was found while building them.
#[derive(Debug, Clone)]
pub struct Interactions<F> {
    /// First operand, oriented and augmented. Closed.
    pub self_points: Vec<Point2<F>>,
    /// Second operand, oriented and augmented. Closed.
    pub given_points: Vec<Point2<F>>,
    /// The boundaries cross or share an edge in a way that requires a walk.
    pub interacted: bool,
    /// At least one pair of segments overlaps collinearly.
    pub contiguous: bool,
}

/// Points waiting to be inserted into one segment, keyed by the parameter
/// along that segment.
type Insertions<F> = Vec<Vec<(F, Point2<F>)>>;

/// Finds every crossing and contiguous run between `ring` and `given`.
///
/// Crossings are inserted into both sequences. Both ends of a contiguous
/// run are inserted into each segment they fall inside of. A vertex of one
/// ring touching the interior of a segment of the other is inserted into
/// that segment but does not count as an interaction by itself. When only
/// touches were seen, the rings interact if their boundaries cross.
///
/// With `ignore_simple_contiguousness`, shared edges alone do not mark the
/// rings as interacting.
pub fn find_interactions<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    operation: Operation,
    ignore_simple_contiguousness: bool,
) -> Interactions<F> {
    let tol = combined(ring.tolerance_mode(), given.tolerance_mode());
    let own = oriented(ring, operation.self_winding());
    let other = oriented(given, operation.given_winding());

    let mut own_inserts: Insertions<F> = vec![Vec::new(); own.len() - 1];
    let mut other_inserts: Insertions<F> = vec![Vec::new(); other.len() - 1];
    let mut interacted = false;
    let mut potential = false;
    let mut contiguous = false;

    for (i, w) in own.windows(2).enumerate() {
        let s = Segment2::new(w[0], w[1]);
        let s_box = Aabb2::from_corners(s.start, s.end);

        for (j, v) in other.windows(2).enumerate() {
            let g = Segment2::new(v[0], v[1]);
            if !s_box.outer_overlaps(Aabb2::from_corners(g.start, g.end), tol) {
                continue;
            }

            match intersect_segments(s, g, tol) {
                SegmentIntersection::Crossing { point, t1, t2 } => {
                    own_inserts[i].push((t1, point));
                    other_inserts[j].push((t2, point));
                    interacted = true;
                }
                SegmentIntersection::Contiguous { first, second } => {
                    contiguous = true;
                    if !ignore_simple_contiguousness {
                        interacted = true;
                    }
                    for p in [first, second] {
                        if !s.has_extremity(p, tol) {
                            own_inserts[i].push((s.parameter_of(p), p));
                        }
                        if !g.has_extremity(p, tol) {
                            other_inserts[j].push((g.parameter_of(p), p));
                        }
                    }
                }
                touching => {
                    if let SegmentIntersection::AtExtremity { .. } = touching {
                        potential = true;
                    }
                    if point_on_segment(g.end, s, tol) {
                        potential = true;
                        if !s.links_to(g, tol) {
                            own_inserts[i].push((s.parameter_of(g.end), g.end));
                        }
                    }
                    if point_on_segment(s.end, g, tol) {
                        potential = true;
                        if !g.links_to(s, tol) {
                            other_inserts[j].push((g.parameter_of(s.end), s.end));
                        }
                    }
                }
            }
        }
    }

    if !interacted && potential {
        interacted = ring.crosses(given);
    }

    Interactions {
        self_points: augment(&own, own_inserts, tol),
        given_points: augment(&other, other_inserts, tol),
        interacted,
        contiguous,
    }
}

/// Inserts every vertex of a closed sequence lying inside one of its own
/// segments into that segment.
pub fn insert_self_touch_points<F: Float>(points: &[Point2<F>], tol: F) -> Vec<Point2<F>> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }

    let mut inserts: Insertions<F> = vec![Vec::new(); n - 1];
    for (i, w) in points.windows(2).enumerate() {
        let s = Segment2::new(w[0], w[1]);
        let s_box = Aabb2::from_corners(s.start, s.end);
        for &v in &points[..n - 1] {
            if s_box.contains_point_fuzzy(v, tol)
                && !s.has_extremity(v, tol)
                && point_on_segment(v, s, tol)
            {
                inserts[i].push((s.parameter_of(v), v));
            }
        }
    }
    augment(points, inserts, tol)
}

/// The ring's points travelled in `winding`.
fn oriented<F: Float>(ring: &Ring<F>, winding: Winding) -> Vec<Point2<F>> {
    let mut points = ring.points().to_vec();
    if ring.winding() != winding {
        points.reverse();
    }
    points
}

/// Builds the augmented sequence: each segment's insertions sorted by
/// parameter, with points equal to a neighbour within `tol` skipped.
fn augment<F: Float>(points: &[Point2<F>], inserts: Insertions<F>, tol: F) -> Vec<Point2<F>> {
    let extra: usize = inserts.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(points.len() + extra);

    for (w, mut pending) in points.windows(2).zip(inserts) {
        out.push(w[0]);
        pending.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        let mut last = w[0];
        for (_, p) in pending {
            if p.is_equal_to(last, tol) || p.is_equal_to(w[1], tol) {
                continue;
            }
            out.push(p);
            last = p;
        }
    }
    if let Some(&closing) = points.last() {
        out.push(closing);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::ring::signed_area;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring<f64> {
        Ring::rectangle(x0, y0, x1, y1).unwrap()
    }

    fn has(points: &[Point2<f64>], x: f64, y: f64) -> bool {
        points.iter().any(|p| p.is_equal_to(Point2::new(x, y), 1e-12))
    }

    #[test]
    fn test_orientation_per_operation() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(0.5, 0.5, 1.5, 1.5);

        let union = find_interactions(&a, &b, Operation::Union, false);
        assert!(signed_area(&union.self_points) < 0.0);
        assert!(signed_area(&union.given_points) < 0.0);

        let diff = find_interactions(&a, &b, Operation::Difference, false);
        assert!(signed_area(&diff.self_points) < 0.0);
        assert!(signed_area(&diff.given_points) > 0.0);

        let diff_from = find_interactions(&a, &b, Operation::DifferenceFrom, false);
        assert!(signed_area(&diff_from.self_points) > 0.0);
        assert!(signed_area(&diff_from.given_points) < 0.0);

        let inter = find_interactions(&a, &b, Operation::Intersection, true);
        assert!(signed_area(&inter.self_points) < 0.0);
        assert!(signed_area(&inter.given_points) < 0.0);
    }

    #[test]
    fn test_crossings_inserted_in_both() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(0.5, 0.5, 1.5, 1.5);
        let found = find_interactions(&a, &b, Operation::Intersection, true);

        assert!(found.interacted);
        assert!(!found.contiguous);
        assert_eq!(found.self_points.len(), 7);
        assert_eq!(found.given_points.len(), 7);
        for pts in [&found.self_points, &found.given_points] {
            assert!(has(pts, 1.0, 0.5));
            assert!(has(pts, 0.5, 1.0));
            assert_eq!(pts[0], pts[pts.len() - 1]);
        }
    }

    #[test]
    fn test_no_interaction_for_nested_rings() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        let inner = square(2.0, 2.0, 4.0, 4.0);
        let found = find_interactions(&outer, &inner, Operation::Difference, false);
        assert!(!found.interacted);
        assert_eq!(found.self_points.len(), 5);
        assert_eq!(found.given_points.len(), 5);
    }

    #[test]
    fn test_contiguous_edge() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 0.0, 2.0, 1.0);

        let union = find_interactions(&a, &b, Operation::Union, false);
        assert!(union.interacted);
        assert!(union.contiguous);
        // The shared edge has the same ends on both sides: nothing to insert.
        assert_eq!(union.self_points.len(), 5);

        let inter = find_interactions(&a, &b, Operation::Intersection, true);
        assert!(!inter.interacted);
        assert!(inter.contiguous);
    }

    #[test]
    fn test_partial_contiguous_edge_inserts_run_ends() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(2.0, 0.5, 3.0, 1.5);
        let found = find_interactions(&a, &b, Operation::Union, false);
        assert!(found.interacted);
        assert!(has(&found.self_points, 2.0, 0.5));
        assert!(has(&found.self_points, 2.0, 1.5));
        assert_eq!(found.self_points.len(), 7);
        assert_eq!(found.given_points.len(), 5);
    }

    #[test]
    fn test_t_junction_inserted_without_interaction() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        // A triangle touching the top edge of `a` from above at (1, 2).
        let t = Ring::new(vec![
            Point2::new(1.0, 2.0),
            Point2::new(2.0, 3.0),
            Point2::new(0.0, 3.0),
        ])
        .unwrap();
        let found = find_interactions(&a, &t, Operation::Union, false);
        assert!(!found.interacted);
        assert!(has(&found.self_points, 1.0, 2.0));
        assert_eq!(found.self_points.len(), 6);
    }

    #[test]
    fn test_insert_self_touch_points() {
        // The vertex (1, 0) of the second lobe touches the first segment.
        let points: Vec<Point2<f64>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, -1.0),
            Point2::new(3.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let out = insert_self_touch_points(&points, 1e-9);
        assert_eq!(out.len(), 8);
        assert_eq!(out[1], Point2::new(1.0, 0.0));
    }

    #[test]
    fn test_augment_orders_and_dedupes() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(0.0, 0.0),
        ];
        let inserts = vec![
            vec![
                (0.75, Point2::new(3.0, 0.0)),
                (0.25, Point2::new(1.0, 0.0)),
                (0.25, Point2::new(1.0, 0.0)),
                (1.0, Point2::new(4.0, 0.0)),
            ],
            vec![],
            vec![],
        ];
        let out = augment(&points, inserts, 1e-9);
        assert_eq!(
            out,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(3.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(0.0, 4.0),
                Point2::new(0.0, 0.0),
            ]
        );
    }
}
