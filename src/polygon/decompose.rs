//! Operation dispatcher: turns a pair of interacting rings into the rings
//! bounding the result of a Boolean operation.

use super::interaction::{Interactions, Operation};
use super::position::SpatialPosition;
use super::ring::Ring;
use super::scan::{super_scan, ScanOutput, WalkContext};
use crate::config::BooleanOptions;
use crate::error::DecompositionFailure;
use num_traits::Float;

/// Decomposes `ring` against `given` for `operation`.
///
/// `interactions` must come from [`super::interaction::find_interactions`]
/// called with the same operands and operation. The returned rings are
/// disjoint or nested; assembling them into a shape is up to the caller.
pub(crate) fn decompose<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    interactions: &Interactions<F>,
    operation: Operation,
    options: &BooleanOptions,
) -> Result<Vec<Ring<F>>, DecompositionFailure> {
    let own = interactions.self_points.as_slice();
    let other = interactions.given_points.as_slice();

    let forward = |want_inside: [bool; 2]| -> Result<ScanOutput<F>, DecompositionFailure> {
        super_scan(&WalkContext::new([ring, given], [own, other], want_inside, options))
    };
    let backward = |want_inside: [bool; 2]| -> Result<ScanOutput<F>, DecompositionFailure> {
        super_scan(&WalkContext::new([given, ring], [other, own], want_inside, options))
    };

    match operation {
        Operation::Difference => Ok(forward([false, true])?.fragments),

        Operation::DifferenceFrom => {
            let out = forward([true, false])?;
            if !out.fragments.is_empty() {
                return Ok(out.fragments);
            }
            // The walk from the other side, as a plain difference.
            Ok(backward([false, true])?.fragments)
        }

        Operation::Intersection => {
            let out = forward([true, true])?;
            if !out.fragments.is_empty() {
                return Ok(out.fragments);
            }
            let swapped = backward([true, true])?;
            if !swapped.fragments.is_empty() {
                return Ok(swapped.fragments);
            }
            if out.all_on || swapped.all_on {
                Ok(vec![given.clone()])
            } else {
                Ok(Vec::new())
            }
        }

        Operation::Union => {
            let out = forward([false, false])?;
            if !out.fragments.is_empty() {
                return Ok(out.fragments);
            }
            let given_position = ring.non_crossing_position_of(given);
            if matches!(given_position, SpatialPosition::In | SpatialPosition::On) {
                Ok(vec![ring.clone()])
            } else if given.non_crossing_position_of(ring) == SpatialPosition::In {
                Ok(vec![given.clone()])
            } else {
                Ok(vec![ring.clone(), given.clone()])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::interaction::find_interactions;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring<f64> {
        Ring::rectangle(x0, y0, x1, y1).unwrap()
    }

    fn run(a: &Ring<f64>, b: &Ring<f64>, op: Operation) -> Vec<Ring<f64>> {
        let found = find_interactions(a, b, op, op == Operation::Intersection);
        decompose(a, b, &found, op, &BooleanOptions::default()).unwrap()
    }

    fn total_area(rings: &[Ring<f64>]) -> f64 {
        rings.iter().map(|r| r.area()).sum()
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(0.5, 0.5, 1.5, 1.5);
        assert_relative_eq!(total_area(&run(&a, &b, Operation::Intersection)), 0.25, epsilon = 1e-12);
        assert_relative_eq!(total_area(&run(&a, &b, Operation::Union)), 1.75, epsilon = 1e-12);
        assert_relative_eq!(total_area(&run(&a, &b, Operation::Difference)), 0.75, epsilon = 1e-12);
        assert_relative_eq!(
            total_area(&run(&a, &b, Operation::DifferenceFrom)),
            0.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_difference_from_is_mirrored_difference() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(0.5, 0.5, 1.5, 1.5);
        let pieces = run(&a, &b, Operation::DifferenceFrom);
        assert_eq!(pieces.len(), 1);
        // What is left of `b` lies outside `a`.
        assert!(pieces[0].contains(pointf(1.25, 1.25)));
        assert!(!pieces[0].contains(pointf(0.75, 0.75)));
    }

    #[test]
    fn test_difference_from_falls_back_to_backward_walk() {
        let a = Ring::new(vec![pointf(0.0, 0.0), pointf(2.0, 0.0), pointf(0.0, 2.0)]).unwrap();
        let b = Ring::new(vec![pointf(2.0, 0.0), pointf(2.0, 2.0), pointf(0.0, 2.0)]).unwrap();
        let found = find_interactions(&a, &b, Operation::DifferenceFrom, false);
        assert!(found.interacted);

        // No part of `a` lies inside `b`: the forward walk finds nothing.
        let options = BooleanOptions::default();
        let forward = super_scan(&WalkContext::new(
            [&a, &b],
            [found.self_points.as_slice(), found.given_points.as_slice()],
            [true, false],
            &options,
        ))
        .unwrap();
        assert!(forward.fragments.is_empty());

        let pieces = decompose(&a, &b, &found, Operation::DifferenceFrom, &options).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_relative_eq!(pieces[0].area(), 2.0, epsilon = 1e-12);
        assert!(pieces[0].contains(pointf(1.5, 1.5)));
    }

    #[test]
    fn test_equal_rings_intersection_returns_given() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let pieces = run(&a, &a.reversed(), Operation::Intersection);
        assert_eq!(pieces.len(), 1);
        assert_relative_eq!(pieces[0].area(), 1.0);
    }

    #[test]
    fn test_union_of_equal_rings_keeps_one() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let pieces = run(&a, &a.clone(), Operation::Union);
        assert_eq!(pieces.len(), 1);
        assert_relative_eq!(pieces[0].area(), 1.0);
    }

    fn pointf(x: f64, y: f64) -> crate::primitives::Point2<f64> {
        crate::primitives::Point2::new(x, y)
    }
}
