//! Boolean operations on rings.
//!
//! Each operation first disposes of the cases that need no walk: disjoint
//! extents, and rings whose boundaries neither cross nor share an edge.
//! Everything else goes through the decomposition walk. When the walk still
//! fails after its defensive fallback, the whole operation is retried once
//! on copies of both rings with a larger, fixed tolerance.
//!
//! # Example
//!
//! ```
//! use ringops::polygon::{intersect, unify, Ring, ShapeKind};
//!
//! let a = Ring::<f64>::rectangle(0.0, 0.0, 1.0, 1.0).unwrap();
//! let b = Ring::rectangle(0.5, 0.5, 1.5, 1.5).unwrap();
//!
//! let both = intersect(&a, &b).unwrap();
//! assert_eq!(both.kind(), ShapeKind::Rectangle);
//! assert!((both.area() - 0.25).abs() < 1e-12);
//!
//! let either = unify(&a, &b).unwrap();
//! assert!((either.area() - 1.75).abs() < 1e-12);
//! ```

use super::decompose::decompose;
use super::interaction::{find_interactions, Operation};
use super::position::SpatialPosition;
use super::ring::Ring;
use super::shape::{ComplexShape, HoledShape, Shape};
use crate::config::BooleanOptions;
use crate::error::{BooleanError, DecompositionFailure};
use crate::tolerance::combined;
use num_traits::Float;

/// Computes `ring - given`.
pub fn differentiate<F: Float>(ring: &Ring<F>, given: &Ring<F>) -> Result<Shape<F>, BooleanError> {
    differentiate_with(ring, given, &BooleanOptions::default())
}

/// Computes `ring - given` with explicit options.
pub fn differentiate_with<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, BooleanError> {
    with_escalation(ring, given, options, "difference", differentiate_once)
}

/// Computes `given - ring`: what is left of `given` once `ring` is removed.
pub fn differentiate_from<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
) -> Result<Shape<F>, BooleanError> {
    differentiate_from_with(ring, given, &BooleanOptions::default())
}

/// Computes `given - ring` with explicit options.
pub fn differentiate_from_with<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, BooleanError> {
    with_escalation(ring, given, options, "difference from", differentiate_from_once)
}

/// Computes the area common to both rings.
pub fn intersect<F: Float>(ring: &Ring<F>, given: &Ring<F>) -> Result<Shape<F>, BooleanError> {
    intersect_with(ring, given, &BooleanOptions::default())
}

/// Computes the intersection with explicit options.
pub fn intersect_with<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, BooleanError> {
    with_escalation(ring, given, options, "intersection", intersect_once)
}

/// Computes the area covered by either ring.
pub fn unify<F: Float>(ring: &Ring<F>, given: &Ring<F>) -> Result<Shape<F>, BooleanError> {
    unify_with(ring, given, &BooleanOptions::default())
}

/// Computes the union with explicit options.
pub fn unify_with<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, BooleanError> {
    with_escalation(ring, given, options, "union", |a, b, o| unify_once(a, b, o, false))
}

/// Computes the area covered by exactly one of the rings: the pieces of
/// `ring - given` followed by the pieces of `given - ring`.
pub fn symmetric_difference<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
) -> Result<Shape<F>, BooleanError> {
    symmetric_difference_with(ring, given, &BooleanOptions::default())
}

/// Computes the symmetric difference with explicit options.
pub fn symmetric_difference_with<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, BooleanError> {
    let mut pieces = differentiate_with(ring, given, options)?.into_components();
    pieces.extend(differentiate_with(given, ring, options)?.into_components());
    Ok(Shape::from_components(pieces))
}

/// Runs `operation`, retrying once on tolerance-escalated copies when it
/// fails and the options allow it.
fn with_escalation<F, Op>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
    name: &str,
    operation: Op,
) -> Result<Shape<F>, BooleanError>
where
    F: Float,
    Op: Fn(&Ring<F>, &Ring<F>, &BooleanOptions) -> Result<Shape<F>, DecompositionFailure>,
{
    let failure = match operation(ring, given, options) {
        Ok(shape) => return Ok(shape),
        Err(failure) => failure,
    };

    if !options.escalate_tolerance {
        log::warn!("{name} failed: {failure}");
        return Err(failure.into());
    }

    let factor = F::from(options.tolerance_factor).unwrap_or_else(|| F::one() + F::one());
    log::debug!(
        "{name} failed ({failure}), retrying with tolerances scaled by {}",
        options.tolerance_factor
    );
    let ring = ring.with_escalated_tolerance(factor);
    let given = given.with_escalated_tolerance(factor);
    operation(&ring, &given, options).map_err(|failure| {
        log::warn!("{name} failed after tolerance retry: {failure}");
        BooleanError::from(failure)
    })
}

fn differentiate_once<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, DecompositionFailure> {
    let tol = combined(ring.tolerance_mode(), given.tolerance_mode());
    if !ring.extent().inner_overlaps(given.extent(), tol) {
        return Ok(Shape::from_ring(ring.clone()));
    }

    let interactions = find_interactions(ring, given, Operation::Difference, false);
    if !interactions.interacted {
        return Ok(match ring.non_crossing_position_of(given) {
            SpatialPosition::On => Shape::Void,
            SpatialPosition::In => {
                Shape::Holed(HoledShape::new(ring.clone(), vec![given.clone()]))
            }
            _ => match given.non_crossing_position_of(ring) {
                SpatialPosition::Out => Shape::from_ring(ring.clone()),
                _ => Shape::Void,
            },
        });
    }

    let fragments = decompose(ring, given, &interactions, Operation::Difference, options)?;
    Ok(Shape::from_rings(fragments))
}

fn differentiate_from_once<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, DecompositionFailure> {
    let tol = combined(ring.tolerance_mode(), given.tolerance_mode());
    if !ring.extent().inner_overlaps(given.extent(), tol) {
        return Ok(Shape::from_ring(given.clone()));
    }

    let interactions = find_interactions(ring, given, Operation::DifferenceFrom, false);
    if !interactions.interacted {
        return Ok(match given.non_crossing_position_of(ring) {
            SpatialPosition::On => Shape::Void,
            SpatialPosition::In => {
                Shape::Holed(HoledShape::new(given.clone(), vec![ring.clone()]))
            }
            _ => match ring.non_crossing_position_of(given) {
                SpatialPosition::Out => Shape::from_ring(given.clone()),
                _ => Shape::Void,
            },
        });
    }

    let fragments = decompose(ring, given, &interactions, Operation::DifferenceFrom, options)?;
    Ok(Shape::from_rings(fragments))
}

fn intersect_once<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
) -> Result<Shape<F>, DecompositionFailure> {
    let tol = combined(ring.tolerance_mode(), given.tolerance_mode());
    if !ring.extent().inner_overlaps(given.extent(), tol) {
        return Ok(Shape::Void);
    }

    let interactions = find_interactions(ring, given, Operation::Intersection, true);
    if !interactions.interacted {
        // Shared edges can hide a crossing from the interaction pass.
        let position = if interactions.contiguous {
            ring.spatial_position_of(given)
        } else {
            ring.non_crossing_position_of(given)
        };
        match position {
            SpatialPosition::In | SpatialPosition::On => return Ok(Shape::from_ring(given.clone())),
            SpatialPosition::Out => {
                return match given.non_crossing_position_of(ring) {
                    SpatialPosition::Out => Ok(Shape::Void),
                    SpatialPosition::In => Ok(Shape::from_ring(ring.clone())),
                    _ => Err(DecompositionFailure::UnresolvedPosition),
                };
            }
            SpatialPosition::PartiallyIn => {}
        }
    }

    let fragments = decompose(ring, given, &interactions, Operation::Intersection, options)?;
    Ok(Shape::from_rings(fragments))
}

fn unify_once<F: Float>(
    ring: &Ring<F>,
    given: &Ring<F>,
    options: &BooleanOptions,
    swapped: bool,
) -> Result<Shape<F>, DecompositionFailure> {
    let tol = combined(ring.tolerance_mode(), given.tolerance_mode());
    if !ring.extent().outer_overlaps(given.extent(), tol) {
        return Ok(disjoint_pair(ring, given));
    }

    let interactions = find_interactions(ring, given, Operation::Union, false);
    if !interactions.interacted {
        return Ok(match ring.non_crossing_position_of(given) {
            SpatialPosition::In | SpatialPosition::On => Shape::from_ring(ring.clone()),
            _ => match given.non_crossing_position_of(ring) {
                SpatialPosition::Out => disjoint_pair(ring, given),
                _ => Shape::from_ring(given.clone()),
            },
        });
    }

    let mut fragments = decompose(ring, given, &interactions, Operation::Union, options)?;
    if fragments.len() == 1 {
        return Ok(Shape::from_rings(fragments));
    }

    // Several boundaries: one of them encloses the others, which are holes.
    let outer = (0..fragments.len()).find(|&i| {
        fragments
            .iter()
            .enumerate()
            .any(|(j, f)| j != i && fragments[i].non_crossing_position_of(f) == SpatialPosition::In)
    });
    match outer {
        Some(i) => {
            let outer = fragments.swap_remove(i);
            Ok(Shape::Holed(HoledShape::new(outer, fragments)))
        }
        None if !swapped => unify_once(given, ring, options, true),
        None => Ok(Shape::Complex(ComplexShape::new(
            fragments.into_iter().map(Shape::from_ring).collect(),
        ))),
    }
}

fn disjoint_pair<F: Float>(ring: &Ring<F>, given: &Ring<F>) -> Shape<F> {
    Shape::Complex(ComplexShape::new(vec![
        Shape::from_ring(ring.clone()),
        Shape::from_ring(given.clone()),
    ]))
}
