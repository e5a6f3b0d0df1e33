//! Defensive decomposition walk.
//!
//! Slower than the fast walk but tolerant of rings that touch themselves or
//! flirt with each other several times along one segment:
//!
//! - self-touch points are inserted into both sequences before walking,
//! - every segment is classified by several samples instead of its midpoint,
//! - both rings carry usage flags, and switching rings searches for an
//!   unused continuation instead of taking the first matching point.
//!
//! Every loop is bounded; running out of budget is reported as a
//! [`DecompositionFailure`].

use super::interaction::insert_self_touch_points;
use super::position::SpatialPosition;
use super::scan::{all_on, fresh_flags, push_point, PointUsage, Sampling, ScanOutput, WalkContext};
use crate::error::DecompositionFailure;
use crate::primitives::Point2;
use num_traits::Float;

/// Position of a trace on the two rings.
#[derive(Debug, Clone, Copy)]
struct Cursor<F> {
    ring: usize,
    test: usize,
    index: usize,
    current: Point2<F>,
}

impl<F> Cursor<F> {
    fn swap(&mut self) {
        std::mem::swap(&mut self.ring, &mut self.test);
    }
}

pub(crate) fn super_scan2<F: Float>(
    ctx: &WalkContext<'_, F>,
) -> Result<ScanOutput<F>, DecompositionFailure> {
    let own = insert_self_touch_points(ctx.points[0], ctx.tolerance);
    let other = insert_self_touch_points(ctx.points[1], ctx.tolerance);
    let ctx = WalkContext {
        points: [own.as_slice(), other.as_slice()],
        ..*ctx
    };

    let n = ctx.len(0);
    let total = n + ctx.len(1);
    let outer_cap = total * ctx.options.outer_loop_factor.max(1);
    let inner_cap = total * ctx.options.inner_loop_factor.max(1);

    let mut flags = [fresh_flags(n), fresh_flags(ctx.len(1))];
    let mut fragments = Vec::new();
    let mut index = 1;
    let mut iterations = 0;

    loop {
        let previous_index = ctx.predecessor(0, index);
        let position = ctx.classify(
            Sampling::Strict,
            1,
            ctx.point(0, previous_index),
            ctx.point(0, index),
        );

        if ctx.is_ill_positioned(0, position) {
            flags[0][index] = PointUsage::Used;
        } else if position == SpatialPosition::On {
            flags[0][index] = PointUsage::OnPoint;
        } else {
            flags[0][index] = PointUsage::Used;
            let points = trace(&ctx, &mut flags, previous_index, index, inner_cap)?;
            flags[0][previous_index] = PointUsage::Used;
            if let Some(ring) = ctx.finish_fragment(points, true) {
                fragments.push(ring);
            }
        }

        match flags[0].iter().position(|&f| f == PointUsage::Unknown) {
            Some(next) => index = next,
            None => break,
        }

        iterations += 1;
        if iterations >= outer_cap {
            return Err(DecompositionFailure::OuterLoopLimit {
                iterations: outer_cap,
            });
        }
    }

    let all_on = fragments.is_empty() && all_on(&flags[0]);
    Ok(ScanOutput { fragments, all_on })
}

fn trace<F: Float>(
    ctx: &WalkContext<'_, F>,
    flags: &mut [Vec<PointUsage>; 2],
    start_index: usize,
    index: usize,
    inner_cap: usize,
) -> Result<Vec<Point2<F>>, DecompositionFailure> {
    let tol = ctx.tolerance;
    let start = ctx.point(0, start_index);
    let mut fragment = vec![start, ctx.point(0, index)];
    let mut cursor = Cursor {
        ring: 0,
        test: 1,
        index,
        current: ctx.point(0, index),
    };

    for _ in 0..inner_cap {
        let previous = cursor.current;
        cursor.index = ctx.successor(cursor.ring, cursor.index);
        cursor.current = ctx.point(cursor.ring, cursor.index);

        let position = ctx.classify(Sampling::Strict, cursor.test, previous, cursor.current);
        let used = flags[cursor.ring][cursor.index] == PointUsage::Used
            && !cursor.current.is_equal_to(start, tol);

        if used || ctx.is_ill_positioned(cursor.ring, position) {
            flags[cursor.ring][cursor.index] = PointUsage::Used;
            change_shape(ctx, flags, &mut cursor, previous)?;
            flags[cursor.ring][cursor.index] = PointUsage::Used;
        } else if position == SpatialPosition::On {
            flags[cursor.ring][cursor.index] = PointUsage::OnPoint;
            change_shape(ctx, flags, &mut cursor, previous)?;
            flags[cursor.ring][cursor.index] = PointUsage::Used;
        } else {
            flags[cursor.ring][cursor.index] = PointUsage::Used;
        }

        push_point(&mut fragment, cursor.current, tol);
        if cursor.current.is_equal_to(start, tol)
            && ctx.closes(
                Sampling::Strict,
                flags,
                cursor.ring,
                cursor.index,
                0,
                start_index,
                start,
            )
        {
            return Ok(fragment);
        }
    }

    Err(DecompositionFailure::InnerLoopLimit {
        iterations: inner_cap,
    })
}

/// Moves the cursor onto the best continuation after `previous`.
///
/// Tries the other ring, then the current one, first refusing segments on
/// the other boundary and then accepting them.
fn change_shape<F: Float>(
    ctx: &WalkContext<'_, F>,
    flags: &[Vec<PointUsage>; 2],
    cursor: &mut Cursor<F>,
    previous: Point2<F>,
) -> Result<(), DecompositionFailure> {
    for accept_on in [false, false, true, true] {
        cursor.swap();
        if let Some(found) = change_to_shape(ctx, flags, cursor.ring, cursor.test, previous, accept_on) {
            cursor.index = ctx.successor(cursor.ring, found);
            cursor.current = ctx.point(cursor.ring, cursor.index);
            return Ok(());
        }
    }
    Err(DecompositionFailure::MissingContinuation)
}

/// Looks on ring `ring` for an occurrence of `previous` whose outgoing
/// segment may be followed.
///
/// Unused occurrences are tried first. When none is left, any occurrence
/// whose next point is unused is considered.
fn change_to_shape<F: Float>(
    ctx: &WalkContext<'_, F>,
    flags: &[Vec<PointUsage>; 2],
    ring: usize,
    test: usize,
    previous: Point2<F>,
    accept_on: bool,
) -> Option<usize> {
    let tol = ctx.tolerance;
    let n = ctx.len(ring);
    let usage = &flags[ring];
    let matches = |i: usize| ctx.point(ring, i).is_equal_to(previous, tol);

    let mut last_index: Option<usize> = None;
    let mut last_desperate: Option<usize> = None;

    loop {
        let from = last_index.map_or(0, |i| i + 1);
        let mut candidate = (from..n - 1).find(|&i| usage[i] != PointUsage::Used && matches(i));

        if candidate.is_none() {
            let from = last_desperate.map_or(0, |i| i + 1);
            for i in from..n - 1 {
                last_desperate = Some(i);
                let next = ctx.successor(ring, i);
                if Some(i) != last_index && matches(i) && usage[next] != PointUsage::Used {
                    candidate = Some(i);
                    break;
                }
            }
        }

        let i = candidate?;
        last_index = Some(i);
        let next = ctx.successor(ring, i);
        let position = ctx.classify(Sampling::Strict, test, ctx.point(ring, i), ctx.point(ring, next));
        if (accept_on || position != SpatialPosition::On) && !ctx.is_ill_positioned(ring, position) {
            return Some(i);
        }
    }
}
