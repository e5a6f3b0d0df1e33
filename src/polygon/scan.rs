//! Fast decomposition walk.
//!
//! The walk follows the first operand's augmented sequence and switches to
//! the second one wherever the boundary leaves the region the operation
//! keeps. Every closed circuit it traces becomes one output fragment.
//! Configurations the fast walk cannot settle (a missing switch point, an
//! ambiguous boundary run, a runaway trace) hand over to the defensive walk
//! in [`super::scan2`].

use super::position::{
    classify_point, classify_segment_midpoint, classify_segment_strict, SpatialPosition,
};
use super::ring::Ring;
use super::scan2;
use crate::config::BooleanOptions;
use crate::error::DecompositionFailure;
use crate::primitives::Point2;
use crate::tolerance::Tolerance;
use num_traits::Float;

/// Per-point bookkeeping of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointUsage {
    Unknown,
    OnPoint,
    Used,
}

/// How a segment is tested against the other ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sampling {
    Midpoint,
    ThreeTier,
    Strict,
}

/// Fragments produced by a walk.
#[derive(Debug, Clone)]
pub(crate) struct ScanOutput<F> {
    pub fragments: Vec<Ring<F>>,
    /// Every segment of the first operand lies on the second operand's
    /// boundary. Only meaningful when `fragments` is empty.
    pub all_on: bool,
}

/// The two operands as seen by a walk. Index 0 is the operand being
/// decomposed, index 1 the one it is tested against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkContext<'a, F> {
    pub shapes: [&'a Ring<F>; 2],
    pub points: [&'a [Point2<F>]; 2],
    /// Whether each operand's kept boundary lies inside the other operand.
    pub want_inside: [bool; 2],
    pub tolerance: F,
    /// Tolerance mode given to fragments.
    pub fragment_tolerance: Tolerance<F>,
    pub options: &'a BooleanOptions,
}

impl<'a, F: Float> WalkContext<'a, F> {
    /// Pairs the operands with their augmented point lists.
    pub fn new(
        shapes: [&'a Ring<F>; 2],
        points: [&'a [Point2<F>]; 2],
        want_inside: [bool; 2],
        options: &'a BooleanOptions,
    ) -> Self {
        let tolerance = shapes[0].tolerance().min(shapes[1].tolerance());
        let fragment_tolerance = if shapes[0].is_auto_tolerance() {
            shapes[0].tolerance_mode()
        } else {
            Tolerance::fixed(tolerance).unwrap_or_else(|_| shapes[0].tolerance_mode())
        };
        Self {
            shapes,
            points,
            want_inside,
            tolerance,
            fragment_tolerance,
            options,
        }
    }

    /// Number of augmented points of ring `ring`, closing point included.
    pub fn len(&self, ring: usize) -> usize {
        self.points[ring].len()
    }

    /// Augmented point `index` of ring `ring`.
    pub fn point(&self, ring: usize, index: usize) -> Point2<F> {
        self.points[ring][index]
    }

    /// Tests the segment `a`-`b` of the ring not numbered `against`.
    pub fn classify(&self, sampling: Sampling, against: usize, a: Point2<F>, b: Point2<F>) -> SpatialPosition {
        let ring = self.shapes[against];
        match sampling {
            Sampling::Midpoint => classify_point(ring, a.midpoint(b), self.tolerance),
            Sampling::ThreeTier => classify_segment_midpoint(ring, a, b, self.tolerance),
            Sampling::Strict => classify_segment_strict(ring, a, b, self.tolerance),
        }
    }

    /// The position is on the side ring `ring` must not keep.
    pub fn is_ill_positioned(&self, ring: usize, position: SpatialPosition) -> bool {
        match position {
            SpatialPosition::In => !self.want_inside[ring],
            SpatialPosition::Out => self.want_inside[ring],
            _ => false,
        }
    }

    /// The position is on the side ring `ring` keeps.
    pub fn is_well_positioned(&self, ring: usize, position: SpatialPosition) -> bool {
        match position {
            SpatialPosition::In => self.want_inside[ring],
            SpatialPosition::Out => !self.want_inside[ring],
            _ => false,
        }
    }

    /// Index following `index` in ring `ring`, skipping the closing point.
    pub fn successor(&self, ring: usize, index: usize) -> usize {
        if index + 2 >= self.len(ring) {
            0
        } else {
            index + 1
        }
    }

    /// Index preceding `index`, skipping the closing point.
    pub fn predecessor(&self, ring: usize, index: usize) -> usize {
        if index == 0 {
            self.len(ring) - 2
        } else {
            index - 1
        }
    }

    /// First index of ring `ring` holding `p`, closing point excluded.
    pub fn find(&self, ring: usize, p: Point2<F>) -> Option<usize> {
        let n = self.len(ring);
        self.points[ring][..n - 1]
            .iter()
            .position(|q| q.is_equal_to(p, self.tolerance))
    }

    /// Decides whether a trace that has come back to its start coordinate
    /// is finished.
    ///
    /// It is when it stands on the very start point. Otherwise it is when
    /// the way on is blocked: the next point is already used, or the next
    /// segment lies on the wrong side or on the other boundary.
    #[allow(clippy::too_many_arguments)]
    pub fn closes(
        &self,
        sampling: Sampling,
        flags: &[Vec<PointUsage>; 2],
        ring: usize,
        index: usize,
        start_ring: usize,
        start_index: usize,
        start: Point2<F>,
    ) -> bool {
        if ring == start_ring && index == start_index {
            return true;
        }
        let next = self.successor(ring, index);
        let next_point = self.point(ring, next);
        if flags[ring][next] == PointUsage::Used && !next_point.is_equal_to(start, self.tolerance) {
            return true;
        }
        let position = self.classify(sampling, 1 - ring, self.point(ring, index), next_point);
        position == SpatialPosition::On || self.is_ill_positioned(ring, position)
    }

    /// Turns a traced point list into a fragment ring.
    ///
    /// The last point is snapped onto the first. Degenerate traces give
    /// `None`.
    pub fn finish_fragment(&self, mut points: Vec<Point2<F>>, drop_needles: bool) -> Option<Ring<F>> {
        if points.len() > 2 {
            let first = points[0];
            let last = points.len() - 1;
            points[last] = first;
        }
        if drop_needles {
            points = super::ring::remove_needles(points, self.tolerance);
        }
        match Ring::from_fragment(points, self.fragment_tolerance) {
            Ok(ring) => Some(ring.simplified()),
            Err(err) => {
                log::debug!("dropping degenerate fragment: {err}");
                None
            }
        }
    }
}

/// Appends `p` to a trace, folding back a step that returns to the point
/// before last.
pub(crate) fn push_point<F: Float>(trace: &mut Vec<Point2<F>>, p: Point2<F>, tol: F) {
    let n = trace.len();
    if n >= 2 && p.is_equal_to(trace[n - 2], tol) {
        trace.truncate(n - 2);
    }
    trace.push(p);
}

/// Every segment of the first operand was found on the other boundary.
pub(crate) fn all_on(flags: &[PointUsage]) -> bool {
    let n = flags.len();
    n > 1 && flags[..n - 1].iter().all(|&f| f == PointUsage::OnPoint)
}

/// Fresh usage flags for a closed sequence: the closing point starts used.
pub(crate) fn fresh_flags(len: usize) -> Vec<PointUsage> {
    let mut flags = vec![PointUsage::Unknown; len];
    if let Some(last) = flags.last_mut() {
        *last = PointUsage::Used;
    }
    flags
}

/// Runs the fast walk, falling back to the defensive one when it meets an
/// irregular configuration or finds nothing.
pub(crate) fn super_scan<F: Float>(
    ctx: &WalkContext<'_, F>,
) -> Result<ScanOutput<F>, DecompositionFailure> {
    let walk = fast_walk(ctx);
    if !walk.irregular && !walk.fragments.is_empty() {
        return Ok(ScanOutput {
            fragments: walk.fragments,
            all_on: false,
        });
    }

    if all_on(&walk.flags) {
        return Ok(ScanOutput {
            fragments: Vec::new(),
            all_on: true,
        });
    }

    log::debug!(
        "fast walk {} over {}+{} points, switching to defensive walk",
        if walk.irregular { "irregular" } else { "found nothing" },
        ctx.len(0),
        ctx.len(1)
    );
    scan2::super_scan2(ctx)
}

struct FastWalk<F> {
    fragments: Vec<Ring<F>>,
    flags: Vec<PointUsage>,
    irregular: bool,
}

fn fast_walk<F: Float>(ctx: &WalkContext<'_, F>) -> FastWalk<F> {
    let n = ctx.len(0);
    let mut flags = [fresh_flags(n), fresh_flags(ctx.len(1))];
    let mut fragments = Vec::new();
    let mut irregular = false;
    let mut index = 1;

    loop {
        let previous_index = ctx.predecessor(0, index);
        let position = ctx.classify(
            Sampling::Midpoint,
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
            match trace(ctx, &mut flags, previous_index, index) {
                Some(points) => {
                    if let Some(ring) = ctx.finish_fragment(points, false) {
                        fragments.push(ring);
                    }
                }
                None => {
                    irregular = true;
                    break;
                }
            }
        }

        match flags[0].iter().position(|&f| f == PointUsage::Unknown) {
            Some(next) => index = next,
            None => break,
        }
    }

    let [own, _] = flags;
    FastWalk {
        fragments,
        flags: own,
        irregular,
    }
}

/// Traces one fragment starting with the segment ending at `index` of the
/// first operand. `None` marks an irregular configuration.
fn trace<F: Float>(
    ctx: &WalkContext<'_, F>,
    flags: &mut [Vec<PointUsage>; 2],
    start_index: usize,
    index: usize,
) -> Option<Vec<Point2<F>>> {
    let tol = ctx.tolerance;
    let point_cap = ctx.len(0) + ctx.len(1);
    let step_cap = point_cap * ctx.options.inner_loop_factor.max(1);

    let start = ctx.point(0, start_index);
    let mut fragment = vec![start, ctx.point(0, index)];
    let (mut ring, mut test) = (0usize, 1usize);
    let mut index = index;
    let mut current = ctx.point(0, index);

    for _ in 0..step_cap {
        let previous = current;
        index = ctx.successor(ring, index);
        current = ctx.point(ring, index);

        if ring == 0 && flags[0][index] == PointUsage::Used && !current.is_equal_to(start, tol) {
            std::mem::swap(&mut ring, &mut test);
            index = ctx.successor(ring, ctx.find(ring, previous)?);
            current = ctx.point(ring, index);
            if ring == 0 {
                flags[0][index] = PointUsage::Used;
            }
        } else {
            let position = ctx.classify(Sampling::ThreeTier, test, previous, current);

            if ctx.is_ill_positioned(ring, position) {
                if ring == 0 {
                    flags[0][index] = PointUsage::Used;
                }
                std::mem::swap(&mut ring, &mut test);
                index = ctx.successor(ring, ctx.find(ring, previous)?);
                current = ctx.point(ring, index);
                if ring == 0 {
                    flags[0][index] = PointUsage::Used;
                }
            } else if position == SpatialPosition::On {
                let from = switch_candidate(ctx, flags, test, previous)?;
                let to = ctx.successor(test, from);
                let ahead = ctx.point(test, to);
                let alternate = ctx.classify(Sampling::Midpoint, ring, ctx.point(test, from), ahead);
                if ring == 0 {
                    flags[0][index] = PointUsage::Used;
                }
                if !ctx.is_well_positioned(test, alternate) {
                    return None;
                }
                std::mem::swap(&mut ring, &mut test);
                index = to;
                current = ahead;
                if ring == 0 {
                    flags[0][index] = PointUsage::Used;
                }
            } else if ring == 0 {
                flags[0][index] = PointUsage::Used;
            }
        }

        push_point(&mut fragment, current, tol);
        if fragment.len() > point_cap {
            return None;
        }
        if current.is_equal_to(start, tol)
            && ctx.closes(Sampling::ThreeTier, flags, ring, index, 0, start_index, start)
        {
            return Some(fragment);
        }
    }
    None
}

/// Where the walk would resume on ring `ring` after `p`. On the first
/// operand, an occurrence whose point is not yet used is preferred.
fn switch_candidate<F: Float>(
    ctx: &WalkContext<'_, F>,
    flags: &[Vec<PointUsage>; 2],
    ring: usize,
    p: Point2<F>,
) -> Option<usize> {
    let first = ctx.find(ring, p)?;
    if ring != 0 || flags[0][first] != PointUsage::Used {
        return Some(first);
    }
    let n = ctx.len(ring);
    let second = (first + 1..n - 1).find(|&i| ctx.point(ring, i).is_equal_to(p, ctx.tolerance));
    Some(second.unwrap_or(first))
}
