//! Epsilon-aware comparisons and geometric predicates.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod auto;
mod fuzzy;
mod predicates;

pub use auto::{combined, Tolerance, GLOBAL_EPSILON, MAGNITUDE_FACTOR};
pub use fuzzy::{fuzzy_eq, fuzzy_ge, fuzzy_gt, fuzzy_le, fuzzy_lt};
pub use predicates::{
    intersect_segments, orient2d, point_on_segment, Orientation, SegmentIntersection,
};
