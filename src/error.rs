//! Error types for ring construction and Boolean operations.

use thiserror::Error;

/// Errors raised when building a ring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A ring needs at least three distinct points.
    #[error("ring needs at least 3 distinct points, got {count}")]
    TooFewPoints {
        /// Number of distinct points supplied.
        count: usize,
    },

    /// The ring encloses no area within its tolerance.
    #[error("ring has zero area within tolerance")]
    ZeroArea,

    /// Tolerances must be finite and strictly positive.
    #[error("tolerance must be finite and positive")]
    InvalidTolerance,
}

/// Internal failure of a decomposition walk.
///
/// The fast walk recovers from these by switching to the defensive walk;
/// the Boolean wrappers recover by retrying once with doubled tolerances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompositionFailure {
    /// The outer scan did not visit every point within its budget.
    #[error("outer scan exceeded {iterations} iterations")]
    OuterLoopLimit {
        /// Budget that was exhausted.
        iterations: usize,
    },

    /// A fragment trace did not close within its budget.
    #[error("fragment trace exceeded {iterations} iterations")]
    InnerLoopLimit {
        /// Budget that was exhausted.
        iterations: usize,
    },

    /// No ring offered an acceptable continuation at a switch point.
    #[error("no continuation found when switching rings")]
    MissingContinuation,

    /// The operands' relative position could not be settled.
    #[error("spatial position of operands could not be resolved")]
    UnresolvedPosition,
}

/// Errors surfaced by Boolean operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BooleanError {
    /// Decomposition still failed after the tolerance-doubling retry.
    #[error("decomposition failed: {0}")]
    Decomposition(#[from] DecompositionFailure),

    /// Holed and complex operands are not accepted by the ring kernel.
    #[error("unsupported operand: {kind} shape")]
    UnsupportedOperand {
        /// Kind of the rejected operand.
        kind: &'static str,
    },
}
