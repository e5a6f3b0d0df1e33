//! Tuning knobs for Boolean operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for the Boolean operations on rings and shapes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BooleanOptions {
    /// Retry once on tolerance-scaled copies of both operands when
    /// decomposition fails.
    pub escalate_tolerance: bool,

    /// Multiplier applied to each operand's tolerance on that retry.
    pub tolerance_factor: f64,

    /// Outer scan budget of the defensive walk, per point of both
    /// augmented rings.
    pub outer_loop_factor: usize,

    /// Fragment trace budget, per point of both augmented rings. Also bounds
    /// the fast walk.
    pub inner_loop_factor: usize,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            escalate_tolerance: true,
            tolerance_factor: 2.0,
            outer_loop_factor: 50,
            inner_loop_factor: 5,
        }
    }
}

impl BooleanOptions {
    /// Options with the tolerance retry disabled.
    pub fn without_escalation() -> Self {
        Self {
            escalate_tolerance: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = BooleanOptions::default();
        assert!(o.escalate_tolerance);
        assert_eq!(o.tolerance_factor, 2.0);
        assert_eq!(o.outer_loop_factor, 50);
        assert_eq!(o.inner_loop_factor, 5);
        assert!(!BooleanOptions::without_escalation().escalate_tolerance);
    }
}
