//! Fuzzy scalar comparisons.
//!
//! Two values are equal when they differ by no more than the tolerance.
//! The ordering predicates are consistent with that equality: `fuzzy_lt`
//! is true only when `a` is below `b` by more than the tolerance.

use num_traits::Float;

/// Returns `true` if `a` and `b` differ by at most `tolerance`.
#[inline]
pub fn fuzzy_eq<F: Float>(a: F, b: F, tolerance: F) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns `true` if `a` is below `b` by more than `tolerance`.
#[inline]
pub fn fuzzy_lt<F: Float>(a: F, b: F, tolerance: F) -> bool {
    a < b - tolerance
}

/// Returns `true` if `a` is above `b` by more than `tolerance`.
#[inline]
pub fn fuzzy_gt<F: Float>(a: F, b: F, tolerance: F) -> bool {
    a > b + tolerance
}

/// Returns `true` unless `a` is above `b` by more than `tolerance`.
#[inline]
pub fn fuzzy_le<F: Float>(a: F, b: F, tolerance: F) -> bool {
    a <= b + tolerance
}

/// Returns `true` unless `a` is below `b` by more than `tolerance`.
#[inline]
pub fn fuzzy_ge<F: Float>(a: F, b: F, tolerance: F) -> bool {
    a >= b - tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_band() {
        assert!(fuzzy_eq(1.0, 1.0 + 5e-9, 1e-8));
        assert!(!fuzzy_eq(1.0, 1.0 + 5e-8, 1e-8));
    }

    #[test]
    fn test_orderings_exclude_the_band() {
        let tol = 1e-8;
        assert!(!fuzzy_lt(1.0, 1.0 + 5e-9, tol));
        assert!(fuzzy_lt(1.0, 1.1, tol));
        assert!(!fuzzy_gt(1.0 + 5e-9, 1.0, tol));
        assert!(fuzzy_gt(1.1, 1.0, tol));
    }

    #[test]
    fn test_inclusive_orderings_include_the_band() {
        let tol = 1e-8;
        assert!(fuzzy_le(1.0 + 5e-9, 1.0, tol));
        assert!(!fuzzy_le(1.1, 1.0, tol));
        assert!(fuzzy_ge(1.0 - 5e-9, 1.0, tol));
        assert!(!fuzzy_ge(0.9, 1.0, tol));
    }
}
