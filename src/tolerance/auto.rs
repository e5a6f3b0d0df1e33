//! Per-ring tolerance.

use crate::error::GeometryError;
use crate::primitives::Point2;
use num_traits::Float;

/// Floor for automatically derived tolerances.
pub const GLOBAL_EPSILON: f64 = 1e-8;

/// Relative factor applied to the largest coordinate magnitude when the
/// tolerance is derived automatically.
pub const MAGNITUDE_FACTOR: f64 = 1e-11;

/// The tolerance attached to a ring.
///
/// An automatic tolerance is recomputed from the coordinates whenever the
/// ring is rebuilt (scaled, rotated, simplified). A fixed tolerance is kept
/// as is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<F> {
    value: F,
    auto: bool,
}

impl<F: Float> Tolerance<F> {
    /// Derives a tolerance from the magnitude of the given coordinates:
    /// `max(GLOBAL_EPSILON, MAGNITUDE_FACTOR * max |coordinate|)`.
    pub fn auto_for<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let magnitude = points
            .into_iter()
            .fold(F::zero(), |acc, p| acc.max(p.x.abs()).max(p.y.abs()));
        let floor = F::from(GLOBAL_EPSILON).unwrap_or_else(F::epsilon);
        let factor = F::from(MAGNITUDE_FACTOR).unwrap_or_else(F::epsilon);
        Self {
            value: floor.max(magnitude * factor),
            auto: true,
        }
    }

    /// A fixed tolerance. Must be finite and strictly positive.
    pub fn fixed(value: F) -> Result<Self, GeometryError> {
        if !value.is_finite() || value <= F::zero() {
            return Err(GeometryError::InvalidTolerance);
        }
        Ok(Self { value, auto: false })
    }

    /// Returns the tolerance value.
    #[inline]
    pub fn value(self) -> F {
        self.value
    }

    /// Returns `true` for a tolerance derived from coordinates.
    #[inline]
    pub fn is_auto(self) -> bool {
        self.auto
    }

    /// Multiplies the tolerance by `factor` and freezes it.
    #[inline]
    pub fn escalated(self, factor: F) -> Self {
        Self {
            value: self.value * factor,
            auto: false,
        }
    }
}

/// Tolerance used for any predicate spanning two operands.
#[inline]
pub fn combined<F: Float>(a: Tolerance<F>, b: Tolerance<F>) -> F {
    a.value().min(b.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_auto_uses_floor_for_small_coordinates() {
        let t = Tolerance::auto_for(vec![Point2::new(0.0_f64, 1.0), Point2::new(-2.0, 3.0)]);
        assert!(t.is_auto());
        assert_relative_eq!(t.value(), GLOBAL_EPSILON);
    }

    #[test]
    fn test_auto_scales_with_magnitude() {
        let t = Tolerance::auto_for(vec![Point2::new(5.0e6_f64, 0.0), Point2::new(0.0, -1.0e7)]);
        assert_relative_eq!(t.value(), 1.0e7 * MAGNITUDE_FACTOR);
    }

    #[test]
    fn test_fixed_rejects_non_positive() {
        assert!(Tolerance::fixed(0.0_f64).is_err());
        assert!(Tolerance::fixed(-1.0_f64).is_err());
        assert!(Tolerance::fixed(f64::NAN).is_err());
        assert_eq!(Tolerance::fixed(0.5_f64).unwrap().value(), 0.5);
    }

    #[test]
    fn test_escalated_freezes() {
        let t = Tolerance::auto_for(vec![Point2::new(1.0_f64, 1.0)]).escalated(2.0);
        assert!(!t.is_auto());
        assert_relative_eq!(t.value(), 2.0 * GLOBAL_EPSILON);
    }

    #[test]
    fn test_combined_takes_minimum() {
        let a = Tolerance::fixed(1e-3_f64).unwrap();
        let b = Tolerance::fixed(1e-6_f64).unwrap();
        assert_eq!(combined(a, b), 1e-6);
    }
}
