//! Affine transforms applied to rings as a whole.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D affine transform stored as a 2x3 row-major matrix.
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// Ring builders (`scaled`, `rotated`, `translated`) are expressed through
/// this type so that every coordinate mutation goes through one path that
/// rebuilds the ring's cached extent, winding and tolerance.
///
/// # Example
///
/// ```
/// use ringops::primitives::{Affine2, Point2};
/// use std::f64::consts::FRAC_PI_2;
///
/// let quarter_turn = Affine2::rotation_around(FRAC_PI_2, Point2::new(1.0, 1.0));
/// let p = quarter_turn.apply_point(Point2::new(2.0, 1.0));
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    pub a: F,
    pub b: F,
    pub c: F,
    pub d: F,
    pub tx: F,
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    /// Creates a transform from its matrix components.
    #[inline]
    pub fn new(a: F, b: F, c: F, d: F, tx: F, ty: F) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), F::zero(), F::zero())
    }

    /// A pure translation.
    #[inline]
    pub fn translation(offset: Vec2<F>) -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), offset.x, offset.y)
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos, F::zero(), F::zero())
    }

    /// Counter-clockwise rotation by `angle` radians about `center`.
    pub fn rotation_around(angle: F, center: Point2<F>) -> Self {
        Self::translation(-center.to_vec())
            .then(Self::rotation(angle))
            .then(Self::translation(center.to_vec()))
    }

    /// Non-uniform scaling about `center`.
    pub fn scale_xy_around(sx: F, sy: F, center: Point2<F>) -> Self {
        Self::translation(-center.to_vec())
            .then(Self::new(sx, F::zero(), F::zero(), sy, F::zero(), F::zero()))
            .then(Self::translation(center.to_vec()))
    }

    /// Uniform scaling about `center`.
    #[inline]
    pub fn scale_around(factor: F, center: Point2<F>) -> Self {
        Self::scale_xy_around(factor, factor, center)
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Returns a transform that applies `self` first, then `next`.
    pub fn then(&self, next: Self) -> Self {
        Self {
            a: next.a * self.a + next.b * self.c,
            b: next.a * self.b + next.b * self.d,
            c: next.c * self.a + next.d * self.c,
            d: next.c * self.b + next.d * self.d,
            tx: next.a * self.tx + next.b * self.ty + next.tx,
            ty: next.c * self.tx + next.d * self.ty + next.ty,
        }
    }

    /// Determinant of the linear part. Negative values flip winding.
    #[inline]
    pub fn determinant(&self) -> F {
        self.a * self.d - self.b * self.c
    }
}

impl<F: Float> Default for Affine2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t: Affine2<f64> = Affine2::identity();
        let p = Point2::new(3.0, -2.0);
        assert_eq!(t.apply_point(p), p);
        assert_eq!(t.determinant(), 1.0);
    }

    #[test]
    fn test_rotation_around_center() {
        let t: Affine2<f64> = Affine2::rotation_around(FRAC_PI_2, Point2::new(1.0, 0.0));
        let p = t.apply_point(Point2::new(2.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_around_keeps_center_fixed() {
        let center = Point2::new(5.0, 5.0);
        let t: Affine2<f64> = Affine2::scale_around(3.0, center);
        assert_eq!(t.apply_point(center), center);

        let p = t.apply_point(Point2::new(6.0, 5.0));
        assert_relative_eq!(p.x, 8.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn test_mirror_has_negative_determinant() {
        let t: Affine2<f64> = Affine2::scale_xy_around(-1.0, 1.0, Point2::origin());
        assert!(t.determinant() < 0.0);
    }

    #[test]
    fn test_then_order() {
        let t: Affine2<f64> =
            Affine2::translation(Vec2::new(1.0, 0.0)).then(Affine2::rotation(FRAC_PI_2));
        let p = t.apply_point(Point2::origin());
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }
}
