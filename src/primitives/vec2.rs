//! 2D vector type for segment directions and offsets.

use num_traits::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2D displacement, typically the direction of a ring segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero())
    }

    /// Returns the dot product.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Z-component of the 3D cross product. Positive when `other` turns
    /// counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Returns the squared length.
    #[inline]
    pub fn magnitude_squared(self) -> F {
        self.dot(self)
    }

    /// Returns the length.
    #[inline]
    pub fn magnitude(self) -> F {
        self.magnitude_squared().sqrt()
    }

    /// Bearing of the vector in radians, in `(-pi, pi]`.
    #[inline]
    pub fn bearing(self) -> F {
        self.y.atan2(self.x)
    }

    /// Returns `true` when the bearing is a multiple of a quarter turn,
    /// within `angle_eps` radians.
    ///
    /// A zero vector has no bearing and is never axis-aligned.
    pub fn is_axis_aligned(self, angle_eps: F) -> bool {
        if self.x == F::zero() && self.y == F::zero() {
            return false;
        }
        let quarter = F::from(std::f64::consts::FRAC_PI_2).unwrap_or_else(F::one);
        let turns = self.bearing() / quarter;
        ((turns - turns.round()) * quarter).abs() <= angle_eps
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn div(self, scalar: F) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<F: Float> Default for Vec2<F> {
    fn default() -> Self {
        Self::zero()
    }
}
