//! Plain 2D vector used for positions, velocities and accelerations.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// 2D point/vector value.
///
/// Screen coordinates: `x` grows to the right, `y` grows downward, so a positive
/// `y` acceleration pulls particles toward the bottom of the viewport.
///
/// # Example
///
/// ```
/// use fireworks_core::Vector2;
///
/// let v = Vector2::new(3.0, 4.0).sum(Vector2::new(1.0, 0.0)).scalar(2.0);
/// assert_eq!(v, Vector2::new(8.0, 8.0));
/// assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The origin / zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians, measured from the +x axis toward +y.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    /// Component-wise sum.
    #[inline]
    pub fn sum(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Multiply both components by `s`.
    #[inline]
    pub fn scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Euclidean length.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.sum(rhs)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.sum(rhs);
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scalar(rhs)
    }
}
