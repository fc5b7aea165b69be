//! Single-precision 2-D vector type.
//!
//! `Vec2` uses `f32` components to match the single-precision arithmetic of
//! the collision-avoidance engines this workspace drives.  All operations
//! are plain Euclidean geometry; there is no SIMD and no generic scalar —
//! the hot loops here are memory-bound linear scans, not math-bound.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2-D point or direction vector.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians from the positive x-axis.
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self { x: angle.cos(), y: angle.sin() }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared Euclidean length.  Prefer this over `length` in comparisons;
    /// it avoids the square root.
    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f32 {
        (other - self).length_sq()
    }

    /// Unit vector in the same direction, or `Vec2::ZERO` if `self` has zero
    /// length.  The zero-vector case matters: steering code normalizes
    /// `goal - position` and an arrived agent must not produce NaN drift.
    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2 { x: self.x / len, y: self.y / len }
        } else {
            Vec2::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
