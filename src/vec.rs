//! Three-component vector used for positions, velocities, and forces.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::Deserialize;

/// Deserializes from a three-element sequence, e.g. `[0.0, -9.8, 0.0]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[F; 3]", bound(deserialize = ""))]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    /// Measured as `(other - self).length()`, the same expression spring
    /// forces use, so rest and current lengths of an unmoved spring agree.
    pub fn distance(self, other: Self) -> F {
        (other - self).length()
    }

    /// Unit vector in the same direction together with the original length,
    /// or `None` when the length is within `epsilon` of zero.
    pub fn normalize_with_length(self, epsilon: F) -> Option<(Self, F)> {
        let len = self.length();
        if len.is_near_zero(epsilon) {
            None
        } else {
            Some((Vec3 { x: self.x / len, y: self.y / len, z: self.z / len }, len))
        }
    }

    /// Unit vector in the same direction, or `None` when the length is
    /// within `epsilon` of zero.
    pub fn try_normalize(self, epsilon: F) -> Option<Self> {
        self.normalize_with_length(epsilon).map(|(unit, _)| unit)
    }
}

impl<F: Float> From<[F; 3]> for Vec3<F> {
    fn from([x, y, z]: [F; 3]) -> Self { Vec3 { x, y, z } }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> AddAssign for Vec3<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> SubAssign for Vec3<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}
