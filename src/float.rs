//! Scalar abstraction so the cloth runs in either precision.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::de::DeserializeOwned;

/// Scalar type of the cloth: `f32` or `f64`.
///
/// `Send + Sync` so node buffers can be shared with rayon workers.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Send
    + Sync
    + DeserializeOwned
    + core::fmt::Debug
    + core::fmt::Display
    + 'static
{
    /// The additive identity.
    fn zero() -> Self;
    /// The multiplicative identity.
    fn one() -> Self;
    /// 0.5, for half extents and kinetic energy.
    fn half() -> Self;
    /// Machine epsilon: the gap between 1 and the next representable value.
    fn epsilon() -> Self;
    /// Square root (libm).
    fn sqrt(self) -> Self;
    /// Absolute value (libm).
    fn abs(self) -> Self;
    /// The smaller of two values; `self` on ties.
    fn min(self, other: Self) -> Self;
    /// Largest integer value not above `self` (libm).
    fn floor(self) -> Self;
    /// Lossless widening from f32.
    fn from_f32(v: f32) -> Self;
    /// Convert from f64, rounding to nearest for `f32`. Used for constants
    /// and configuration defaults so `f64` keeps their full precision.
    fn from_f64(v: f64) -> Self;
    /// Convert to f64, for counts and logging.
    fn to_f64(self) -> f64;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// `|self| < epsilon`.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

macro_rules! impl_float {
    ($t:ty, $sqrt:path, $fabs:path, $floor:path) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn epsilon() -> Self { <$t>::EPSILON }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn abs(self) -> Self { $fabs(self) }
            fn min(self, other: Self) -> Self { if other < self { other } else { self } }
            fn floor(self) -> Self { $floor(self) }
            fn from_f32(v: f32) -> Self { Self::from(v) }
            fn from_f64(v: f64) -> Self { v as $t }
            fn to_f64(self) -> f64 { f64::from(self) }
            fn is_finite(self) -> bool { <$t>::is_finite(self) }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::fabsf, libm::floorf);
impl_float!(f64, libm::sqrt, libm::fabs, libm::floor);
