//! Angle conversions and angular differences between directions.
//!
//! Every inverse cosine in this module is taken of a clamped argument, so
//! dot products that overshoot `[-1, 1]` through rounding never produce NaN.

use super::vector::NormalVector;
use num_traits::{clamp, Float, FloatConst, NumCast, One, Zero};

/// Converts degrees to radians.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::angular::to_radians;
///
/// assert!((to_radians(180.0_f64) - std::f64::consts::PI).abs() < 1e-15);
/// ```
#[inline]
pub fn to_radians<T: Float + FloatConst>(degrees: T) -> T {
    degrees * (T::PI() / <T as NumCast>::from(180.0).unwrap_or_else(T::one))
}

/// Converts radians to degrees.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::angular::to_degrees;
///
/// assert!((to_degrees(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
/// ```
#[inline]
pub fn to_degrees<T: Float + FloatConst>(radians: T) -> T {
    radians * (<T as NumCast>::from(180.0).unwrap_or_else(T::one) / T::PI())
}

/// Unsigned angle in radians between two arbitrary non-zero vectors.
///
/// The dot product is divided by the product of the lengths and clamped to
/// `[-1, 1]`. The length product is one square root of the product of the
/// squared lengths, so `(v, v)` gives exactly zero and `(v, -v)` exactly π.
/// When either vector is (numerically) zero the angle is defined as zero.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::angular::unsigned_angular_difference;
/// use normal_core::math::vector::Vec3;
///
/// let v = Vec3::new(2.0_f64, -1.0, 0.5);
/// assert_eq!(unsigned_angular_difference(v, v), 0.0);
/// assert!((unsigned_angular_difference(v, -v) - std::f64::consts::PI).abs() < 1e-7);
/// ```
pub fn unsigned_angular_difference<V: NormalVector>(u: V, v: V) -> V::Scalar {
    let length = (u.length_squared() * v.length_squared()).sqrt();
    let min_length = <V::Scalar as NumCast>::from(1e-10).unwrap_or_else(V::Scalar::epsilon);
    if length < min_length {
        return V::Scalar::zero();
    }
    let cosine = u.dot(v) / length;
    clamp(cosine, -V::Scalar::one(), V::Scalar::one()).acos()
}

/// Unsigned angle in radians between two unit vectors.
///
/// Skips the length normalisation of [`unsigned_angular_difference`]; the
/// caller guarantees unit inputs. The dot product is still clamped.
#[inline]
pub fn unsigned_unit_angular_difference<V: NormalVector>(u: V, v: V) -> V::Scalar {
    clamp(u.dot(v), -V::Scalar::one(), V::Scalar::one()).acos()
}
