//! Normal uncertainty metric.
//!
//! U_f is the circular root-mean-square angle between each sampled normal
//! and their mean direction:
//!
//! ```text
//! mean = normalize(Σ nᵢ)
//! U_f  = sqrt( (1/N) Σ arccos(clamp(nᵢ · mean, -1, 1))² )
//! ```
//!
//! in radians. Inputs are assumed to be unit vectors.

use crate::sampler::SamplingStrategy;
use normal_core::math::angular::{to_degrees, unsigned_unit_angular_difference};
use normal_core::math::vector::NormalVector;
use num_traits::{Float, FloatConst, One, Zero};

/// Computes U_f in radians.
///
/// Returns zero for an empty slice. When the normals cancel out exactly the
/// mean direction is undefined; the result is then π/2, the smallest RMS
/// deviation any direction achieves for a set of antipodal pairs.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::Vec2;
/// use normal_sampling::metric::normal_uncertainty;
///
/// let same = vec![Vec2::new(0.0_f64, 1.0); 10];
/// assert_eq!(normal_uncertainty(&same), 0.0);
///
/// let empty: Vec<Vec2<f64>> = Vec::new();
/// assert_eq!(normal_uncertainty(&empty), 0.0);
///
/// let quarter = [Vec2::new(1.0_f64, 0.0), Vec2::new(0.0, 1.0)];
/// assert!((normal_uncertainty(&quarter) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
/// ```
pub fn normal_uncertainty<V>(normals: &[V]) -> V::Scalar
where
    V: NormalVector,
    V::Scalar: FloatConst,
{
    if normals.is_empty() {
        return V::Scalar::zero();
    }

    let sum = normals.iter().fold(V::zero(), |acc, &n| acc + n);
    let mean = match sum.try_normalize() {
        Some(mean) => mean,
        None => return V::Scalar::FRAC_PI_2(),
    };

    // Count in the scalar type so no integer cast can fail.
    let (sum_sq, count) = normals.iter().fold(
        (V::Scalar::zero(), V::Scalar::zero()),
        |(acc, count), &n| {
            let angle = unsigned_unit_angular_difference(n, mean);
            (acc + angle * angle, count + V::Scalar::one())
        },
    );
    (sum_sq / count).sqrt()
}

/// Computes U_f in degrees.
#[inline]
pub fn normal_uncertainty_degrees<V>(normals: &[V]) -> V::Scalar
where
    V: NormalVector,
    V::Scalar: FloatConst,
{
    to_degrees(normal_uncertainty(normals))
}

/// Computes U_f of everything a strategy has sampled so far.
#[inline]
pub fn strategy_uncertainty<S: SamplingStrategy>(sampler: &S) -> f64 {
    normal_uncertainty(sampler.normal_history().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use normal_core::math::vector::{Vec2, Vec3};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_identical_normals_have_zero_uncertainty() {
        let normals = vec![Vec3::new(0.0_f64, 0.0, 1.0); 1_000];
        assert_eq!(normal_uncertainty(&normals), 0.0);

        // Rounding in the mean leaves at most a tiny residual
        let normals = vec![Vec3::new(0.0_f64, 0.6, 0.8); 1_000];
        assert_abs_diff_eq!(normal_uncertainty(&normals), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_empty_history_is_zero() {
        let normals: [Vec3<f64>; 0] = [];
        assert_eq!(normal_uncertainty(&normals), 0.0);
        assert_eq!(normal_uncertainty_degrees(&normals), 0.0);
    }

    #[test]
    fn test_symmetric_fan() {
        // Normals at ±θ around +y: every deviation is θ
        let theta = 0.3_f64;
        let normals = [
            Vec2::new(theta.sin(), theta.cos()),
            Vec2::new(-theta.sin(), theta.cos()),
        ];
        assert_relative_eq!(normal_uncertainty(&normals), theta, epsilon = 1e-12);
        assert_relative_eq!(
            normal_uncertainty_degrees(&normals),
            theta.to_degrees(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_rms_of_unequal_deviations() {
        // Mean is +x; deviations 0, +θ, -θ
        let theta = 0.5_f64;
        let normals = [
            Vec2::new(1.0, 0.0),
            Vec2::new(theta.cos(), theta.sin()),
            Vec2::new(theta.cos(), -theta.sin()),
        ];
        let expected = (2.0 * theta * theta / 3.0).sqrt();
        assert_relative_eq!(normal_uncertainty(&normals), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_cancelling_normals() {
        let normals = [Vec2::new(1.0_f64, 0.0), Vec2::new(-1.0, 0.0)];
        assert_eq!(normal_uncertainty(&normals), FRAC_PI_2);
    }

    #[test]
    fn test_single_precision_averages_over_every_normal() {
        // Mean is +y; one normal at 0.4 rad, three aligned
        let theta = 0.4_f32;
        let mut normals = vec![Vec2::new(0.0_f32, 1.0); 3];
        normals.push(Vec2::new(theta.sin(), theta.cos()));
        let mean_angle = theta.sin().atan2(3.0 + theta.cos());
        let expected = ((3.0 * mean_angle * mean_angle
            + (theta - mean_angle) * (theta - mean_angle))
            / 4.0)
            .sqrt();
        assert_relative_eq!(normal_uncertainty(&normals), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_bounded_by_pi() {
        let normals = [
            Vec3::new(1.0_f64, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let u = normal_uncertainty(&normals);
        assert!(u > 0.0 && u <= PI);
    }
}
