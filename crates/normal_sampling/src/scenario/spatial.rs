//! Three-box spatial scenarios.

use super::bounds::Aabb3;
use super::{validate_range, validate_size_range};
use crate::error::ScenarioError;
use normal_core::math::vector::{NormalVector, Vec3};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Squared length window accepted by the direction rejection sampler.
const MIN_DIRECTION_LENGTH_SQ: f64 = 1e-4;
const MAX_DIRECTION_LENGTH_SQ: f64 = 1.0;

/// Generation ranges for [`Scenario3D`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scenario3DParams {
    /// Smallest box extent per axis
    pub min_size: f64,
    /// Largest box extent per axis
    pub max_size: f64,
    /// Smallest distance of B and C from the origin
    pub min_distance: f64,
    /// Largest distance of B and C from the origin
    pub max_distance: f64,
}

impl Default for Scenario3DParams {
    fn default() -> Self {
        Self {
            min_size: 1e-6,
            max_size: 1.0,
            min_distance: 1e-6,
            max_distance: 10.0,
        }
    }
}

impl Scenario3DParams {
    /// Checks that both ranges are finite and ordered, sizes strictly
    /// positive and distances non-negative.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        validate_size_range(self.min_size, self.max_size)?;
        validate_range("distance", self.min_distance, self.max_distance)
    }
}

/// Three axis-aligned boxes A, B and C.
///
/// Samplers draw one point from each box; the normal of the triangle
/// `(pA, pB, pC)` is the sampled direction.
///
/// # Examples
///
/// ```rust
/// use normal_sampling::rng::SamplerRng;
/// use normal_sampling::scenario::{Scenario3D, Scenario3DParams};
///
/// let mut rng = SamplerRng::from_seed(1);
/// let s = Scenario3D::generate(&mut rng, &Scenario3DParams::default());
///
/// let features = s.features().unwrap();
/// let rebuilt = Scenario3D::from_features(&features).unwrap();
/// assert_eq!(rebuilt.a().min().x, 0.0);
/// assert_eq!(rebuilt.a().max().x, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario3D {
    a: Aabb3,
    b: Aabb3,
    c: Aabb3,
}

impl Scenario3D {
    /// Number of feature columns.
    pub const FEATURE_COUNT: usize = 14;

    /// Feature column names, in [`features`](Self::features) order.
    pub const FEATURE_COLUMNS: [&'static str; 14] = [
        "A_h", "A_d", "B_min_x", "B_min_y", "B_min_z", "B_max_x", "B_max_y", "B_max_z",
        "C_min_x", "C_min_y", "C_min_z", "C_max_x", "C_max_y", "C_max_z",
    ];

    /// Creates a scenario from three validated boxes.
    #[inline]
    pub fn new(a: Aabb3, b: Aabb3, c: Aabb3) -> Self {
        Self { a, b, c }
    }

    /// Creates a scenario from explicit corners, given as `(min, max)` pairs.
    pub fn from_bounds(
        a: (Vec3<f64>, Vec3<f64>),
        b: (Vec3<f64>, Vec3<f64>),
        c: (Vec3<f64>, Vec3<f64>),
    ) -> Result<Self, ScenarioError> {
        Ok(Self {
            a: Aabb3::new("A", a.0, a.1)?,
            b: Aabb3::new("B", b.0, b.1)?,
            c: Aabb3::new("C", c.0, c.1)?,
        })
    }

    /// Draws a random scenario.
    ///
    /// A is centred at the origin. The centres of B and C each lie along a
    /// direction rejection-sampled from the unit ball (candidates with
    /// squared length above 1 or below 1e-4 are redrawn) at a uniform
    /// distance in the distance range. Each box's full extents are uniform
    /// in the size range per axis.
    ///
    /// `params` must pass [`Scenario3DParams::validate`]; invalid ranges panic.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &Scenario3DParams) -> Self {
        let sizes = Uniform::new_inclusive(params.min_size, params.max_size);
        let distances = Uniform::new_inclusive(params.min_distance, params.max_distance);

        let center_a = Vec3::splat(0.0);
        let center_b = random_offset(rng, &distances);
        let center_c = random_offset(rng, &distances);

        Self {
            a: Aabb3::centred(center_a, random_size(rng, &sizes)),
            b: Aabb3::centred(center_b, random_size(rng, &sizes)),
            c: Aabb3::centred(center_c, random_size(rng, &sizes)),
        }
    }

    /// Box A.
    #[inline]
    pub fn a(&self) -> &Aabb3 {
        &self.a
    }

    /// Box B.
    #[inline]
    pub fn b(&self) -> &Aabb3 {
        &self.b
    }

    /// Box C.
    #[inline]
    pub fn c(&self) -> &Aabb3 {
        &self.c
    }

    /// Translates A's min corner to the origin and scales A's x-extent to 1.
    pub fn normalized(&self) -> Result<Self, ScenarioError> {
        let width = self.a.max().x - self.a.min().x;
        if !(width > 0.0 && width.is_finite()) {
            return Err(ScenarioError::DegenerateAnchor { width });
        }
        let shift = -self.a.min();
        let scale = 1.0 / width;
        Ok(Self {
            a: self.a.transformed(shift, scale),
            b: self.b.transformed(shift, scale),
            c: self.c.transformed(shift, scale),
        })
    }

    /// Normalised feature vector in [`FEATURE_COLUMNS`](Self::FEATURE_COLUMNS) order.
    pub fn features(&self) -> Result<[f64; 14], ScenarioError> {
        let n = self.normalized()?;
        let a_size = n.a.size();
        let (b_min, b_max) = (n.b.min(), n.b.max());
        let (c_min, c_max) = (n.c.min(), n.c.max());
        Ok([
            a_size.y, a_size.z, b_min.x, b_min.y, b_min.z, b_max.x, b_max.y, b_max.z, c_min.x,
            c_min.y, c_min.z, c_max.x, c_max.y, c_max.z,
        ])
    }

    /// Rebuilds the normalised scenario described by a feature vector.
    ///
    /// A becomes `[(0, 0, 0), (1, A_h, A_d)]`.
    pub fn from_features(features: &[f64; 14]) -> Result<Self, ScenarioError> {
        super::check_finite(features)?;
        let f = features;
        Self::from_bounds(
            (Vec3::splat(0.0), Vec3::new(1.0, f[0], f[1])),
            (Vec3::new(f[2], f[3], f[4]), Vec3::new(f[5], f[6], f[7])),
            (Vec3::new(f[8], f[9], f[10]), Vec3::new(f[11], f[12], f[13])),
        )
    }
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, distances: &Uniform<f64>) -> Vec3<f64> {
    let cube = Uniform::new(-1.0, 1.0);
    let (candidate, length_sq) = loop {
        let v = Vec3::new(cube.sample(rng), cube.sample(rng), cube.sample(rng));
        let length_sq = v.length_squared();
        if (MIN_DIRECTION_LENGTH_SQ..=MAX_DIRECTION_LENGTH_SQ).contains(&length_sq) {
            break (v, length_sq);
        }
    };
    let direction = candidate * (1.0 / length_sq.sqrt());
    direction * distances.sample(rng)
}

fn random_size<R: Rng + ?Sized>(rng: &mut R, sizes: &Uniform<f64>) -> Vec3<f64> {
    Vec3::new(sizes.sample(rng), sizes.sample(rng), sizes.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SamplerRng;
    use approx::assert_relative_eq;

    #[test]
    fn test_generate_respects_ranges() {
        let params = Scenario3DParams::default();
        let mut rng = SamplerRng::from_seed(17);

        for _ in 0..1_000 {
            let s = Scenario3D::generate(&mut rng, &params);
            assert_relative_eq!(s.a().center().length(), 0.0, epsilon = 1e-12);

            for b in [s.a(), s.b(), s.c()] {
                for extent in b.size().to_array() {
                    assert!(extent >= params.min_size - 1e-12);
                    assert!(extent <= params.max_size + 1e-12);
                }
            }
            for b in [s.b(), s.c()] {
                let distance = b.center().length();
                assert!(distance >= params.min_distance - 1e-9);
                assert!(distance <= params.max_distance + 1e-9);
            }
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(Scenario3DParams::default().validate().is_ok());
        let bad = Scenario3DParams {
            max_distance: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ScenarioError::InvalidRange { name: "distance", .. })
        ));

        let zero_size = Scenario3DParams {
            min_size: 0.0,
            max_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_size.validate(),
            Err(ScenarioError::InvalidRange { name: "size", .. })
        ));
    }

    #[test]
    fn test_generate_with_fixed_ranges() {
        let params = Scenario3DParams {
            min_size: 0.25,
            max_size: 0.25,
            min_distance: 3.0,
            max_distance: 3.0,
        };
        let mut rng = SamplerRng::from_seed(8);
        for _ in 0..100 {
            let s = Scenario3D::generate(&mut rng, &params);
            for b in [s.a(), s.b(), s.c()] {
                for extent in b.size().to_array() {
                    assert_relative_eq!(extent, 0.25, epsilon = 1e-12);
                }
            }
            for b in [s.b(), s.c()] {
                assert_relative_eq!(b.center().length(), 3.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_normalization_matches_features() {
        let s = Scenario3D::from_bounds(
            (Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 0.0, 3.0)),
            (Vec3::new(3.0, 1.0, -1.0), Vec3::new(5.0, 3.0, 1.0)),
            (Vec3::new(-1.0, 5.0, 0.0), Vec3::new(0.0, 7.0, 1.0)),
        )
        .unwrap();

        let features = s.features().unwrap();
        assert_eq!(
            features,
            [0.5, 2.0, 2.0, 1.0, 0.0, 3.0, 2.0, 1.0, 0.0, 3.0, 0.5, 0.5, 4.0, 1.0]
        );

        let rebuilt = Scenario3D::from_features(&features).unwrap();
        assert_eq!(rebuilt, s.normalized().unwrap());
    }

    #[test]
    fn test_from_features_rejects_inverted_box() {
        let mut features = [0.5; 14];
        // C_max_x below C_min_x
        features[8] = 2.0;
        features[11] = 1.0;
        assert!(matches!(
            Scenario3D::from_features(&features),
            Err(ScenarioError::InvalidBounds { name: "C", .. })
        ));
    }

    #[test]
    fn test_degenerate_anchor_has_no_features() {
        let s = Scenario3D::from_bounds(
            (Vec3::splat(0.0), Vec3::new(0.0, 1.0, 1.0)),
            (Vec3::splat(1.0), Vec3::splat(2.0)),
            (Vec3::splat(3.0), Vec3::splat(4.0)),
        )
        .unwrap();
        assert!(s.features().is_err());
    }
}
