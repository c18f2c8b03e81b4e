//! Two-box planar scenarios.

use super::bounds::Aabb2;
use super::{validate_range, validate_size_range};
use crate::error::ScenarioError;
use normal_core::math::vector::Vec2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::TAU;

/// Generation ranges for [`Scenario2D`].
///
/// Box sizes are full extents per axis. The offset is the distance between
/// the two box centres.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Scenario2DParams {
    /// Smallest box extent per axis
    pub min_size: f64,
    /// Largest box extent per axis
    pub max_size: f64,
    /// Smallest centre distance
    pub min_offset: f64,
    /// Largest centre distance
    pub max_offset: f64,
}

impl Default for Scenario2DParams {
    fn default() -> Self {
        Self {
            min_size: 0.5,
            max_size: 2.0,
            min_offset: 0.5,
            max_offset: 3.0,
        }
    }
}

impl Scenario2DParams {
    /// Checks that both ranges are finite and ordered, sizes strictly
    /// positive and offsets non-negative.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        validate_size_range(self.min_size, self.max_size)?;
        validate_range("offset", self.min_offset, self.max_offset)
    }
}

/// Two axis-aligned rectangles A and B.
///
/// Samplers draw one point from each box; the normal of the connecting line
/// is the sampled direction. A scenario is immutable; `clone()` gives an
/// independent copy with the same bounds, used to run two samplers over the
/// same geometry.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::Vec2;
/// use normal_sampling::scenario::Scenario2D;
///
/// let s = Scenario2D::from_bounds(
///     Vec2::new(1.0, 1.0), Vec2::new(3.0, 2.0),
///     Vec2::new(5.0, 1.0), Vec2::new(7.0, 5.0),
/// ).unwrap();
///
/// let n = s.normalized().unwrap();
/// assert_eq!(n.a().min(), Vec2::new(0.0, 0.0));
/// assert_eq!(n.a().max(), Vec2::new(1.0, 0.5));
/// assert_eq!(s.features().unwrap(), [0.5, 2.0, 0.0, 3.0, 2.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario2D {
    a: Aabb2,
    b: Aabb2,
}

impl Scenario2D {
    /// Number of feature columns.
    pub const FEATURE_COUNT: usize = 5;

    /// Feature column names, in [`features`](Self::features) order.
    pub const FEATURE_COLUMNS: [&'static str; 5] =
        ["A_height", "B_min_x", "B_min_y", "B_max_x", "B_max_y"];

    /// Creates a scenario from two validated boxes.
    #[inline]
    pub fn new(a: Aabb2, b: Aabb2) -> Self {
        Self { a, b }
    }

    /// Creates a scenario from explicit corners.
    pub fn from_bounds(
        a_min: Vec2<f64>,
        a_max: Vec2<f64>,
        b_min: Vec2<f64>,
        b_max: Vec2<f64>,
    ) -> Result<Self, ScenarioError> {
        Ok(Self {
            a: Aabb2::new("A", a_min, a_max)?,
            b: Aabb2::new("B", b_min, b_max)?,
        })
    }

    /// Draws a random scenario.
    ///
    /// A is centred at the origin. B is centred at a uniformly random angle
    /// in `[0, 2π)` and a uniform distance in the offset range. Each box's
    /// extents are uniform in the size range per axis.
    ///
    /// `params` must pass [`Scenario2DParams::validate`]; invalid ranges panic.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &Scenario2DParams) -> Self {
        let sizes = Uniform::new_inclusive(params.min_size, params.max_size);
        let angle = Uniform::new(0.0, TAU).sample(rng);
        let distance = Uniform::new_inclusive(params.min_offset, params.max_offset).sample(rng);
        let offset = Vec2::new(angle.cos(), angle.sin()) * distance;

        let center_a = Vec2::splat(0.0);
        let center_b = center_a + offset;

        let a = Aabb2::centred(center_a, random_size(rng, &sizes));
        let b = Aabb2::centred(center_b, random_size(rng, &sizes));
        Self { a, b }
    }

    /// Box A.
    #[inline]
    pub fn a(&self) -> &Aabb2 {
        &self.a
    }

    /// Box B.
    #[inline]
    pub fn b(&self) -> &Aabb2 {
        &self.b
    }

    /// Translates A's min corner to the origin and scales A's width to 1.
    ///
    /// The uncertainty of a scenario is invariant under this similarity
    /// transform, which removes two degrees of freedom from the features.
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
        })
    }

    /// Normalised feature vector `[A_height, B_min_x, B_min_y, B_max_x, B_max_y]`.
    pub fn features(&self) -> Result<[f64; 5], ScenarioError> {
        let n = self.normalized()?;
        Ok([
            n.a.size().y,
            n.b.min().x,
            n.b.min().y,
            n.b.max().x,
            n.b.max().y,
        ])
    }

    /// Rebuilds the normalised scenario described by a feature vector.
    pub fn from_features(features: &[f64; 5]) -> Result<Self, ScenarioError> {
        super::check_finite(features)?;
        let [a_height, b_min_x, b_min_y, b_max_x, b_max_y] = *features;
        Self::from_bounds(
            Vec2::splat(0.0),
            Vec2::new(1.0, a_height),
            Vec2::new(b_min_x, b_min_y),
            Vec2::new(b_max_x, b_max_y),
        )
    }
}

#[inline]
fn random_size<R: Rng + ?Sized>(rng: &mut R, sizes: &Uniform<f64>) -> Vec2<f64> {
    Vec2::new(sizes.sample(rng), sizes.sample(rng))
}
