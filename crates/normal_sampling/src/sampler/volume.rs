//! Samplers that draw points from the interior of every box.
//!
//! One attempt reads one point of the unit hypercube from a
//! [`PointSequence`] and maps consecutive coordinates onto the boxes:
//! `A.x, A.y, B.x, B.y` in 2D and `A.xyz, B.xyz, C.xyz` in 3D. The choice
//! of sequence gives the strategy:
//!
//! | Sequence | 2D alias | 3D alias |
//! |----------|----------|----------|
//! | [`RandomSequence`] | [`BasicSampler2D`] | [`BasicSampler3D`] |
//! | [`HaltonSequence`] | [`HaltonSampler2D`] | [`HaltonSampler3D`] |
//! | [`CachedHaltonSequence`] | [`CachedHaltonSampler2D`] | [`CachedHaltonSampler3D`] |
//!
//! Attempts whose unnormalised normal has a squared length at or below the
//! degeneracy threshold are not recorded and do not count towards the
//! requested number of samples; the sequence still advances past them.

use super::{NormalHistory, SamplingStrategy};
use crate::error::SamplingError;
use crate::rng::{RandomSequence, SamplerRng};
use crate::scenario::{Scenario2D, Scenario3D};
use normal_core::math::vector::{NormalVector, Vec2, Vec3};
use normal_core::sequence::{
    CachedHaltonSequence, HaltonSequence, PlanarHaltonCache, PointSequence, SpatialHaltonCache,
};
use rand::RngCore;
use std::sync::Arc;

/// Squared length at or below which a 2D line normal is degenerate.
pub const DEGENERATE_THRESHOLD_2D: f64 = 1e-5;

/// Squared length at or below which a 3D triangle normal is degenerate.
pub const DEGENERATE_THRESHOLD_3D: f64 = 1e-6;

/// Consecutive degenerate attempts after which `sample` gives up.
///
/// A scenario whose boxes are too small or too close for any attempt to
/// clear the threshold would otherwise never return.
pub const MAX_CONSECUTIVE_DEGENERATE: usize = 10_000;

/// Pseudo-random 2D sampler.
pub type BasicSampler2D<R = SamplerRng> = VolumeSampler2D<RandomSequence<R>>;
/// Halton 2D sampler.
pub type HaltonSampler2D = VolumeSampler2D<HaltonSequence>;
/// Cached Halton 2D sampler.
pub type CachedHaltonSampler2D = VolumeSampler2D<CachedHaltonSequence<4>>;

/// Pseudo-random 3D sampler.
pub type BasicSampler3D<R = SamplerRng> = VolumeSampler3D<RandomSequence<R>>;
/// Halton 3D sampler.
pub type HaltonSampler3D = VolumeSampler3D<HaltonSequence>;
/// Cached Halton 3D sampler.
pub type CachedHaltonSampler3D = VolumeSampler3D<CachedHaltonSequence<9>>;

/// Line-normal sampler over a [`Scenario2D`].
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::{NormalVector, Vec2};
/// use normal_sampling::sampler::{HaltonSampler2D, SamplingStrategy};
/// use normal_sampling::scenario::Scenario2D;
///
/// let scenario = Scenario2D::from_bounds(
///     Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0),
///     Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0),
/// ).unwrap();
///
/// let mut sampler = HaltonSampler2D::halton(scenario);
/// assert_eq!(sampler.sample(500), 500);
///
/// // Points run up and to the right, so normals point up and to the left
/// let average = sampler.average_normal().unwrap();
/// assert!(average.x < 0.0 && average.y > 0.0);
/// assert!((average.length() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct VolumeSampler2D<S> {
    scenario: Scenario2D,
    sequence: S,
    history: NormalHistory<Vec2<f64>>,
    attempts: u64,
}

impl<S: PointSequence> VolumeSampler2D<S> {
    /// Coordinates consumed per attempt.
    pub const POINT_DIMENSION: usize = 4;

    /// Creates a sampler reading coordinates from `sequence`.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::SequenceDimension` if the sequence yields
    /// fewer than four coordinates per point.
    pub fn with_sequence(scenario: Scenario2D, sequence: S) -> Result<Self, SamplingError> {
        if sequence.dimension() < Self::POINT_DIMENSION {
            return Err(SamplingError::SequenceDimension {
                required: Self::POINT_DIMENSION,
                actual: sequence.dimension(),
            });
        }
        Ok(Self::from_parts(scenario, sequence))
    }

    fn from_parts(scenario: Scenario2D, sequence: S) -> Self {
        Self {
            scenario,
            sequence,
            history: NormalHistory::new(),
            attempts: 0,
        }
    }

    /// The sampled scenario.
    #[inline]
    pub fn scenario(&self) -> &Scenario2D {
        &self.scenario
    }

    /// Total attempts so far, degenerate ones included.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// The underlying point sequence.
    #[inline]
    pub fn sequence(&self) -> &S {
        &self.sequence
    }
}

impl<R: RngCore> VolumeSampler2D<RandomSequence<R>> {
    /// Creates a pseudo-random sampler drawing from `rng`.
    pub fn random(scenario: Scenario2D, rng: R) -> Self {
        Self::from_parts(scenario, RandomSequence::new(rng, 4))
    }
}

impl VolumeSampler2D<HaltonSequence> {
    /// Creates a Halton sampler over bases `{2, 3, 5, 7}` starting at index 1.
    pub fn halton(scenario: Scenario2D) -> Self {
        Self::from_parts(scenario, HaltonSequence::planar())
    }
}

impl VolumeSampler2D<CachedHaltonSequence<4>> {
    /// Creates a sampler reading the planar cache from entry 0.
    ///
    /// The cache is initialised here if it was not already.
    pub fn cached_halton(scenario: Scenario2D, cache: Arc<PlanarHaltonCache>) -> Self {
        Self::from_parts(scenario, CachedHaltonSequence::new(cache))
    }
}

impl<S: PointSequence> SamplingStrategy for VolumeSampler2D<S> {
    type Normal = Vec2<f64>;

    fn sample(&mut self, count: usize) -> usize {
        let mut added = 0;
        let mut degenerate_run = 0;

        while added < count {
            let t = self.sequence.next_point();
            let pa = self.scenario.a().point_at(t[0], t[1]);
            let pb = self.scenario.b().point_at(t[2], t[3]);
            self.attempts += 1;

            let normal = (pb - pa).perp();
            if normal.length_squared() > DEGENERATE_THRESHOLD_2D {
                self.history.push(normal.normalize());
                added += 1;
                degenerate_run = 0;
            } else {
                degenerate_run += 1;
                if degenerate_run >= MAX_CONSECUTIVE_DEGENERATE {
                    break;
                }
            }
        }
        added
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Vec2<f64>> {
        &self.history
    }
}

/// Triangle-normal sampler over a [`Scenario3D`].
///
/// The normal of the triangle `(pA, pB, pC)` is `(pB - pA) × (pC - pA)`.
#[derive(Clone, Debug)]
pub struct VolumeSampler3D<S> {
    scenario: Scenario3D,
    sequence: S,
    history: NormalHistory<Vec3<f64>>,
    attempts: u64,
}

impl<S: PointSequence> VolumeSampler3D<S> {
    /// Coordinates consumed per attempt.
    pub const POINT_DIMENSION: usize = 9;

    /// Creates a sampler reading coordinates from `sequence`.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::SequenceDimension` if the sequence yields
    /// fewer than nine coordinates per point.
    pub fn with_sequence(scenario: Scenario3D, sequence: S) -> Result<Self, SamplingError> {
        if sequence.dimension() < Self::POINT_DIMENSION {
            return Err(SamplingError::SequenceDimension {
                required: Self::POINT_DIMENSION,
                actual: sequence.dimension(),
            });
        }
        Ok(Self::from_parts(scenario, sequence))
    }

    fn from_parts(scenario: Scenario3D, sequence: S) -> Self {
        Self {
            scenario,
            sequence,
            history: NormalHistory::new(),
            attempts: 0,
        }
    }

    /// The sampled scenario.
    #[inline]
    pub fn scenario(&self) -> &Scenario3D {
        &self.scenario
    }

    /// Total attempts so far, degenerate ones included.
    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// The underlying point sequence.
    #[inline]
    pub fn sequence(&self) -> &S {
        &self.sequence
    }
}

impl<R: RngCore> VolumeSampler3D<RandomSequence<R>> {
    /// Creates a pseudo-random sampler drawing from `rng`.
    pub fn random(scenario: Scenario3D, rng: R) -> Self {
        Self::from_parts(scenario, RandomSequence::new(rng, 9))
    }
}

impl VolumeSampler3D<HaltonSequence> {
    /// Creates a Halton sampler over the first nine primes starting at index 1.
    pub fn halton(scenario: Scenario3D) -> Self {
        Self::from_parts(scenario, HaltonSequence::spatial())
    }
}

impl VolumeSampler3D<CachedHaltonSequence<9>> {
    /// Creates a sampler reading the spatial cache from entry 0.
    pub fn cached_halton(scenario: Scenario3D, cache: Arc<SpatialHaltonCache>) -> Self {
        Self::from_parts(scenario, CachedHaltonSequence::new(cache))
    }
}

impl<S: PointSequence> SamplingStrategy for VolumeSampler3D<S> {
    type Normal = Vec3<f64>;

    fn sample(&mut self, count: usize) -> usize {
        let mut added = 0;
        let mut degenerate_run = 0;

        while added < count {
            let t = self.sequence.next_point();
            let pa = self.scenario.a().point_at(t[0], t[1], t[2]);
            let pb = self.scenario.b().point_at(t[3], t[4], t[5]);
            let pc = self.scenario.c().point_at(t[6], t[7], t[8]);
            self.attempts += 1;

            let normal = (pb - pa).cross(pc - pa);
            if normal.length_squared() > DEGENERATE_THRESHOLD_3D {
                self.history.push(normal.normalize());
                added += 1;
                degenerate_run = 0;
            } else {
                degenerate_run += 1;
                if degenerate_run >= MAX_CONSECUTIVE_DEGENERATE {
                    break;
                }
            }
        }
        added
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Vec3<f64>> {
        &self.history
    }
}
