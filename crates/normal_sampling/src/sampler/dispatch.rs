//! Static dispatch over the concrete strategies.
//!
//! This module provides:
//! - [`HaltonCaches`]: the planar and spatial caches handed to cached samplers
//! - [`Sampler2D`] and [`Sampler3D`]: enums selected by [`StrategyKind`] at run time

use super::corner::CornerSampler3D;
use super::volume::{
    BasicSampler2D, BasicSampler3D, CachedHaltonSampler2D, CachedHaltonSampler3D,
    HaltonSampler2D, HaltonSampler3D, VolumeSampler2D, VolumeSampler3D,
};
use super::{NormalHistory, SamplingStrategy, StrategyKind};
use crate::error::SamplingError;
use crate::rng::SamplerRng;
use crate::scenario::{Scenario2D, Scenario3D};
use normal_core::math::vector::{Vec2, Vec3};
use normal_core::sequence::{PlanarHaltonCache, SpatialHaltonCache};
use rand::RngCore;
use std::sync::Arc;

/// Reference-counted Halton caches for both dimensions.
///
/// Cloning shares the caches. Each is built on first use.
///
/// # Example
///
/// ```
/// use normal_sampling::sampler::HaltonCaches;
///
/// let caches = HaltonCaches::with_capacity(1_000);
/// assert_eq!(caches.planar().capacity(), 1_000);
/// assert!(!caches.spatial().is_initialized());
/// ```
#[derive(Clone, Debug)]
pub struct HaltonCaches {
    planar: Arc<PlanarHaltonCache>,
    spatial: Arc<SpatialHaltonCache>,
}

impl HaltonCaches {
    /// Wraps existing caches.
    pub fn new(planar: Arc<PlanarHaltonCache>, spatial: Arc<SpatialHaltonCache>) -> Self {
        Self { planar, spatial }
    }

    /// Handles to the process-wide caches of default capacity.
    pub fn shared() -> Self {
        Self::new(
            PlanarHaltonCache::shared_planar(),
            SpatialHaltonCache::shared_spatial(),
        )
    }

    /// Fresh caches of the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(
            Arc::new(PlanarHaltonCache::planar_with_capacity(capacity)),
            Arc::new(SpatialHaltonCache::spatial_with_capacity(capacity)),
        )
    }

    /// The four-dimensional cache.
    #[inline]
    pub fn planar(&self) -> &Arc<PlanarHaltonCache> {
        &self.planar
    }

    /// The nine-dimensional cache.
    #[inline]
    pub fn spatial(&self) -> &Arc<SpatialHaltonCache> {
        &self.spatial
    }
}

impl Default for HaltonCaches {
    fn default() -> Self {
        Self::shared()
    }
}

/// Static dispatch enum over the 2D strategies.
///
/// # Example
///
/// ```
/// use normal_sampling::rng::SamplerRng;
/// use normal_sampling::sampler::{HaltonCaches, Sampler2D, SamplingStrategy, StrategyKind};
/// use normal_sampling::scenario::{Scenario2D, Scenario2DParams};
///
/// let mut rng = SamplerRng::from_seed(1);
/// let scenario = Scenario2D::generate(&mut rng, &Scenario2DParams::default());
/// let caches = HaltonCaches::with_capacity(500);
///
/// let mut sampler = Sampler2D::build(StrategyKind::Random, scenario.clone(), rng, &caches).unwrap();
/// assert_eq!(sampler.sample(100), 100);
///
/// let corner = Sampler2D::build(StrategyKind::Corner, scenario, SamplerRng::from_seed(2), &caches);
/// assert!(corner.is_err());
/// ```
#[derive(Clone, Debug)]
pub enum Sampler2D<R = SamplerRng> {
    /// Pseudo-random points
    Random(BasicSampler2D<R>),
    /// Halton points
    Halton(HaltonSampler2D),
    /// Cached Halton points
    CachedHalton(CachedHaltonSampler2D),
}

impl<R: RngCore> Sampler2D<R> {
    /// Builds the strategy `kind` over `scenario`.
    ///
    /// `rng` is consumed by the random strategy and dropped otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::UnsupportedStrategy` for [`StrategyKind::Corner`].
    pub fn build(
        kind: StrategyKind,
        scenario: Scenario2D,
        rng: R,
        caches: &HaltonCaches,
    ) -> Result<Self, SamplingError> {
        match kind {
            StrategyKind::Random => Ok(Sampler2D::Random(VolumeSampler2D::random(scenario, rng))),
            StrategyKind::Halton => Ok(Sampler2D::Halton(VolumeSampler2D::halton(scenario))),
            StrategyKind::CachedHalton => Ok(Sampler2D::CachedHalton(
                VolumeSampler2D::cached_halton(scenario, Arc::clone(caches.planar())),
            )),
            StrategyKind::Corner => Err(SamplingError::UnsupportedStrategy {
                strategy: kind.to_string(),
                dimension: 2,
            }),
        }
    }

    /// The strategy this sampler runs.
    #[inline]
    pub fn kind(&self) -> StrategyKind {
        match self {
            Sampler2D::Random(_) => StrategyKind::Random,
            Sampler2D::Halton(_) => StrategyKind::Halton,
            Sampler2D::CachedHalton(_) => StrategyKind::CachedHalton,
        }
    }
}

impl<R: RngCore> SamplingStrategy for Sampler2D<R> {
    type Normal = Vec2<f64>;

    #[inline]
    fn sample(&mut self, count: usize) -> usize {
        match self {
            Sampler2D::Random(s) => s.sample(count),
            Sampler2D::Halton(s) => s.sample(count),
            Sampler2D::CachedHalton(s) => s.sample(count),
        }
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Vec2<f64>> {
        match self {
            Sampler2D::Random(s) => s.normal_history(),
            Sampler2D::Halton(s) => s.normal_history(),
            Sampler2D::CachedHalton(s) => s.normal_history(),
        }
    }
}

/// Static dispatch enum over the 3D strategies.
#[derive(Clone, Debug)]
pub enum Sampler3D<R = SamplerRng> {
    /// Pseudo-random points
    Random(BasicSampler3D<R>),
    /// Halton points
    Halton(HaltonSampler3D),
    /// Cached Halton points
    CachedHalton(CachedHaltonSampler3D),
    /// Box corners
    Corner(CornerSampler3D),
}

impl<R: RngCore> Sampler3D<R> {
    /// Builds the strategy `kind` over `scenario`.
    ///
    /// `rng` is consumed by the random strategy and dropped otherwise. Every
    /// kind is available in 3D.
    pub fn build(
        kind: StrategyKind,
        scenario: Scenario3D,
        rng: R,
        caches: &HaltonCaches,
    ) -> Result<Self, SamplingError> {
        Ok(match kind {
            StrategyKind::Random => Sampler3D::Random(VolumeSampler3D::random(scenario, rng)),
            StrategyKind::Halton => Sampler3D::Halton(VolumeSampler3D::halton(scenario)),
            StrategyKind::CachedHalton => Sampler3D::CachedHalton(VolumeSampler3D::cached_halton(
                scenario,
                Arc::clone(caches.spatial()),
            )),
            StrategyKind::Corner => Sampler3D::Corner(CornerSampler3D::new(scenario)),
        })
    }

    /// The strategy this sampler runs.
    #[inline]
    pub fn kind(&self) -> StrategyKind {
        match self {
            Sampler3D::Random(_) => StrategyKind::Random,
            Sampler3D::Halton(_) => StrategyKind::Halton,
            Sampler3D::CachedHalton(_) => StrategyKind::CachedHalton,
            Sampler3D::Corner(_) => StrategyKind::Corner,
        }
    }
}

impl<R: RngCore> SamplingStrategy for Sampler3D<R> {
    type Normal = Vec3<f64>;

    #[inline]
    fn sample(&mut self, count: usize) -> usize {
        match self {
            Sampler3D::Random(s) => s.sample(count),
            Sampler3D::Halton(s) => s.sample(count),
            Sampler3D::CachedHalton(s) => s.sample(count),
            Sampler3D::Corner(s) => s.sample(count),
        }
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Vec3<f64>> {
        match self {
            Sampler3D::Random(s) => s.normal_history(),
            Sampler3D::Halton(s) => s.normal_history(),
            Sampler3D::CachedHalton(s) => s.normal_history(),
            Sampler3D::Corner(s) => s.normal_history(),
        }
    }
}
