//! # Sampling Strategies
//!
//! Every strategy turns a scenario into a stream of unit normals behind the
//! [`SamplingStrategy`] contract.
//!
//! ## Module Structure
//!
//! - [`history`]: [`NormalHistory`], the append-only normal record
//! - [`kind`]: [`StrategyKind`] identifiers with parsing and display
//! - [`volume`]: interior samplers over random, Halton and cached Halton points
//! - [`corner`]: [`CornerSampler3D`], the 512-combination corner proxy
//! - [`dispatch`]: [`Sampler2D`] / [`Sampler3D`] enums and [`HaltonCaches`]
//!
//! ## Contract
//!
//! - `sample(count)` records up to `count` new normals and returns how many
//!   it recorded. Degenerate attempts are retried; a strategy that runs out
//!   of attempts returns fewer, possibly zero.
//! - `normal_history()` exposes every recorded normal in order.
//! - `average_normal()` is the normalised sum of the history, `None` while
//!   it is empty.

pub mod corner;
pub mod dispatch;
pub mod history;
pub mod kind;
pub mod volume;

pub use corner::{corner_triplet, CornerSampler3D, CORNER_COMBINATIONS};
pub use dispatch::{HaltonCaches, Sampler2D, Sampler3D};
pub use history::NormalHistory;
pub use kind::StrategyKind;
pub use volume::{
    BasicSampler2D, BasicSampler3D, CachedHaltonSampler2D, CachedHaltonSampler3D,
    HaltonSampler2D, HaltonSampler3D, VolumeSampler2D, VolumeSampler3D, DEGENERATE_THRESHOLD_2D,
    DEGENERATE_THRESHOLD_3D, MAX_CONSECUTIVE_DEGENERATE,
};

use normal_core::math::vector::NormalVector;

/// A producer of unit normals from one scenario.
///
/// Implemented by the concrete samplers and by the [`Sampler2D`] /
/// [`Sampler3D`] dispatch enums. Generic code such as the convergence loop
/// and the dataset harness is written against this trait.
pub trait SamplingStrategy {
    /// Normal vector type, `Vec2<f64>` or `Vec3<f64>`.
    type Normal: NormalVector<Scalar = f64>;

    /// Records up to `count` new normals and returns how many were recorded.
    fn sample(&mut self, count: usize) -> usize;

    /// Every normal recorded so far, in sampling order.
    fn normal_history(&self) -> &NormalHistory<Self::Normal>;

    /// Normalised sum of the recorded normals.
    #[inline]
    fn average_normal(&self) -> Option<Self::Normal> {
        self.normal_history().average()
    }

    /// Number of recorded normals.
    #[inline]
    fn sample_count(&self) -> usize {
        self.normal_history().len()
    }
}

impl<S: SamplingStrategy + ?Sized> SamplingStrategy for &mut S {
    type Normal = S::Normal;

    #[inline]
    fn sample(&mut self, count: usize) -> usize {
        (**self).sample(count)
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Self::Normal> {
        (**self).normal_history()
    }
}
