//! # Convergence Detection
//!
//! Samples in batches until the running average normal stops moving.
//!
//! After an initial batch the loop repeatedly draws another batch and
//! measures the angle, in degrees, between the average direction before and
//! after it. The run ends when:
//!
//! - the angle is at most the configured threshold (converged),
//! - a batch adds no samples (the strategy is exhausted), or
//! - the history reaches the configured cap (treated as converged).
//!
//! ## Usage Example
//!
//! ```rust
//! use normal_core::math::vector::Vec2;
//! use normal_sampling::convergence::{ConvergenceConfig, ConvergenceLoop, ConvergenceStatus};
//! use normal_sampling::sampler::HaltonSampler2D;
//! use normal_sampling::scenario::Scenario2D;
//!
//! let scenario = Scenario2D::from_bounds(
//!     Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0),
//!     Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0),
//! ).unwrap();
//! let mut sampler = HaltonSampler2D::halton(scenario);
//!
//! let mut convergence = ConvergenceLoop::new(ConvergenceConfig::default());
//! let outcome = convergence.run(&mut sampler);
//! assert!(outcome.is_converged());
//! assert_eq!(outcome.total_samples % 100, 0);
//! ```

pub mod config;

pub use config::{
    ConvergenceConfig, ConvergenceConfigBuilder, DEFAULT_MAX_CHANGE_DEGREES, DEFAULT_MAX_HISTORY,
    DEFAULT_SAMPLES_PER_RUN,
};

use crate::sampler::SamplingStrategy;
use normal_core::math::angular::{to_degrees, unsigned_unit_angular_difference};

/// Lifecycle of a [`ConvergenceLoop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConvergenceState {
    /// No run has started.
    #[default]
    NotStarted,
    /// A run is drawing batches.
    Sampling,
    /// The last run met the threshold.
    Converged,
    /// The last run ended on exhaustion or the history cap.
    Aborted,
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConvergenceStatus {
    /// The average moved by at most the threshold.
    Converged,
    /// A batch added no samples.
    Exhausted,
    /// The history reached the cap before converging.
    CapReached,
}

/// Result of one convergence run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceOutcome {
    /// Why the run ended.
    pub status: ConvergenceStatus,
    /// Batches drawn, the initial one included.
    pub batches: usize,
    /// History length at the end of the run.
    pub total_samples: usize,
    /// Change of the average in the last measured batch, in degrees.
    pub last_change_degrees: Option<f64>,
}

impl ConvergenceOutcome {
    /// `true` when the run met the threshold or hit the history cap.
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(
            self.status,
            ConvergenceStatus::Converged | ConvergenceStatus::CapReached
        )
    }
}

/// Batch-wise convergence driver.
///
/// Holds the configuration and the state of the latest run; one instance
/// can drive any number of samplers in turn.
#[derive(Clone, Debug)]
pub struct ConvergenceLoop {
    config: ConvergenceConfig,
    state: ConvergenceState,
}

impl ConvergenceLoop {
    /// Creates a driver in the `NotStarted` state.
    pub fn new(config: ConvergenceConfig) -> Self {
        Self {
            config,
            state: ConvergenceState::NotStarted,
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &ConvergenceConfig {
        &self.config
    }

    /// Returns the state left by the latest run.
    #[inline]
    pub fn state(&self) -> ConvergenceState {
        self.state
    }

    /// Samples `sampler` until its average normal converges.
    ///
    /// A batch whose average is undefined (empty history or cancelling
    /// normals) never counts as converged.
    pub fn run<S: SamplingStrategy>(&mut self, sampler: &mut S) -> ConvergenceOutcome {
        let batch = self.config.samples_per_run();
        let threshold = self.config.max_change_degrees();
        let cap = self.config.max_history();

        self.state = ConvergenceState::Sampling;

        let mut batches = 1;
        let initial = sampler.sample(batch);
        let mut current = sampler.average_normal();
        let mut last_change = None;

        let status = if initial == 0 {
            ConvergenceStatus::Exhausted
        } else {
            loop {
                let previous = current;
                let added = sampler.sample(batch);
                batches += 1;
                if added == 0 {
                    break ConvergenceStatus::Exhausted;
                }

                current = sampler.average_normal();
                if let (Some(p), Some(c)) = (previous, current) {
                    let change = to_degrees(unsigned_unit_angular_difference(p, c));
                    last_change = Some(change);
                    if change <= threshold {
                        break ConvergenceStatus::Converged;
                    }
                }

                if sampler.sample_count() >= cap {
                    tracing::debug!(
                        samples = sampler.sample_count(),
                        cap,
                        last_change_degrees = ?last_change,
                        "convergence stopped at history cap"
                    );
                    break ConvergenceStatus::CapReached;
                }
            }
        };

        self.state = match status {
            ConvergenceStatus::Converged => ConvergenceState::Converged,
            ConvergenceStatus::Exhausted | ConvergenceStatus::CapReached => {
                ConvergenceState::Aborted
            }
        };

        ConvergenceOutcome {
            status,
            batches,
            total_samples: sampler.sample_count(),
            last_change_degrees: last_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SamplerRng;
    use crate::sampler::{CornerSampler3D, NormalHistory, VolumeSampler2D};
    use crate::scenario::{Scenario2D, Scenario2DParams, Scenario3D};
    use normal_core::math::vector::{Vec2, Vec3};

    /// Emits the same normal on every attempt until `limit` normals exist.
    struct ConstantSampler {
        history: NormalHistory<Vec2<f64>>,
        limit: usize,
    }

    impl ConstantSampler {
        fn new(limit: usize) -> Self {
            Self {
                history: NormalHistory::new(),
                limit,
            }
        }
    }

    impl SamplingStrategy for ConstantSampler {
        type Normal = Vec2<f64>;

        fn sample(&mut self, count: usize) -> usize {
            let added = count.min(self.limit - self.history.len());
            for _ in 0..added {
                self.history.push(Vec2::new(0.0, 1.0));
            }
            added
        }

        fn normal_history(&self) -> &NormalHistory<Vec2<f64>> {
            &self.history
        }
    }

    /// Alternates between two orthogonal normals, so the average keeps moving
    /// by a shrinking but positive angle.
    struct AlternatingSampler {
        history: NormalHistory<Vec2<f64>>,
        flip: bool,
    }

    impl SamplingStrategy for AlternatingSampler {
        type Normal = Vec2<f64>;

        fn sample(&mut self, count: usize) -> usize {
            for _ in 0..count {
                let n = if self.flip {
                    Vec2::new(1.0, 0.0)
                } else {
                    Vec2::new(0.0, 1.0)
                };
                self.history.push(n);
            }
            self.flip = !self.flip;
            count
        }

        fn normal_history(&self) -> &NormalHistory<Vec2<f64>> {
            &self.history
        }
    }

    fn config(batch: usize, threshold: f64, cap: usize) -> ConvergenceConfig {
        ConvergenceConfig::builder()
            .samples_per_run(batch)
            .max_change_degrees(threshold)
            .max_history(cap)
            .build()
            .unwrap()
    }

    #[test]
    fn test_constant_average_converges_after_one_extra_batch() {
        let mut sampler = ConstantSampler::new(usize::MAX);
        let mut convergence = ConvergenceLoop::new(config(10, 0.01, 1_000));
        assert_eq!(convergence.state(), ConvergenceState::NotStarted);

        let outcome = convergence.run(&mut sampler);
        assert_eq!(outcome.status, ConvergenceStatus::Converged);
        assert_eq!(outcome.batches, 2);
        assert_eq!(outcome.total_samples, 20);
        assert_eq!(outcome.last_change_degrees, Some(0.0));
        assert_eq!(convergence.state(), ConvergenceState::Converged);
    }

    #[test]
    fn test_exhausted_sampler_aborts() {
        let mut sampler = ConstantSampler::new(0);
        let mut convergence = ConvergenceLoop::new(config(10, 0.01, 1_000));
        let outcome = convergence.run(&mut sampler);

        assert_eq!(outcome.status, ConvergenceStatus::Exhausted);
        assert_eq!(outcome.batches, 1);
        assert!(!outcome.is_converged());
        assert_eq!(convergence.state(), ConvergenceState::Aborted);
    }

    #[test]
    fn test_history_cap_counts_as_converged() {
        let mut sampler = AlternatingSampler {
            history: NormalHistory::new(),
            flip: false,
        };
        let mut convergence = ConvergenceLoop::new(config(10, 0.0, 100));
        let outcome = convergence.run(&mut sampler);

        assert_eq!(outcome.status, ConvergenceStatus::CapReached);
        assert!(outcome.is_converged());
        assert_eq!(outcome.total_samples, 100);
        assert_eq!(outcome.batches, 10);
        assert_eq!(convergence.state(), ConvergenceState::Aborted);
    }

    #[test]
    fn test_corner_sampler_exhausts() {
        let s = Scenario3D::from_bounds(
            (Vec3::splat(0.0), Vec3::splat(1.0)),
            (Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0)),
            (Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 4.0, 1.0)),
        )
        .unwrap();
        let mut sampler = CornerSampler3D::new(s);
        let mut convergence = ConvergenceLoop::new(config(100, 0.0, 100_000));
        let outcome = convergence.run(&mut sampler);

        assert!(outcome.total_samples <= 512);
        assert!(sampler.is_exhausted() || outcome.status == ConvergenceStatus::Converged);
    }

    #[test]
    fn test_real_sampler_converges_below_threshold() {
        let mut rng = SamplerRng::from_seed(31);
        let scenario = Scenario2D::generate(&mut rng, &Scenario2DParams::default());
        let mut sampler = VolumeSampler2D::random(scenario, rng);

        let mut convergence = ConvergenceLoop::new(config(200, 0.05, 100_000));
        let outcome = convergence.run(&mut sampler);

        assert!(outcome.is_converged());
        if outcome.status == ConvergenceStatus::Converged {
            assert!(outcome.last_change_degrees.unwrap() <= 0.05);
        }
        assert_eq!(outcome.total_samples, outcome.batches * 200);
    }
}
