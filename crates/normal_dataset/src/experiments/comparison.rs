//! Head-to-head strategy comparisons over many random scenarios.
//!
//! Every comparison runs both sides on clones of the same scenario, so the
//! only difference between them is the point source.

use super::stats::SummaryStats;
use crate::error::{DatasetError, DatasetResult};
use crate::schema::DatasetScenario;
use normal_core::math::angular::{to_degrees, unsigned_unit_angular_difference};
use normal_sampling::convergence::{ConvergenceConfig, ConvergenceLoop};
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::{HaltonCaches, SamplingStrategy, StrategyKind};
use normal_sampling::ConfigError;
use rand::RngCore;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Settings shared by all comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonConfig {
    /// Number of random scenarios.
    pub scenarios: usize,
    /// Fixed sampling budget; also the reference run of the early-stop check.
    pub budget: usize,
    /// Convergence loop settings.
    pub convergence: ConvergenceConfig,
    /// Seed of the scenario stream.
    pub seed: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            scenarios: 1_000,
            budget: 100_000,
            convergence: ConvergenceConfig::default(),
            seed: 0,
        }
    }
}

impl ComparisonConfig {
    /// Checks that there is at least one scenario and a non-zero budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenarios == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "scenarios",
                value: "must be at least 1".to_string(),
            });
        }
        if self.budget == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "budget",
                value: "must be at least 1".to_string(),
            });
        }
        self.convergence.validate()
    }
}

/// Per-strategy measurements of one comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyReport {
    /// The strategy measured.
    pub strategy: StrategyKind,
    /// Normals recorded per scenario.
    pub samples: SummaryStats,
    /// Wall time over all scenarios.
    pub total_time: Duration,
}

/// Convergence loop run by two strategies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceComparison {
    /// Scenarios compared.
    pub scenarios: usize,
    /// First strategy.
    pub first: StrategyReport,
    /// Second strategy.
    pub second: StrategyReport,
    /// Runs of each strategy that met the threshold or the cap.
    pub converged: (usize, usize),
    /// Angle between the final average normals, in degrees.
    pub disagreement_degrees: Option<SummaryStats>,
    /// First strategy's total time over the second's.
    pub speedup: f64,
}

/// Two strategies run for the same fixed budget.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedBudgetComparison {
    /// Scenarios compared.
    pub scenarios: usize,
    /// Normals requested from each strategy.
    pub budget: usize,
    /// First strategy.
    pub first: StrategyReport,
    /// Second strategy.
    pub second: StrategyReport,
    /// Angle between the average normals, in degrees.
    pub disagreement_degrees: Option<SummaryStats>,
}

/// Convergence loop against a full-budget run of the same strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarlyStopComparison {
    /// Scenarios compared.
    pub scenarios: usize,
    /// Normals of the reference run.
    pub budget: usize,
    /// The early-stopped run.
    pub early_stop: StrategyReport,
    /// The full-budget run.
    pub full: StrategyReport,
    /// Angle between early-stop and full-budget averages, in degrees.
    pub disagreement_degrees: Option<SummaryStats>,
}

/// Runs comparisons over scenarios of family `S`.
///
/// # Examples
///
/// ```rust
/// use normal_dataset::experiments::{ComparisonConfig, StrategyComparison};
/// use normal_sampling::sampler::{HaltonCaches, StrategyKind};
/// use normal_sampling::scenario::Scenario2D;
///
/// let config = ComparisonConfig { scenarios: 3, budget: 2_000, ..Default::default() };
/// let comparison = StrategyComparison::<Scenario2D>::new(config, Default::default())
///     .unwrap()
///     .with_caches(HaltonCaches::with_capacity(10_000));
///
/// let report = comparison
///     .fixed_budget(StrategyKind::Random, StrategyKind::CachedHalton)
///     .unwrap();
/// assert_eq!(report.first.samples.mean, 2_000.0);
/// assert!(report.disagreement_degrees.unwrap().max < 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct StrategyComparison<S: DatasetScenario> {
    config: ComparisonConfig,
    params: S::Params,
    caches: HaltonCaches,
}

/// Accumulates one strategy's measurements.
#[derive(Default)]
struct Tally {
    samples: Vec<f64>,
    time: Duration,
    converged: usize,
}

impl Tally {
    fn report(self, strategy: StrategyKind) -> DatasetResult<StrategyReport> {
        Ok(StrategyReport {
            strategy,
            samples: summarize(self.samples)?,
            total_time: self.time,
        })
    }
}

impl<S: DatasetScenario> StrategyComparison<S> {
    /// Creates a runner reading the process-wide Halton caches.
    pub fn new(config: ComparisonConfig, params: S::Params) -> DatasetResult<Self> {
        config.validate()?;
        S::validate_params(&params)?;
        Ok(Self {
            config,
            params,
            caches: HaltonCaches::shared(),
        })
    }

    /// Replaces the Halton caches.
    pub fn with_caches(mut self, caches: HaltonCaches) -> Self {
        self.caches = caches;
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Runs the convergence loop with both strategies on every scenario.
    pub fn convergence(
        &self,
        first: StrategyKind,
        second: StrategyKind,
    ) -> DatasetResult<ConvergenceComparison> {
        info!(%first, %second, scenarios = self.config.scenarios, "convergence comparison");
        let mut convergence = ConvergenceLoop::new(self.config.convergence);
        let (mut a, mut b) = (Tally::default(), Tally::default());
        let mut disagreement = Vec::with_capacity(self.config.scenarios);

        self.for_each_scenario(|scenario, rng| {
            let na = timed(&mut a, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, first, rng)?;
                let outcome = convergence.run(&mut sampler);
                Ok((sampler, outcome.is_converged()))
            })?;
            let nb = timed(&mut b, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, second, rng)?;
                let outcome = convergence.run(&mut sampler);
                Ok((sampler, outcome.is_converged()))
            })?;
            a.converged += usize::from(na.1);
            b.converged += usize::from(nb.1);
            record_disagreement(&mut disagreement, &na.0, &nb.0);
            Ok(())
        })?;

        let (converged_a, converged_b) = (a.converged, b.converged);
        let first = a.report(first)?;
        let second = b.report(second)?;
        Ok(ConvergenceComparison {
            scenarios: self.config.scenarios,
            speedup: speedup(first.total_time, second.total_time),
            first,
            second,
            converged: (converged_a, converged_b),
            disagreement_degrees: SummaryStats::from_values(disagreement),
        })
    }

    /// Runs both strategies for the fixed budget on every scenario.
    pub fn fixed_budget(
        &self,
        first: StrategyKind,
        second: StrategyKind,
    ) -> DatasetResult<FixedBudgetComparison> {
        info!(%first, %second, budget = self.config.budget, "fixed-budget comparison");
        let budget = self.config.budget;
        let (mut a, mut b) = (Tally::default(), Tally::default());
        let mut disagreement = Vec::with_capacity(self.config.scenarios);

        self.for_each_scenario(|scenario, rng| {
            let sa = timed(&mut a, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, first, rng)?;
                sampler.sample(budget);
                Ok((sampler, false))
            })?;
            let sb = timed(&mut b, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, second, rng)?;
                sampler.sample(budget);
                Ok((sampler, false))
            })?;
            record_disagreement(&mut disagreement, &sa.0, &sb.0);
            Ok(())
        })?;

        Ok(FixedBudgetComparison {
            scenarios: self.config.scenarios,
            budget,
            first: a.report(first)?,
            second: b.report(second)?,
            disagreement_degrees: SummaryStats::from_values(disagreement),
        })
    }

    /// Compares the convergence loop with a full-budget run of `kind`.
    pub fn early_stop(&self, kind: StrategyKind) -> DatasetResult<EarlyStopComparison> {
        info!(%kind, budget = self.config.budget, "early-stop comparison");
        let budget = self.config.budget;
        let mut convergence = ConvergenceLoop::new(self.config.convergence);
        let (mut early, mut full) = (Tally::default(), Tally::default());
        let mut disagreement = Vec::with_capacity(self.config.scenarios);

        self.for_each_scenario(|scenario, rng| {
            let se = timed(&mut early, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, kind, rng)?;
                let outcome = convergence.run(&mut sampler);
                Ok((sampler, outcome.is_converged()))
            })?;
            let sf = timed(&mut full, || -> DatasetResult<_> {
                let mut sampler = self.sampler(scenario, kind, rng)?;
                sampler.sample(budget);
                Ok((sampler, false))
            })?;
            early.converged += usize::from(se.1);
            record_disagreement(&mut disagreement, &se.0, &sf.0);
            Ok(())
        })?;

        Ok(EarlyStopComparison {
            scenarios: self.config.scenarios,
            budget,
            early_stop: early.report(kind)?,
            full: full.report(kind)?,
            disagreement_degrees: SummaryStats::from_values(disagreement),
        })
    }

    /// Calls `f` on each scenario of the seeded stream, with the stream's
    /// generator for deriving sampler seeds.
    /// Builds a `kind` sampler for `scenario` with a generator seeded from `rng`.
    fn sampler(
        &self,
        scenario: &S,
        kind: StrategyKind,
        rng: &mut SamplerRng,
    ) -> DatasetResult<S::Sampler> {
        let sampler_rng = SamplerRng::from_seed(rng.next_u64());
        Ok(scenario.sampler(kind, sampler_rng, &self.caches)?)
    }

    fn for_each_scenario<F>(&self, mut f: F) -> DatasetResult<()>
    where
        F: FnMut(&S, &mut SamplerRng) -> DatasetResult<()>,
    {
        let mut rng = SamplerRng::from_seed(self.config.seed);
        for index in 0..self.config.scenarios {
            let scenario = S::generate(&mut rng, &self.params);
            f(&scenario, &mut rng)?;
            if (index + 1) % 1_000 == 0 {
                debug!(done = index + 1, "scenarios compared");
            }
        }
        Ok(())
    }
}

/// Runs `run`, adds its wall time and sample count to `tally` and returns
/// the sampler with its convergence flag.
fn timed<T, F>(tally: &mut Tally, run: F) -> DatasetResult<(T, bool)>
where
    T: SamplingStrategy,
    F: FnOnce() -> DatasetResult<(T, bool)>,
{
    let start = Instant::now();
    let (sampler, converged) = run()?;
    tally.time += start.elapsed();
    tally.samples.push(sampler.sample_count() as f64);
    Ok((sampler, converged))
}

fn record_disagreement<A, B>(out: &mut Vec<f64>, a: &A, b: &B)
where
    A: SamplingStrategy,
    B: SamplingStrategy<Normal = A::Normal>,
{
    if let (Some(x), Some(y)) = (a.average_normal(), b.average_normal()) {
        out.push(to_degrees(unsigned_unit_angular_difference(x, y)));
    }
}

fn summarize(values: Vec<f64>) -> DatasetResult<SummaryStats> {
    SummaryStats::from_values(values).ok_or_else(|| {
        DatasetError::Config(ConfigError::InvalidParameter {
            name: "scenarios",
            value: "no measurements recorded".to_string(),
        })
    })
}

/// `numerator / denominator` as a ratio of wall times.
pub(crate) fn speedup(numerator: Duration, denominator: Duration) -> f64 {
    let d = denominator.as_secs_f64();
    if d > 0.0 {
        numerator.as_secs_f64() / d
    } else {
        f64::INFINITY
    }
}
