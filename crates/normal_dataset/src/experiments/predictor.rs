//! Fast U_f estimators benchmarked against sampled ground truth.
//!
//! A predictor sees only the normalised 14-feature vector of a 3D scenario.
//! The corner proxy is built in; learned models plug in through
//! [`UncertaintyPredictor`].

use super::comparison::{speedup, ComparisonConfig};
use super::stats::SummaryStats;
use crate::error::{DatasetError, DatasetResult};
use crate::schema::ground_truth;
use normal_core::math::angular::to_degrees;
use normal_sampling::metric::normal_uncertainty;
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::{
    CornerSampler3D, HaltonCaches, SamplingStrategy, StrategyKind, CORNER_COMBINATIONS,
};
use normal_sampling::scenario::{Scenario3D, Scenario3DParams};
use std::time::{Duration, Instant};
use tracing::info;

/// An estimator of U_f from scenario features.
pub trait UncertaintyPredictor {
    /// Display name used in reports.
    fn name(&self) -> &str;

    /// Predicts U_f in radians from the features of a normalised scenario,
    /// in `Scenario3D::FEATURE_COLUMNS` order.
    fn predict(&mut self, features: &[f64; 14]) -> DatasetResult<f64>;
}

/// U_f over the 512 corner triangles of the scenario.
#[derive(Clone, Copy, Debug, Default)]
pub struct CornerPredictor;

impl UncertaintyPredictor for CornerPredictor {
    fn name(&self) -> &str {
        "corner"
    }

    fn predict(&mut self, features: &[f64; 14]) -> DatasetResult<f64> {
        let scenario = Scenario3D::from_features(features)?;
        let mut sampler = CornerSampler3D::new(scenario);
        sampler.sample(CORNER_COMBINATIONS);
        Ok(normal_uncertainty(sampler.normal_history().as_slice()))
    }
}

/// Accuracy and cost of a predictor against ground truth.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictorComparison {
    /// Predictor name.
    pub predictor: String,
    /// Scenarios compared.
    pub scenarios: usize,
    /// Cached Halton normals behind each ground truth.
    pub budget: usize,
    /// Absolute U_f error in degrees.
    pub error_degrees: SummaryStats,
    /// Ground-truth time per scenario in milliseconds.
    pub truth_ms: SummaryStats,
    /// Prediction time per scenario in milliseconds.
    pub predictor_ms: SummaryStats,
    /// Total ground-truth time over total prediction time.
    pub speedup: f64,
}

/// Compares `predictor` with cached Halton ground truth on random 3D
/// scenarios.
///
/// Ground truth is sampled on the normalised scenario the features
/// describe.
///
/// # Errors
///
/// Returns configuration, scenario and predictor errors.
pub fn compare_predictor<P: UncertaintyPredictor + ?Sized>(
    predictor: &mut P,
    config: &ComparisonConfig,
    params: &Scenario3DParams,
    caches: &HaltonCaches,
) -> DatasetResult<PredictorComparison> {
    config.validate()?;
    params.validate()?;
    info!(
        predictor = predictor.name(),
        scenarios = config.scenarios,
        budget = config.budget,
        "predictor comparison"
    );

    let mut rng = SamplerRng::from_seed(config.seed);
    let mut errors = Vec::with_capacity(config.scenarios);
    let mut truth_ms = Vec::with_capacity(config.scenarios);
    let mut predictor_ms = Vec::with_capacity(config.scenarios);
    let (mut truth_total, mut predictor_total) = (Duration::ZERO, Duration::ZERO);

    for _ in 0..config.scenarios {
        let scenario = Scenario3D::generate(&mut rng, params).normalized()?;
        let features = scenario.features()?;

        let start = Instant::now();
        let truth = ground_truth(
            &scenario,
            StrategyKind::CachedHalton,
            config.budget,
            SamplerRng::from_seed(config.seed),
            caches,
        )?;
        let truth_time = start.elapsed();

        let start = Instant::now();
        let predicted = predictor.predict(&features)?;
        let predictor_time = start.elapsed();

        if !predicted.is_finite() {
            return Err(DatasetError::Predictor {
                name: predictor.name().to_string(),
                message: format!("non-finite prediction {}", predicted),
            });
        }

        errors.push(to_degrees((truth.uncertainty - predicted).abs()));
        truth_ms.push(truth_time.as_secs_f64() * 1e3);
        predictor_ms.push(predictor_time.as_secs_f64() * 1e3);
        truth_total += truth_time;
        predictor_total += predictor_time;
    }

    let summarize = |values: Vec<f64>| {
        SummaryStats::from_values(values).ok_or_else(|| DatasetError::Predictor {
            name: predictor.name().to_string(),
            message: "no scenarios compared".to_string(),
        })
    };
    Ok(PredictorComparison {
        predictor: predictor.name().to_string(),
        scenarios: config.scenarios,
        budget: config.budget,
        error_degrees: summarize(errors)?,
        truth_ms: summarize(truth_ms)?,
        predictor_ms: summarize(predictor_ms)?,
        speedup: speedup(truth_total, predictor_total),
    })
}
