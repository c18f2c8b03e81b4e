//! Dataset schema: the scenario families a dataset can be built from.
//!
//! [`DatasetScenario`] ties a scenario type to its feature columns, its
//! random generator and its sampler enum, so the generator and the
//! experiments are written once for both dimensions.

use normal_sampling::metric::normal_uncertainty;
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::{HaltonCaches, Sampler2D, Sampler3D, SamplingStrategy, StrategyKind};
use normal_sampling::scenario::{Scenario2D, Scenario2DParams, Scenario3D, Scenario3DParams};
use normal_sampling::{SamplingError, ScenarioError};
use std::fmt::Debug;

/// Name of the target column.
pub const TARGET_COLUMN: &str = "U_f";

/// A scenario family that can be turned into labelled rows.
pub trait DatasetScenario: Clone + Debug + Send + Sync + Sized {
    /// Generation ranges.
    type Params: Clone + Debug + Default + Send + Sync;

    /// Sampler enum over the strategies of this dimension.
    type Sampler: SamplingStrategy;

    /// Spatial dimension, 2 or 3.
    const DIMENSION: usize;

    /// Feature column names in row order.
    const FEATURE_COLUMNS: &'static [&'static str];

    /// Checks the generation ranges.
    fn validate_params(params: &Self::Params) -> Result<(), ScenarioError>;

    /// Draws a random scenario.
    fn generate(rng: &mut SamplerRng, params: &Self::Params) -> Self;

    /// Similarity-normalised copy: A's min corner at the origin, A's width 1.
    fn normalized(&self) -> Result<Self, ScenarioError>;

    /// Normalised features in [`FEATURE_COLUMNS`](Self::FEATURE_COLUMNS) order.
    fn feature_row(&self) -> Result<Vec<f64>, ScenarioError>;

    /// Builds the strategy `kind` over a copy of this scenario.
    fn sampler(
        &self,
        kind: StrategyKind,
        rng: SamplerRng,
        caches: &HaltonCaches,
    ) -> Result<Self::Sampler, SamplingError>;

    /// Header row: the feature columns followed by [`TARGET_COLUMN`].
    fn header() -> Vec<&'static str> {
        let mut header = Self::FEATURE_COLUMNS.to_vec();
        header.push(TARGET_COLUMN);
        header
    }
}

impl DatasetScenario for Scenario2D {
    type Params = Scenario2DParams;
    type Sampler = Sampler2D;

    const DIMENSION: usize = 2;
    const FEATURE_COLUMNS: &'static [&'static str] = &Scenario2D::FEATURE_COLUMNS;

    fn validate_params(params: &Self::Params) -> Result<(), ScenarioError> {
        params.validate()
    }

    fn generate(rng: &mut SamplerRng, params: &Self::Params) -> Self {
        Scenario2D::generate(rng, params)
    }

    fn normalized(&self) -> Result<Self, ScenarioError> {
        Scenario2D::normalized(self)
    }

    fn feature_row(&self) -> Result<Vec<f64>, ScenarioError> {
        Ok(self.features()?.to_vec())
    }

    fn sampler(
        &self,
        kind: StrategyKind,
        rng: SamplerRng,
        caches: &HaltonCaches,
    ) -> Result<Self::Sampler, SamplingError> {
        Sampler2D::build(kind, self.clone(), rng, caches)
    }
}

impl DatasetScenario for Scenario3D {
    type Params = Scenario3DParams;
    type Sampler = Sampler3D;

    const DIMENSION: usize = 3;
    const FEATURE_COLUMNS: &'static [&'static str] = &Scenario3D::FEATURE_COLUMNS;

    fn validate_params(params: &Self::Params) -> Result<(), ScenarioError> {
        params.validate()
    }

    fn generate(rng: &mut SamplerRng, params: &Self::Params) -> Self {
        Scenario3D::generate(rng, params)
    }

    fn normalized(&self) -> Result<Self, ScenarioError> {
        Scenario3D::normalized(self)
    }

    fn feature_row(&self) -> Result<Vec<f64>, ScenarioError> {
        Ok(self.features()?.to_vec())
    }

    fn sampler(
        &self,
        kind: StrategyKind,
        rng: SamplerRng,
        caches: &HaltonCaches,
    ) -> Result<Self::Sampler, SamplingError> {
        Sampler3D::build(kind, self.clone(), rng, caches)
    }
}

/// U_f of a scenario after a fixed sampling budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundTruth {
    /// Uncertainty in radians.
    pub uncertainty: f64,
    /// Normals actually recorded; below the budget for exhausted strategies.
    pub samples: usize,
}

/// Samples `scenario` with `kind` for `budget` normals and computes U_f.
pub fn ground_truth<S: DatasetScenario>(
    scenario: &S,
    kind: StrategyKind,
    budget: usize,
    rng: SamplerRng,
    caches: &HaltonCaches,
) -> Result<GroundTruth, SamplingError> {
    let mut sampler = scenario.sampler(kind, rng, caches)?;
    let samples = sampler.sample(budget);
    Ok(GroundTruth {
        uncertainty: normal_uncertainty(sampler.normal_history().as_slice()),
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use normal_core::math::vector::Vec2;

    #[test]
    fn test_headers() {
        assert_eq!(
            Scenario2D::header().join(","),
            "A_height,B_min_x,B_min_y,B_max_x,B_max_y,U_f"
        );
        assert_eq!(
            Scenario3D::header().join(","),
            "A_h,A_d,B_min_x,B_min_y,B_min_z,B_max_x,B_max_y,B_max_z,\
             C_min_x,C_min_y,C_min_z,C_max_x,C_max_y,C_max_z,U_f"
        );
    }

    #[test]
    fn test_feature_row_matches_columns() {
        let mut rng = SamplerRng::from_seed(5);
        let s2 = <Scenario2D as DatasetScenario>::generate(&mut rng, &Default::default());
        let s3 = <Scenario3D as DatasetScenario>::generate(&mut rng, &Default::default());
        assert_eq!(s2.feature_row().unwrap().len(), Scenario2D::FEATURE_COLUMNS.len());
        assert_eq!(s3.feature_row().unwrap().len(), Scenario3D::FEATURE_COLUMNS.len());
    }

    #[test]
    fn test_ground_truth_reports_budget() {
        let scenario = Scenario2D::from_bounds(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 3.0),
        )
        .unwrap();
        let caches = HaltonCaches::with_capacity(2_000);
        let truth = ground_truth(
            &scenario,
            StrategyKind::CachedHalton,
            1_000,
            SamplerRng::from_seed(0),
            &caches,
        )
        .unwrap();
        assert_eq!(truth.samples, 1_000);
        assert!(truth.uncertainty > 0.0);
    }

    #[test]
    fn test_corner_is_unavailable_in_2d() {
        let mut rng = SamplerRng::from_seed(5);
        let scenario = <Scenario2D as DatasetScenario>::generate(&mut rng, &Default::default());
        let result = ground_truth(
            &scenario,
            StrategyKind::Corner,
            10,
            rng,
            &HaltonCaches::with_capacity(10),
        );
        assert!(matches!(
            result,
            Err(SamplingError::UnsupportedStrategy { dimension: 2, .. })
        ));
    }
}
