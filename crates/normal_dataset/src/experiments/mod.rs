//! # Strategy Experiments
//!
//! Measurements comparing sampling strategies and fast predictors.
//!
//! ## Module Structure
//!
//! - [`stats`]: [`SummaryStats`] over a set of measurements
//! - [`comparison`]: convergence, fixed-budget and early-stop comparisons
//! - [`predictor`]: [`UncertaintyPredictor`] and the corner proxy

pub mod comparison;
pub mod predictor;
pub mod stats;

pub use comparison::{
    ComparisonConfig, ConvergenceComparison, EarlyStopComparison, FixedBudgetComparison,
    StrategyComparison, StrategyReport,
};
pub use predictor::{compare_predictor, CornerPredictor, PredictorComparison, UncertaintyPredictor};
pub use stats::SummaryStats;
