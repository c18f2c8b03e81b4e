//! Error types for the sampling engine.
//!
//! This module provides:
//! - `ScenarioError`: invalid scenario parameters, bounds or feature vectors
//! - `SamplingError`: strategies that cannot be built for a dimension
//! - `ConfigError`: convergence configuration rejected at build time
//!
//! Sampling itself never fails: degenerate attempts are retried, exhausted
//! strategies report zero added samples and empty histories have zero
//! uncertainty.

use thiserror::Error;

/// Scenario construction errors.
///
/// # Examples
/// ```
/// use normal_sampling::ScenarioError;
///
/// let err = ScenarioError::InvalidRange { name: "size", min: 2.0, max: 1.0 };
/// assert!(err.to_string().contains("size"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    /// A `[min, max]` parameter range is empty, negative or not finite.
    #[error("Invalid {name} range [{min}, {max}]")]
    InvalidRange {
        /// Parameter name
        name: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// A box has a max corner below its min corner on some axis, or a
    /// non-finite coordinate.
    #[error("Invalid bounds for box {name}: min {min:?}, max {max:?}")]
    InvalidBounds {
        /// Box label (`A`, `B` or `C`)
        name: &'static str,
        /// Min corner components
        min: Vec<f64>,
        /// Max corner components
        max: Vec<f64>,
    },

    /// Box A has no usable width, so the scenario cannot be normalised.
    #[error("Anchor box width {width} cannot be normalised")]
    DegenerateAnchor {
        /// Width of box A along the first axis
        width: f64,
    },

    /// A feature vector holds a non-finite value.
    #[error("Feature {index} is not finite: {value}")]
    NonFiniteFeature {
        /// Position in the feature vector
        index: usize,
        /// The offending value
        value: f64,
    },
}

/// Strategy selection errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SamplingError {
    /// The strategy has no implementation in this dimension.
    #[error("Strategy '{strategy}' is not available for {dimension}D scenarios")]
    UnsupportedStrategy {
        /// Strategy name
        strategy: String,
        /// Scenario dimension
        dimension: usize,
    },

    /// The strategy name is not recognised.
    #[error("Unknown sampling strategy '{0}'")]
    UnknownStrategy(String),

    /// A point sequence does not provide enough coordinates per attempt.
    #[error("Point sequence has dimension {actual}, at least {required} required")]
    SequenceDimension {
        /// Coordinates needed per attempt
        required: usize,
        /// Coordinates the sequence provides
        actual: usize,
    },
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Batch size must be at least one.
    #[error("Invalid samples per run {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Convergence threshold must be finite and non-negative.
    #[error("Invalid convergence threshold {0} degrees: must be finite and non-negative")]
    InvalidThreshold(f64),

    /// History cap smaller than one batch.
    #[error("Invalid history cap {cap}: must be at least one batch of {batch}")]
    InvalidHistoryCap {
        /// Requested cap
        cap: usize,
        /// Batch size
        batch: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SamplingError::UnsupportedStrategy {
            strategy: "corner".to_string(),
            dimension: 2,
        };
        assert_eq!(
            err.to_string(),
            "Strategy 'corner' is not available for 2D scenarios"
        );

        let err = ConfigError::InvalidHistoryCap { cap: 10, batch: 100 };
        assert!(err.to_string().contains("batch of 100"));

        let err = ScenarioError::DegenerateAnchor { width: 0.0 };
        assert!(err.to_string().contains("width 0"));
    }
}
