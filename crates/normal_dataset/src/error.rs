//! Error types for dataset generation and experiments.

use normal_sampling::{ConfigError, SamplingError, ScenarioError};
use thiserror::Error;

/// Dataset and experiment errors.
///
/// Sampling itself never fails; these errors come from invalid configuration,
/// scenarios that cannot be normalised, strategy selection, predictors and
/// the output writer.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A scenario could not be built or normalised.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// The strategy cannot run in this dimension.
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),

    /// Writing rows failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding rows failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dedicated worker pool could not be created.
    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker panicked while holding the output lock.
    #[error("Output writer poisoned by a panicked worker")]
    OutputPoisoned,

    /// A predictor failed to produce an estimate.
    #[error("Predictor '{name}' failed: {message}")]
    Predictor {
        /// Predictor name
        name: String,
        /// Failure description
        message: String,
    },
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

impl<W> From<csv::IntoInnerError<W>> for DatasetError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        DatasetError::Io(err.into_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_lower_layer_errors() {
        let err: DatasetError = SamplingError::UnsupportedStrategy {
            strategy: "corner".to_string(),
            dimension: 2,
        }
        .into();
        assert!(matches!(err, DatasetError::Sampling(_)));
        assert!(err.to_string().contains("corner"));

        let err: DatasetError = ConfigError::InvalidBatchSize(0).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
