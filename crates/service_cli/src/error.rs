//! CLI error types

use normal_dataset::DatasetError;
use normal_sampling::{ConfigError, SamplingError, ScenarioError};
use thiserror::Error;

/// Errors surfaced by the command line interface
#[derive(Debug, Error)]
pub enum CliError {
    /// A file named on the command line does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An argument value is not usable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be read or parsed
    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    /// Invalid convergence or dataset settings
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Invalid scenario ranges
    #[error("Invalid scenario parameters: {0}")]
    Scenario(#[from] ScenarioError),

    /// Strategy not available
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    /// Dataset or experiment failure
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A self-check found a mismatch
    #[error("Check failed: {0}")]
    CheckFailed(String),

    /// Report encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
