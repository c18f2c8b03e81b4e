//! CLI configuration management
//!
//! Settings come from a TOML file with `[logging]`, `[scenario_2d]`,
//! `[scenario_3d]`, `[convergence]` and `[dataset]` tables. Every table and
//! key is optional. Command line flags override file values.

use normal_dataset::DatasetConfig;
use normal_sampling::convergence::{
    ConvergenceConfig, DEFAULT_MAX_CHANGE_DEGREES, DEFAULT_MAX_HISTORY, DEFAULT_SAMPLES_PER_RUN,
};
use normal_sampling::sampler::StrategyKind;
use normal_sampling::scenario::{Scenario2DParams, Scenario3DParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{CliError, Result};

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "normal-uncertainty.toml";

/// Log levels accepted in `[logging]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown log level: {}. Supported: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level; `RUST_LOG` takes precedence
    pub level: LogLevel,
}

/// `[convergence]` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceSettings {
    /// Samples per batch
    pub samples_per_run: usize,
    /// Convergence threshold in degrees
    pub max_change_degrees: f64,
    /// History size cap
    pub max_history: usize,
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        Self {
            samples_per_run: DEFAULT_SAMPLES_PER_RUN,
            max_change_degrees: DEFAULT_MAX_CHANGE_DEGREES,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl ConvergenceSettings {
    /// Validated convergence loop configuration
    pub fn to_config(&self) -> Result<ConvergenceConfig> {
        Ok(ConvergenceConfig::builder()
            .samples_per_run(self.samples_per_run)
            .max_change_degrees(self.max_change_degrees)
            .max_history(self.max_history)
            .build()?)
    }
}

/// `[dataset]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Ground-truth strategy
    pub strategy: StrategyKind,
    /// Ground-truth budget per scenario
    pub ground_truth_samples: usize,
    /// Scenarios per work chunk
    pub chunk_size: usize,
    /// Generate chunks on worker threads
    pub parallel: bool,
    /// Dedicated worker pool size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Base seed; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        let defaults = DatasetConfig::default();
        Self {
            strategy: defaults.strategy(),
            ground_truth_samples: defaults.ground_truth_samples(),
            chunk_size: defaults.chunk_size(),
            parallel: defaults.parallel(),
            workers: defaults.workers(),
            seed: defaults.seed(),
        }
    }
}

impl DatasetSettings {
    /// Validated dataset configuration for `size` rows
    pub fn to_config(&self, size: usize) -> Result<DatasetConfig> {
        let mut builder = DatasetConfig::builder()
            .size(size)
            .strategy(self.strategy)
            .ground_truth_samples(self.ground_truth_samples)
            .chunk_size(self.chunk_size)
            .parallel(self.parallel);
        if let Some(workers) = self.workers {
            builder = builder.workers(workers);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

/// Complete CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// `[logging]`
    pub logging: LoggingSettings,
    /// `[scenario_2d]`
    pub scenario_2d: Scenario2DParams,
    /// `[scenario_3d]`
    pub scenario_3d: Scenario3DParams,
    /// `[convergence]`
    pub convergence: ConvergenceSettings,
    /// `[dataset]`
    pub dataset: DatasetSettings,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| CliError::ConfigFile(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigFile(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load the configuration for a run
    ///
    /// An explicit path must exist. Without one, the default path is read
    /// if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => {
                Err(CliError::FileNotFound(path.display().to_string()))
            }
            Some(path) => Self::from_file(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate every table
    pub fn validate(&self) -> Result<()> {
        self.scenario_2d.validate()?;
        self.scenario_3d.validate()?;
        self.convergence.to_config()?;
        self.dataset.to_config(0)?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::ConfigFile(format!("Failed to render TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.convergence.samples_per_run, 100);
        assert_eq!(config.dataset.strategy, StrategyKind::CachedHalton);
        assert_eq!(config.dataset.ground_truth_samples, 100_000);
        assert_eq!(config.scenario_2d, Scenario2DParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
            [logging]
            level = "debug"

            [convergence]
            max_change_degrees = 0.05

            [dataset]
            strategy = "random"
            seed = 7

            [scenario_3d]
            max_distance = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.convergence.max_change_degrees, 0.05);
        assert_eq!(config.convergence.samples_per_run, 100);
        assert_eq!(config.dataset.strategy, StrategyKind::Random);
        assert_eq!(config.dataset.seed, Some(7));
        assert_eq!(config.scenario_3d.max_distance, 5.0);
        assert_eq!(config.scenario_3d.min_size, Scenario3DParams::default().min_size);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(CliConfig::from_toml("[convergence]\nsamples_per_run = 0").is_err());
        assert!(CliConfig::from_toml("[scenario_2d]\nmin_size = 3.0").is_err());
        assert!(CliConfig::from_toml("[dataset]\nstrategy = \"sobol\"").is_err());
        assert!(CliConfig::from_toml("[logging]\nlevel = \"loud\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dataset]\nchunk_size = 250").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.dataset.chunk_size, 250);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            CliConfig::load(Some(&missing)),
            Err(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("TRACE").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_library_configs_reject_invalid_toml() {
        let convergence: ConvergenceConfig = toml::from_str("max_change_degrees = 0.5").unwrap();
        assert_eq!(convergence.max_change_degrees(), 0.5);
        assert!(toml::from_str::<ConvergenceConfig>("samples_per_run = 0").is_err());
        assert!(toml::from_str::<DatasetConfig>("ground_truth_samples = 0").is_err());
    }
}
