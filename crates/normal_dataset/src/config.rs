//! Dataset generation configuration.

use normal_sampling::sampler::StrategyKind;
use normal_sampling::ConfigError;

/// Default ground-truth budget per scenario.
pub const DEFAULT_GROUND_TRUTH_SAMPLES: usize = 100_000;

/// Default number of scenarios per work chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1_000;

/// Dataset generation configuration.
///
/// Immutable; use [`DatasetConfigBuilder`] to construct instances.
/// Deserialisation goes through the builder and its validation.
///
/// # Examples
///
/// ```rust
/// use normal_dataset::DatasetConfig;
/// use normal_sampling::sampler::StrategyKind;
///
/// let config = DatasetConfig::builder()
///     .size(10_000)
///     .seed(42)
///     .strategy(StrategyKind::Random)
///     .parallel(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.chunk_count(), 10);
/// assert_eq!(config.ground_truth_samples(), 100_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DatasetConfigBuilder"))]
pub struct DatasetConfig {
    size: usize,
    seed: Option<u64>,
    strategy: StrategyKind,
    ground_truth_samples: usize,
    chunk_size: usize,
    parallel: bool,
    workers: Option<usize>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            size: 0,
            seed: None,
            strategy: StrategyKind::default(),
            ground_truth_samples: DEFAULT_GROUND_TRUTH_SAMPLES,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: false,
            workers: None,
        }
    }
}

impl DatasetConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> DatasetConfigBuilder {
        DatasetConfigBuilder::default()
    }

    /// Number of rows to generate.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Base seed; `None` draws one from entropy at generation time.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Ground-truth strategy.
    #[inline]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Normals sampled per scenario.
    #[inline]
    pub fn ground_truth_samples(&self) -> usize {
        self.ground_truth_samples
    }

    /// Scenarios per work chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether chunks run on rayon workers.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Size of a dedicated worker pool; `None` uses the global pool.
    #[inline]
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Number of chunks covering `[0, size)`.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.size.div_ceil(self.chunk_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if the ground-truth budget,
    /// the chunk size or the worker count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ground_truth_samples == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "ground_truth_samples",
                value: "must be at least 1".to_string(),
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chunk_size",
                value: "must be at least 1".to_string(),
            });
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`DatasetConfig`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatasetConfigBuilder {
    size: Option<usize>,
    seed: Option<u64>,
    strategy: Option<StrategyKind>,
    ground_truth_samples: Option<usize>,
    chunk_size: Option<usize>,
    parallel: Option<bool>,
    workers: Option<usize>,
}

impl DatasetConfigBuilder {
    /// Sets the number of rows.
    #[inline]
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the ground-truth strategy.
    #[inline]
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the ground-truth budget per scenario.
    #[inline]
    pub fn ground_truth_samples(mut self, samples: usize) -> Self {
        self.ground_truth_samples = Some(samples);
        self
    }

    /// Sets the number of scenarios per chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Enables or disables parallel generation.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Runs parallel generation on a dedicated pool of `workers` threads.
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the result fails [`DatasetConfig::validate`].
    pub fn build(self) -> Result<DatasetConfig, ConfigError> {
        let config = DatasetConfig {
            size: self.size.unwrap_or(0),
            seed: self.seed,
            strategy: self.strategy.unwrap_or_default(),
            ground_truth_samples: self
                .ground_truth_samples
                .unwrap_or(DEFAULT_GROUND_TRUTH_SAMPLES),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            parallel: self.parallel.unwrap_or(false),
            workers: self.workers,
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<DatasetConfigBuilder> for DatasetConfig {
    type Error = ConfigError;

    fn try_from(builder: DatasetConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
