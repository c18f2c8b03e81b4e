//! Convergence loop configuration.

use crate::error::ConfigError;

/// Default number of samples requested per batch.
pub const DEFAULT_SAMPLES_PER_RUN: usize = 100;

/// Default convergence threshold in degrees.
pub const DEFAULT_MAX_CHANGE_DEGREES: f64 = 0.01;

/// Default cap on the history size.
pub const DEFAULT_MAX_HISTORY: usize = 100_000;

/// Convergence loop configuration.
///
/// Immutable; use [`ConvergenceConfigBuilder`] to construct instances.
/// Deserialisation goes through the builder, so missing keys take their
/// defaults and invalid values are rejected.
///
/// # Examples
///
/// ```rust
/// use normal_sampling::convergence::ConvergenceConfig;
///
/// let config = ConvergenceConfig::builder()
///     .samples_per_run(3_000)
///     .max_change_degrees(0.05)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.samples_per_run(), 3_000);
/// assert_eq!(config.max_history(), 100_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ConvergenceConfigBuilder"))]
pub struct ConvergenceConfig {
    /// Samples requested per batch.
    samples_per_run: usize,
    /// Largest change of the average direction, in degrees, that counts as converged.
    max_change_degrees: f64,
    /// History size at which the loop stops regardless of convergence.
    max_history: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            samples_per_run: DEFAULT_SAMPLES_PER_RUN,
            max_change_degrees: DEFAULT_MAX_CHANGE_DEGREES,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl ConvergenceConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ConvergenceConfigBuilder {
        ConvergenceConfigBuilder::default()
    }

    /// Returns the batch size.
    #[inline]
    pub fn samples_per_run(&self) -> usize {
        self.samples_per_run
    }

    /// Returns the convergence threshold in degrees.
    #[inline]
    pub fn max_change_degrees(&self) -> f64 {
        self.max_change_degrees
    }

    /// Returns the history size cap.
    #[inline]
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `samples_per_run` is 0
    /// - `max_change_degrees` is negative or not finite
    /// - `max_history` is smaller than one batch
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_run == 0 {
            return Err(ConfigError::InvalidBatchSize(self.samples_per_run));
        }
        if !(self.max_change_degrees.is_finite() && self.max_change_degrees >= 0.0) {
            return Err(ConfigError::InvalidThreshold(self.max_change_degrees));
        }
        if self.max_history < self.samples_per_run {
            return Err(ConfigError::InvalidHistoryCap {
                cap: self.max_history,
                batch: self.samples_per_run,
            });
        }
        Ok(())
    }
}

/// Builder for [`ConvergenceConfig`].
///
/// Unset fields take their defaults; validation happens in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvergenceConfigBuilder {
    samples_per_run: Option<usize>,
    max_change_degrees: Option<f64>,
    max_history: Option<usize>,
}

impl ConvergenceConfigBuilder {
    /// Sets the number of samples requested per batch.
    #[inline]
    pub fn samples_per_run(mut self, samples_per_run: usize) -> Self {
        self.samples_per_run = Some(samples_per_run);
        self
    }

    /// Sets the convergence threshold in degrees.
    #[inline]
    pub fn max_change_degrees(mut self, max_change_degrees: f64) -> Self {
        self.max_change_degrees = Some(max_change_degrees);
        self
    }

    /// Sets the history size cap.
    #[inline]
    pub fn max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the resulting configuration fails
    /// [`ConvergenceConfig::validate`].
    pub fn build(self) -> Result<ConvergenceConfig, ConfigError> {
        let config = ConvergenceConfig {
            samples_per_run: self.samples_per_run.unwrap_or(DEFAULT_SAMPLES_PER_RUN),
            max_change_degrees: self
                .max_change_degrees
                .unwrap_or(DEFAULT_MAX_CHANGE_DEGREES),
            max_history: self.max_history.unwrap_or(DEFAULT_MAX_HISTORY),
        };

        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<ConvergenceConfigBuilder> for ConvergenceConfig {
    type Error = ConfigError;

    fn try_from(builder: ConvergenceConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
