//! Labelled dataset generation.
//!
//! Each row is one random scenario, normalised so that A's min corner sits
//! at the origin and A's width is 1, followed by its ground-truth U_f from a
//! fixed sampling budget.
//!
//! The index range `[0, size)` is split into chunks. Chunk `k` draws its
//! scenarios from its own generator seeded with `(seed, k)`, so the set of
//! rows depends only on the seed and the chunk size. In parallel mode every
//! chunk is encoded into a local buffer and only the final write of that
//! buffer takes the output lock; row order then follows chunk completion.

use crate::config::DatasetConfig;
use crate::error::{DatasetError, DatasetResult};
use crate::schema::{ground_truth, DatasetScenario};
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::HaltonCaches;
use rand::RngCore;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One labelled scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    /// Normalised features in schema order.
    pub features: Vec<f64>,
    /// Ground-truth U_f in radians.
    pub uncertainty: f64,
    /// Normals behind the ground truth.
    pub samples: usize,
}

impl DatasetRow {
    /// CSV fields: the features followed by the target.
    fn fields(&self) -> impl Iterator<Item = String> + '_ {
        self.features
            .iter()
            .chain(std::iter::once(&self.uncertainty))
            .map(|v| v.to_string())
    }
}

/// What a generation run produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatasetSummary {
    /// Rows written, excluding the header.
    pub rows: usize,
    /// Chunks processed.
    pub chunks: usize,
    /// Rows whose ground truth used fewer normals than the budget.
    pub short_rows: usize,
    /// Base seed actually used.
    pub seed: u64,
    /// Wall time.
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, Default)]
struct ChunkStats {
    rows: usize,
    short_rows: usize,
}

impl ChunkStats {
    fn merge(self, other: Self) -> Self {
        Self {
            rows: self.rows + other.rows,
            short_rows: self.short_rows + other.short_rows,
        }
    }
}

/// Generates labelled datasets for one scenario family.
///
/// # Examples
///
/// ```rust
/// use normal_dataset::{DatasetConfig, DatasetGenerator};
/// use normal_sampling::scenario::{Scenario2D, Scenario2DParams};
///
/// let config = DatasetConfig::builder()
///     .size(5)
///     .seed(1)
///     .ground_truth_samples(200)
///     .build()
///     .unwrap();
/// let generator = DatasetGenerator::<Scenario2D>::new(config, Scenario2DParams::default()).unwrap();
///
/// let mut out = Vec::new();
/// let summary = generator.generate(&mut out).unwrap();
/// assert_eq!(summary.rows, 5);
///
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.lines().count(), 6);
/// assert!(text.starts_with("A_height,B_min_x,B_min_y,B_max_x,B_max_y,U_f"));
/// ```
#[derive(Clone, Debug)]
pub struct DatasetGenerator<S: DatasetScenario> {
    config: DatasetConfig,
    params: S::Params,
    caches: HaltonCaches,
    _scenario: PhantomData<fn() -> S>,
}

impl<S: DatasetScenario> DatasetGenerator<S> {
    /// Creates a generator reading the process-wide Halton caches.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Scenario` if the generation ranges are invalid.
    pub fn new(config: DatasetConfig, params: S::Params) -> DatasetResult<Self> {
        S::validate_params(&params)?;
        Ok(Self {
            config,
            params,
            caches: HaltonCaches::shared(),
            _scenario: PhantomData,
        })
    }

    /// Replaces the Halton caches.
    pub fn with_caches(mut self, caches: HaltonCaches) -> Self {
        self.caches = caches;
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Returns the generation ranges.
    #[inline]
    pub fn params(&self) -> &S::Params {
        &self.params
    }

    /// Draws and labels one scenario.
    ///
    /// The ground truth is sampled on the normalised scenario, so the
    /// target describes exactly the geometry the features encode.
    pub fn row(&self, rng: &mut SamplerRng) -> DatasetResult<DatasetRow> {
        let scenario = S::generate(rng, &self.params).normalized()?;
        let features = scenario.feature_row()?;
        let sampler_rng = SamplerRng::from_seed(rng.next_u64());
        let truth = ground_truth(
            &scenario,
            self.config.strategy(),
            self.config.ground_truth_samples(),
            sampler_rng,
            &self.caches,
        )?;
        Ok(DatasetRow {
            features,
            uncertainty: truth.uncertainty,
            samples: truth.samples,
        })
    }

    /// Writes the header and `size` rows to `writer`.
    ///
    /// # Errors
    ///
    /// Returns the first scenario, sampling, worker pool or output error.
    /// Rows already flushed stay in the output.
    pub fn generate<W: Write + Send>(&self, writer: W) -> DatasetResult<DatasetSummary> {
        let seed = self.config.seed().unwrap_or_else(rand::random);
        let chunks = self.config.chunk_count();
        info!(
            dimension = S::DIMENSION,
            size = self.config.size(),
            strategy = %self.config.strategy(),
            samples = self.config.ground_truth_samples(),
            parallel = self.config.parallel(),
            workers = ?self.config.workers(),
            seed,
            "generating dataset"
        );

        let start = Instant::now();
        let mut output = csv::Writer::from_writer(writer);
        output.write_record(S::header())?;

        let stats = if self.config.parallel() {
            output.flush()?;
            let shared = Mutex::new(output.into_inner()?);
            let stats = match self.config.workers() {
                Some(workers) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(workers)
                        .build()?;
                    pool.install(|| self.generate_parallel(seed, chunks, &shared))
                }
                None => self.generate_parallel(seed, chunks, &shared),
            }?;
            let mut writer = shared
                .into_inner()
                .map_err(|_| DatasetError::OutputPoisoned)?;
            writer.flush()?;
            stats
        } else {
            let stats = self.generate_sequential(seed, chunks, &mut output)?;
            output.flush()?;
            stats
        };

        let summary = DatasetSummary {
            rows: stats.rows,
            chunks,
            short_rows: stats.short_rows,
            seed,
            elapsed: start.elapsed(),
        };
        info!(
            rows = summary.rows,
            short_rows = summary.short_rows,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "dataset complete"
        );
        Ok(summary)
    }

    /// Writes the dataset to a new file at `path`.
    pub fn generate_to_path(&self, path: impl AsRef<Path>) -> DatasetResult<DatasetSummary> {
        let file = File::create(path.as_ref())?;
        self.generate(BufWriter::new(file))
    }

    fn generate_sequential<W: Write>(
        &self,
        seed: u64,
        chunks: usize,
        output: &mut csv::Writer<W>,
    ) -> DatasetResult<ChunkStats> {
        let mut total = ChunkStats::default();
        for chunk in 0..chunks {
            let stats = self.write_chunk(seed, chunk, output)?;
            debug!(chunk, rows = stats.rows, "chunk written");
            total = total.merge(stats);
        }
        Ok(total)
    }

    fn generate_parallel<W: Write + Send>(
        &self,
        seed: u64,
        chunks: usize,
        shared: &Mutex<W>,
    ) -> DatasetResult<ChunkStats> {
        (0..chunks)
            .into_par_iter()
            .map(|chunk| -> DatasetResult<ChunkStats> {
                let mut local = csv::Writer::from_writer(Vec::new());
                let stats = self.write_chunk(seed, chunk, &mut local)?;
                let buffer = local.into_inner()?;

                let mut writer = shared.lock().map_err(|_| DatasetError::OutputPoisoned)?;
                writer.write_all(&buffer)?;
                drop(writer);

                debug!(chunk, rows = stats.rows, bytes = buffer.len(), "chunk flushed");
                Ok(stats)
            })
            .try_reduce(ChunkStats::default, |a, b| Ok(a.merge(b)))
    }

    /// Generates chunk `chunk` into `output`.
    fn write_chunk<W: Write>(
        &self,
        seed: u64,
        chunk: usize,
        output: &mut csv::Writer<W>,
    ) -> DatasetResult<ChunkStats> {
        let size = self.config.size();
        let chunk_size = self.config.chunk_size();
        let start = chunk * chunk_size;
        let end = (start + chunk_size).min(size);
        let budget = self.config.ground_truth_samples();

        let mut rng = SamplerRng::for_stream(seed, chunk as u64);
        let mut stats = ChunkStats::default();
        for index in start..end {
            let row = self.row(&mut rng)?;
            if row.samples < budget {
                warn!(
                    index,
                    samples = row.samples,
                    budget,
                    "ground truth used fewer samples than requested"
                );
                stats.short_rows += 1;
            }
            output.write_record(row.fields())?;
            stats.rows += 1;
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use normal_sampling::sampler::StrategyKind;
    use normal_sampling::scenario::{Scenario2D, Scenario3D};
    use normal_sampling::ScenarioError;

    fn config(size: usize, parallel: bool) -> DatasetConfig {
        DatasetConfig::builder()
            .size(size)
            .seed(17)
            .ground_truth_samples(300)
            .chunk_size(4)
            .parallel(parallel)
            .build()
            .unwrap()
    }

    fn sorted_lines(bytes: Vec<u8>) -> Vec<String> {
        let text = String::from_utf8(bytes).unwrap();
        let mut lines: Vec<String> = text.lines().skip(1).map(str::to_string).collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_row_is_normalised() {
        let generator =
            DatasetGenerator::<Scenario3D>::new(config(1, false), Default::default()).unwrap();
        let row = generator.row(&mut SamplerRng::from_seed(3)).unwrap();
        assert_eq!(row.features.len(), 14);
        assert_eq!(row.samples, 300);
        assert!(row.uncertainty >= 0.0);
    }

    #[test]
    fn test_empty_dataset_has_header_only() {
        let generator =
            DatasetGenerator::<Scenario2D>::new(config(0, false), Default::default()).unwrap();
        let mut out = Vec::new();
        let summary = generator.generate(&mut out).unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.chunks, 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_parallel_rows_match_sequential_rows() {
        let sequential =
            DatasetGenerator::<Scenario2D>::new(config(10, false), Default::default()).unwrap();
        let parallel =
            DatasetGenerator::<Scenario2D>::new(config(10, true), Default::default()).unwrap();

        let mut a = Vec::new();
        let mut b = Vec::new();
        assert_eq!(sequential.generate(&mut a).unwrap().rows, 10);
        assert_eq!(parallel.generate(&mut b).unwrap().rows, 10);
        assert_eq!(sorted_lines(a), sorted_lines(b));
    }

    #[test]
    fn test_corner_strategy_reports_short_rows() {
        let config = DatasetConfig::builder()
            .size(3)
            .seed(2)
            .strategy(StrategyKind::Corner)
            .ground_truth_samples(1_000)
            .build()
            .unwrap();
        let generator = DatasetGenerator::<Scenario3D>::new(config, Default::default()).unwrap();
        let summary = generator.generate(std::io::sink()).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.short_rows, 3);
    }

    #[test]
    fn test_zero_box_size_is_rejected_up_front() {
        let params = normal_sampling::scenario::Scenario3DParams {
            min_size: 0.0,
            max_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            DatasetGenerator::<Scenario3D>::new(config(5, false), params),
            Err(DatasetError::Scenario(ScenarioError::InvalidRange { name: "size", .. }))
        ));

        // The smallest accepted sizes still normalise and generate every row
        let params = normal_sampling::scenario::Scenario3DParams {
            min_size: 1e-6,
            max_size: 1e-6,
            ..Default::default()
        };
        let generator = DatasetGenerator::<Scenario3D>::new(config(5, false), params).unwrap();
        assert_eq!(generator.generate(std::io::sink()).unwrap().rows, 5);
    }

    #[test]
    fn test_corner_strategy_fails_in_2d() {
        let config = DatasetConfig::builder()
            .size(1)
            .strategy(StrategyKind::Corner)
            .build()
            .unwrap();
        let generator = DatasetGenerator::<Scenario2D>::new(config, Default::default()).unwrap();
        assert!(matches!(
            generator.generate(std::io::sink()),
            Err(DatasetError::Sampling(_))
        ));
    }
}
