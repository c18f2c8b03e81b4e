//! Generate command implementation
//!
//! Writes a labelled CSV dataset of random scenarios.

use clap::Args;
use normal_dataset::{DatasetGenerator, DatasetSummary};
use normal_sampling::sampler::StrategyKind;
use normal_sampling::scenario::{Scenario2D, Scenario3D};
use std::path::PathBuf;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Arguments of `generate`
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Scenario dimension (2 or 3)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub dim: u8,

    /// Number of rows
    #[arg(short = 'n', long)]
    pub size: usize,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Ground-truth strategy (random, halton, cached-halton, corner)
    #[arg(short = 't', long)]
    pub strategy: Option<StrategyKind>,

    /// Ground-truth samples per scenario
    #[arg(long)]
    pub samples: Option<usize>,

    /// Base seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate chunks on worker threads
    #[arg(long)]
    pub parallel: bool,

    /// Dedicated worker pool size (implies --parallel)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Scenarios per work chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

/// Run the generate command
pub fn run(config: &CliConfig, args: &GenerateArgs) -> Result<()> {
    let mut settings = config.dataset.clone();
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }
    if let Some(samples) = args.samples {
        settings.ground_truth_samples = samples;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(chunk_size) = args.chunk_size {
        settings.chunk_size = chunk_size;
    }
    if args.workers.is_some() {
        settings.workers = args.workers;
    }
    settings.parallel |= args.parallel || args.workers.is_some();

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CliError::FileNotFound(parent.display().to_string()));
        }
    }

    let dataset = settings.to_config(args.size)?;
    info!("Starting dataset generation...");
    info!("  Dimension: {}D", args.dim);
    info!("  Rows: {}", dataset.size());
    info!("  Strategy: {}", dataset.strategy());
    info!("  Samples per scenario: {}", dataset.ground_truth_samples());
    if dataset.parallel() {
        info!(
            "  Workers: {}",
            dataset.workers().unwrap_or_else(num_cpus::get)
        );
    }
    info!("  Output: {}", args.output.display());

    let summary = match args.dim {
        2 => DatasetGenerator::<Scenario2D>::new(dataset, config.scenario_2d)?
            .generate_to_path(&args.output)?,
        _ => DatasetGenerator::<Scenario3D>::new(dataset, config.scenario_3d)?
            .generate_to_path(&args.output)?,
    };

    print_summary(&summary, args);
    info!("Dataset generation complete");
    Ok(())
}

fn print_summary(summary: &DatasetSummary, args: &GenerateArgs) {
    println!("\nDataset written to {}", args.output.display());
    println!("  Rows:        {}", summary.rows);
    println!("  Chunks:      {}", summary.chunks);
    println!("  Seed:        {}", summary.seed);
    println!("  Short rows:  {}", summary.short_rows);
    println!("  Elapsed:     {:.3} s", summary.elapsed.as_secs_f64());
}
