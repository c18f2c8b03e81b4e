//! Predict command implementation
//!
//! Benchmarks the corner proxy against cached Halton ground truth.

use clap::Args;
use normal_dataset::experiments::{
    compare_predictor, ComparisonConfig, CornerPredictor, PredictorComparison,
};
use normal_sampling::sampler::HaltonCaches;
use tracing::info;

use super::{emit, print_stats_footer, print_stats_header, print_stats_row, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Arguments of `predict`
#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    /// Number of random 3D scenarios
    #[arg(short = 'n', long, default_value = "1000")]
    pub scenarios: usize,

    /// Cached Halton samples behind each ground truth
    #[arg(short, long, default_value = "5000")]
    pub budget: usize,

    /// Scenario seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Run the predict command
pub fn run(config: &CliConfig, args: &PredictArgs) -> Result<()> {
    let comparison = ComparisonConfig {
        scenarios: args.scenarios,
        budget: args.budget,
        convergence: config.convergence.to_config()?,
        seed: args.seed.or(config.dataset.seed).unwrap_or_default(),
    };

    info!("Starting predictor comparison...");
    info!("  Scenarios: {}", comparison.scenarios);
    info!("  Ground truth samples: {}", comparison.budget);

    let caches = HaltonCaches::shared();
    caches.spatial().initialize();

    let report = compare_predictor(
        &mut CornerPredictor,
        &comparison,
        &config.scenario_3d,
        &caches,
    )?;
    emit(&report, args.format, print_report)
}

fn print_report(report: &PredictorComparison) {
    println!(
        "--- {} predictor vs cached Halton ({} samples) ---",
        report.predictor, report.budget
    );
    println!("Scenarios: {}", report.scenarios);
    print_stats_header("U_f error [deg]");
    print_stats_row(&report.predictor, Some(&report.error_degrees));
    print_stats_footer();
    print_stats_header("Time [ms]");
    print_stats_row("ground truth", Some(&report.truth_ms));
    print_stats_row(&report.predictor, Some(&report.predictor_ms));
    print_stats_footer();
    println!("Predictor speed-up: {:.2}x", report.speedup);
}
