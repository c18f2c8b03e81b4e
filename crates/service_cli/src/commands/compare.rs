//! Compare command implementation
//!
//! Runs two sampling strategies head to head over random scenarios.

use clap::{Args, ValueEnum};
use normal_dataset::experiments::{
    ComparisonConfig, ConvergenceComparison, EarlyStopComparison, FixedBudgetComparison,
    StrategyComparison, StrategyReport,
};
use normal_dataset::DatasetScenario;
use normal_sampling::sampler::StrategyKind;
use normal_sampling::scenario::{Scenario2D, Scenario3D};
use tracing::info;

use super::{emit, print_stats_footer, print_stats_header, print_stats_row, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

/// Which comparison to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ComparisonMode {
    /// Convergence loop with both strategies
    #[default]
    Convergence,
    /// Same fixed budget for both strategies
    Fixed,
    /// Convergence loop against a full-budget run of the first strategy
    EarlyStop,
}

/// Arguments of `compare`
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Scenario dimension (2 or 3)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub dim: u8,

    /// First strategy
    #[arg(long, default_value = "random")]
    pub first: StrategyKind,

    /// Second strategy (ignored by early-stop)
    #[arg(long, default_value = "cached-halton")]
    pub second: StrategyKind,

    /// Number of random scenarios
    #[arg(short = 'n', long, default_value = "1000")]
    pub scenarios: usize,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t = ComparisonMode::Convergence)]
    pub mode: ComparisonMode,

    /// Fixed budget; defaults to the convergence history cap
    #[arg(short, long)]
    pub budget: Option<usize>,

    /// Scenario seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Run the compare command
pub fn run(config: &CliConfig, args: &CompareArgs) -> Result<()> {
    let comparison = ComparisonConfig {
        scenarios: args.scenarios,
        budget: args.budget.unwrap_or(config.convergence.max_history),
        convergence: config.convergence.to_config()?,
        seed: args.seed.or(config.dataset.seed).unwrap_or_default(),
    };

    info!("Starting strategy comparison...");
    info!("  Dimension: {}D", args.dim);
    info!("  Mode: {:?}", args.mode);
    info!("  Scenarios: {}", comparison.scenarios);
    info!("  Budget: {}", comparison.budget);

    match args.dim {
        2 => report(
            StrategyComparison::<Scenario2D>::new(comparison, config.scenario_2d)?,
            args,
        ),
        _ => report(
            StrategyComparison::<Scenario3D>::new(comparison, config.scenario_3d)?,
            args,
        ),
    }
}

fn report<S: DatasetScenario>(runner: StrategyComparison<S>, args: &CompareArgs) -> Result<()> {
    match args.mode {
        ComparisonMode::Convergence => {
            let result = runner.convergence(args.first, args.second)?;
            emit(&result, args.format, print_convergence)
        }
        ComparisonMode::Fixed => {
            let result = runner.fixed_budget(args.first, args.second)?;
            emit(&result, args.format, print_fixed)
        }
        ComparisonMode::EarlyStop => {
            let result = runner.early_stop(args.first)?;
            emit(&result, args.format, print_early_stop)
        }
    }
}

fn print_strategies(
    first: &StrategyReport,
    first_label: &str,
    second: &StrategyReport,
    second_label: &str,
) {
    print_stats_header("Samples");
    print_stats_row(&format!("{} ({})", first_label, first.strategy), Some(&first.samples));
    print_stats_row(&format!("{} ({})", second_label, second.strategy), Some(&second.samples));
    print_stats_footer();
    println!(
        "Total time: {} {:.3} s | {} {:.3} s",
        first.strategy,
        first.total_time.as_secs_f64(),
        second.strategy,
        second.total_time.as_secs_f64()
    );
}

fn print_convergence(report: &ConvergenceComparison) {
    println!("--- Convergence: {} vs {} ---", report.first.strategy, report.second.strategy);
    println!("Scenarios: {}", report.scenarios);
    print_strategies(&report.first, "first", &report.second, "second");
    println!(
        "Converged: {} / {} | {} / {}",
        report.converged.0, report.scenarios, report.converged.1, report.scenarios
    );
    print_stats_header("Disagreement [deg]");
    print_stats_row("final average normals", report.disagreement_degrees.as_ref());
    print_stats_footer();
    println!("Speed-up of second over first: {:.2}x", report.speedup);
}

fn print_fixed(report: &FixedBudgetComparison) {
    println!(
        "--- Fixed budget {}: {} vs {} ---",
        report.budget, report.first.strategy, report.second.strategy
    );
    println!("Scenarios: {}", report.scenarios);
    print_strategies(&report.first, "first", &report.second, "second");
    print_stats_header("Disagreement [deg]");
    print_stats_row("average normals", report.disagreement_degrees.as_ref());
    print_stats_footer();
}

fn print_early_stop(report: &EarlyStopComparison) {
    println!(
        "--- Early stop vs {} samples: {} ---",
        report.budget, report.full.strategy
    );
    println!("Scenarios: {}", report.scenarios);
    print_strategies(&report.early_stop, "early stop", &report.full, "full");
    print_stats_header("Disagreement [deg]");
    print_stats_row("early vs full average", report.disagreement_degrees.as_ref());
    print_stats_footer();
}
