//! Normal Uncertainty CLI
//!
//! Operational entry point for the normal uncertainty sampling library.
//!
//! # Commands
//!
//! - `normal-uncertainty generate -n <rows> -o <file>` - Write a labelled CSV dataset
//! - `normal-uncertainty compare` - Compare two sampling strategies
//! - `normal-uncertainty predict` - Benchmark the corner proxy against ground truth
//! - `normal-uncertainty check` - Print the configuration and verify the Halton caches
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the core,
//! sampling and dataset layers behind a single command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::compare::CompareArgs;
use commands::generate::GenerateArgs;
use commands::predict::PredictArgs;
use config::CliConfig;
pub use error::{CliError, Result};

/// Normal uncertainty sampling CLI
#[derive(Parser)]
#[command(name = "normal-uncertainty")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to normal-uncertainty.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a labelled CSV dataset of random scenarios
    Generate(GenerateArgs),

    /// Compare two sampling strategies over random scenarios
    Compare(CompareArgs),

    /// Benchmark the corner proxy against cached Halton ground truth
    Predict(PredictArgs),

    /// Print the effective configuration and verify the Halton caches
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_filter_str()
    };
    init_tracing(level);

    info!("Normal Uncertainty v{}", env!("CARGO_PKG_VERSION"));
    debug!(?config, "Loaded configuration");

    match &cli.command {
        Commands::Generate(args) => commands::generate::run(&config, args),
        Commands::Compare(args) => commands::compare::run(&config, args),
        Commands::Predict(args) => commands::predict::run(&config, args),
        Commands::Check => commands::check::run(&config),
    }
}
