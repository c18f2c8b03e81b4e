//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod compare;
pub mod generate;
pub mod predict;

use clap::ValueEnum;
use normal_dataset::experiments::SummaryStats;
use serde::Serialize;

use crate::Result;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Print `report` as JSON or through `table`
pub(crate) fn emit<T: Serialize>(
    report: &T,
    format: OutputFormat,
    table: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => table(report),
    }
    Ok(())
}

pub(crate) fn print_stats_header(unit: &str) {
    println!("\n┌──────────────────────────┬────────────┬────────────┬────────────┬────────────┬────────────┐");
    println!(
        "│ {:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │",
        unit, "Mean", "StdDev", "Median", "95th %", "Max"
    );
    println!("├──────────────────────────┼────────────┼────────────┼────────────┼────────────┼────────────┤");
}

pub(crate) fn print_stats_row(label: &str, stats: Option<&SummaryStats>) {
    match stats {
        Some(s) => println!(
            "│ {:<24} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>10.4} │",
            label, s.mean, s.std_dev, s.median, s.p95, s.max
        ),
        None => println!(
            "│ {:<24} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │ {:>10} │",
            label, "-", "-", "-", "-", "-"
        ),
    }
}

pub(crate) fn print_stats_footer() {
    println!("└──────────────────────────┴────────────┴────────────┴────────────┴────────────┴────────────┘");
}
