//! Check command implementation
//!
//! Prints the effective configuration and verifies the Halton caches.

use normal_core::sequence::{halton, HaltonCache};
use normal_sampling::sampler::HaltonCaches;
use std::time::Instant;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    println!("Effective configuration:\n");
    println!("{}", config.to_toml()?);

    println!("System:");
    println!("  Logical CPUs: {}", num_cpus::get());

    let caches = HaltonCaches::shared();
    println!("Halton caches:");
    verify_cache("2D", caches.planar().as_ref())?;
    verify_cache("3D", caches.spatial().as_ref())?;

    info!("All checks passed");
    Ok(())
}

/// Initialises `cache` and compares entries around the wrap point with
/// directly computed Halton values.
fn verify_cache<const D: usize>(label: &str, cache: &HaltonCache<D>) -> Result<()> {
    let start = Instant::now();
    cache.initialize();
    let elapsed = start.elapsed();

    let capacity = cache.capacity();
    let probes = [0, 1, capacity / 2, capacity - 1, capacity, capacity + 1];
    for index in probes {
        for (dimension, &base) in cache.bases().iter().enumerate() {
            let expected = halton((index % capacity) as u64 + 1, base);
            let actual = cache.get(index, dimension);
            if actual != expected {
                return Err(CliError::CheckFailed(format!(
                    "{} cache entry ({}, {}) is {}, expected {}",
                    label, index, dimension, actual, expected
                )));
            }
        }
    }

    println!(
        "  {}: {} dims x {} samples, bases {:?}, built in {:.1} ms: OK",
        label,
        D,
        capacity,
        cache.bases(),
        elapsed.as_secs_f64() * 1e3
    );
    Ok(())
}
