//! Criterion benchmarks for the sampling strategies.
//!
//! Compares the per-batch cost of random, Halton, cached Halton and corner
//! sampling, and the cost of a full convergence run per strategy.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use normal_core::math::vector::{Vec2, Vec3};
use normal_sampling::convergence::{ConvergenceConfig, ConvergenceLoop};
use normal_sampling::metric::normal_uncertainty;
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::{HaltonCaches, Sampler2D, Sampler3D, SamplingStrategy, StrategyKind};
use normal_sampling::scenario::{Scenario2D, Scenario3D};

fn planar_scenario() -> Scenario2D {
    Scenario2D::from_bounds(
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(3.0, 3.0),
    )
    .unwrap()
}

fn spatial_scenario() -> Scenario3D {
    Scenario3D::from_bounds(
        (Vec3::splat(0.0), Vec3::splat(1.0)),
        (Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0)),
        (Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 4.0, 1.0)),
    )
    .unwrap()
}

/// Benchmark one batch of 2D sampling per strategy.
fn bench_planar_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("planar_batch");
    let caches = HaltonCaches::shared();
    caches.planar().initialize();

    for kind in [
        StrategyKind::Random,
        StrategyKind::Halton,
        StrategyKind::CachedHalton,
    ] {
        for batch in [100, 1_000, 10_000] {
            group.bench_with_input(BenchmarkId::new(kind.as_str(), batch), &batch, |b, &n| {
                b.iter(|| {
                    let mut sampler =
                        Sampler2D::build(kind, planar_scenario(), SamplerRng::from_seed(7), &caches)
                            .unwrap();
                    black_box(sampler.sample(black_box(n)))
                });
            });
        }
    }

    group.finish();
}

/// Benchmark one batch of 3D sampling per strategy.
fn bench_spatial_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_batch");
    let caches = HaltonCaches::shared();
    caches.spatial().initialize();

    for kind in StrategyKind::ALL {
        for batch in [100, 1_000, 10_000] {
            group.bench_with_input(BenchmarkId::new(kind.as_str(), batch), &batch, |b, &n| {
                b.iter(|| {
                    let mut sampler = Sampler3D::build(
                        kind,
                        spatial_scenario(),
                        SamplerRng::from_seed(7),
                        &caches,
                    )
                    .unwrap();
                    black_box(sampler.sample(black_box(n)))
                });
            });
        }
    }

    group.finish();
}

/// Benchmark a full convergence run followed by U_f.
fn bench_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("convergence");
    group.sample_size(20);
    let caches = HaltonCaches::shared();
    let config = ConvergenceConfig::default();

    for kind in StrategyKind::ALL {
        group.bench_function(BenchmarkId::new("spatial", kind.as_str()), |b| {
            let mut convergence = ConvergenceLoop::new(config);
            b.iter(|| {
                let mut sampler =
                    Sampler3D::build(kind, spatial_scenario(), SamplerRng::from_seed(7), &caches)
                        .unwrap();
                convergence.run(&mut sampler);
                black_box(normal_uncertainty(sampler.normal_history().as_slice()))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_planar_batch,
    bench_spatial_batch,
    bench_convergence
);
criterion_main!(benches);
