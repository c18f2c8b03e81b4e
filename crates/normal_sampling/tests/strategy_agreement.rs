//! Cross-strategy behaviour of the sampling engine.
//!
//! # Test Categories
//!
//! 1. **Reproducibility**: seeded strategies give identical averages
//! 2. **Agreement**: random, Halton and cached Halton converge to one direction
//! 3. **Properties**: unit-length normals for arbitrary scenarios

use approx::assert_relative_eq;
use normal_core::math::angular::{to_degrees, unsigned_unit_angular_difference};
use normal_core::math::vector::{NormalVector, Vec2, Vec3};
use normal_sampling::convergence::{ConvergenceConfig, ConvergenceLoop};
use normal_sampling::metric::{normal_uncertainty, strategy_uncertainty};
use normal_sampling::rng::SamplerRng;
use normal_sampling::sampler::{
    HaltonCaches, Sampler2D, Sampler3D, SamplingStrategy, StrategyKind, VolumeSampler2D,
};
use normal_sampling::scenario::{Scenario2D, Scenario3D, Scenario3DParams};

fn diagonal_scenario() -> Scenario2D {
    Scenario2D::from_bounds(
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(3.0, 3.0),
    )
    .unwrap()
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_seeded_average_is_reproducible() {
    let run = |seed| {
        let mut sampler = VolumeSampler2D::random(diagonal_scenario(), SamplerRng::from_seed(seed));
        sampler.sample(5_000);
        sampler.average_normal().unwrap()
    };

    assert_eq!(run(2024), run(2024));
    assert_ne!(run(2024), run(2025));
}

#[test]
fn test_cloned_scenario_gives_identical_halton_run() {
    let scenario = diagonal_scenario();
    let mut a = VolumeSampler2D::halton(scenario.clone());
    let mut b = VolumeSampler2D::halton(scenario);
    a.sample(1_000);
    b.sample(1_000);
    assert_eq!(a.normal_history().as_slice(), b.normal_history().as_slice());
}

// ============================================================================
// Agreement between strategies
// ============================================================================

#[test]
fn test_strategies_agree_in_2d() {
    let caches = HaltonCaches::with_capacity(50_000);
    let scenario = diagonal_scenario();

    let averages: Vec<Vec2<f64>> = [
        StrategyKind::Random,
        StrategyKind::Halton,
        StrategyKind::CachedHalton,
    ]
    .into_iter()
    .map(|kind| {
        let mut sampler =
            Sampler2D::build(kind, scenario.clone(), SamplerRng::from_seed(8), &caches).unwrap();
        sampler.sample(40_000);
        sampler.average_normal().unwrap()
    })
    .collect();

    let expected = Vec2::new(-1.0, 1.0).normalize();
    for average in averages {
        let degrees = to_degrees(unsigned_unit_angular_difference(average, expected));
        assert!(degrees < 0.5, "average {:?} is {} degrees off", average, degrees);
    }
}

#[test]
fn test_strategies_agree_on_uncertainty_in_3d() {
    let caches = HaltonCaches::with_capacity(50_000);
    let scenario = Scenario3D::from_bounds(
        (Vec3::splat(0.0), Vec3::splat(1.0)),
        (Vec3::new(4.0, 0.0, 0.0), Vec3::new(5.0, 1.0, 1.0)),
        (Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.0, 5.0, 1.0)),
    )
    .unwrap();

    let mut random =
        Sampler3D::build(StrategyKind::Random, scenario.clone(), SamplerRng::from_seed(3), &caches)
            .unwrap();
    let mut halton =
        Sampler3D::build(StrategyKind::CachedHalton, scenario, SamplerRng::from_seed(3), &caches)
            .unwrap();
    random.sample(40_000);
    halton.sample(40_000);

    let u_random = strategy_uncertainty(&random);
    let u_halton = strategy_uncertainty(&halton);
    assert!(u_halton > 0.0);
    assert_relative_eq!(u_random, u_halton, max_relative = 0.05);
}

#[test]
fn test_every_volume_strategy_finishes_the_convergence_loop() {
    let config = ConvergenceConfig::builder()
        .samples_per_run(100)
        .max_change_degrees(0.01)
        .max_history(50_000)
        .build()
        .unwrap();
    let mut convergence = ConvergenceLoop::new(config);
    let caches = HaltonCaches::with_capacity(60_000);
    let mut rng = SamplerRng::from_seed(99);

    for _ in 0..5 {
        let scenario = Scenario2D::generate(&mut rng, &Default::default());
        for kind in [
            StrategyKind::Random,
            StrategyKind::Halton,
            StrategyKind::CachedHalton,
        ] {
            let mut sampler =
                Sampler2D::build(kind, scenario.clone(), SamplerRng::from_seed(1), &caches)
                    .unwrap();
            let outcome = convergence.run(&mut sampler);

            assert!(outcome.is_converged(), "{} did not converge", kind);
            assert_eq!(outcome.total_samples, outcome.batches * 100);
            assert!(outcome.total_samples <= 50_000);
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_normals_are_unit_length(seed in any::<u64>()) {
            let mut rng = SamplerRng::from_seed(seed);
            let scenario = Scenario3D::generate(&mut rng, &Scenario3DParams::default());
            let caches = HaltonCaches::shared();

            for kind in StrategyKind::ALL {
                let mut sampler =
                    Sampler3D::build(kind, scenario.clone(), SamplerRng::from_seed(seed), &caches)
                        .unwrap();
                sampler.sample(64);
                for n in sampler.normal_history() {
                    prop_assert!((n.length() - 1.0).abs() < 1e-4);
                }
            }
        }

        #[test]
        fn test_uncertainty_is_bounded(seed in any::<u64>()) {
            let mut rng = SamplerRng::from_seed(seed);
            let scenario = Scenario2D::generate(&mut rng, &Default::default());
            let mut sampler = VolumeSampler2D::halton(scenario);
            sampler.sample(256);

            let u = normal_uncertainty(sampler.normal_history().as_slice());
            prop_assert!(u >= 0.0);
            prop_assert!(u <= std::f64::consts::PI);
        }
    }
}
