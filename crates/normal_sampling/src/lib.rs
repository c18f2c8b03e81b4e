//! # normal_sampling: Sampling Engine for Normal Uncertainty Estimation
//!
//! ## Layer 2 (Engine) Role
//!
//! normal_sampling turns box geometry into streams of unit normals and
//! reduces them to directions and uncertainties:
//! - Seeded random number generation and unit-hypercube point sources (`rng`)
//! - Two- and three-box scenarios with generators and normalisation (`scenario`)
//! - Interchangeable sampling strategies behind one contract (`sampler`)
//! - Batch-wise convergence detection of the running average normal (`convergence`)
//! - The circular RMS uncertainty metric U_f (`metric`)
//!
//! ## Usage Example
//!
//! ```rust
//! use normal_sampling::convergence::{ConvergenceConfig, ConvergenceLoop};
//! use normal_sampling::metric::normal_uncertainty;
//! use normal_sampling::rng::SamplerRng;
//! use normal_sampling::sampler::{HaltonSampler2D, SamplingStrategy};
//! use normal_sampling::scenario::{Scenario2D, Scenario2DParams};
//!
//! let mut rng = SamplerRng::from_seed(7);
//! let scenario = Scenario2D::generate(&mut rng, &Scenario2DParams::default());
//!
//! let mut sampler = HaltonSampler2D::halton(scenario);
//! let config = ConvergenceConfig::builder().samples_per_run(200).build().unwrap();
//! let outcome = ConvergenceLoop::new(config).run(&mut sampler);
//!
//! assert!(outcome.total_samples > 0);
//! let u_f = normal_uncertainty(sampler.normal_history().as_slice());
//! assert!(u_f >= 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `StrategyKind`, scenario parameters and vectors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod convergence;
pub mod error;
pub mod metric;
pub mod rng;
pub mod sampler;
pub mod scenario;

pub use error::{ConfigError, SamplingError, ScenarioError};
