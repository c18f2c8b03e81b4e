//! # normal_dataset: Dataset Harness for Normal Uncertainty Estimation
//!
//! ## Layer 3 (Harness) Role
//!
//! normal_dataset runs the sampling engine over many random scenarios:
//! - Dataset schema for two- and three-box scenarios (`schema`)
//! - Sequential and parallel labelled CSV generation (`generator`)
//! - Strategy comparisons, summary statistics and predictors (`experiments`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          normal_dataset (L3)            │
//! │  schema/  generator/  experiments/      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          normal_sampling (L2)           │
//! │  scenarios, strategies, convergence     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            normal_core (L1)             │
//! │  vectors, angles, Halton sequences      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use normal_dataset::{DatasetConfig, DatasetGenerator};
//! use normal_sampling::sampler::StrategyKind;
//! use normal_sampling::scenario::Scenario3D;
//!
//! let config = DatasetConfig::builder()
//!     .size(8)
//!     .seed(3)
//!     .strategy(StrategyKind::Random)
//!     .ground_truth_samples(500)
//!     .chunk_size(2)
//!     .parallel(true)
//!     .build()
//!     .unwrap();
//! let generator = DatasetGenerator::<Scenario3D>::new(config, Default::default()).unwrap();
//!
//! let mut csv = Vec::new();
//! let summary = generator.generate(&mut csv).unwrap();
//! assert_eq!(summary.rows, 8);
//! assert_eq!(summary.chunks, 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configurations and experiment reports

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod experiments;
pub mod generator;
pub mod schema;

pub use config::{DatasetConfig, DatasetConfigBuilder};
pub use error::{DatasetError, DatasetResult};
pub use generator::{DatasetGenerator, DatasetRow, DatasetSummary};
pub use schema::{ground_truth, DatasetScenario, GroundTruth, TARGET_COLUMN};
