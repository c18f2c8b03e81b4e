//! # normal_core: Geometric Foundation for Normal Uncertainty Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! normal_core is the bottom layer of the workspace and provides:
//! - Small fixed-size vector types `Vec2` / `Vec3` generic over `num_traits::Float` (`math::vector`)
//! - Angle conversions and robust angular differences (`math::angular`)
//! - The Halton radical inverse and stateful Halton sequences (`sequence::halton`)
//! - The lazily initialised, shareable Halton value cache (`sequence::cache`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other normal_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use normal_core::math::angular::{to_degrees, unsigned_angular_difference};
//! use normal_core::math::vector::Vec3;
//! use normal_core::sequence::halton::halton;
//!
//! let up = Vec3::new(0.0_f64, 1.0, 0.0);
//! let right = Vec3::new(1.0_f64, 0.0, 0.0);
//! let angle = to_degrees(unsigned_angular_difference(up, right));
//! assert!((angle - 90.0).abs() < 1e-12);
//!
//! assert_eq!(halton(1, 2), 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Vec2` and `Vec3`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod sequence;
