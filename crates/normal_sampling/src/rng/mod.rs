//! # Random Number Generation
//!
//! Seeded generators and the pseudo-random point source used by the basic
//! sampling strategies.
//!
//! ## Module Structure
//!
//! - [`prng`]: [`SamplerRng`], a seeded PRNG wrapper with stream derivation
//! - [`sequence`]: [`RandomSequence`], uniform points implementing
//!   [`PointSequence`](normal_core::sequence::PointSequence)
//!
//! ## Reproducibility
//!
//! Every generator is built from a 64-bit seed. Parallel workers never share
//! a generator; each derives its own with [`SamplerRng::for_stream`], so a
//! given `(seed, stream)` pair always yields the same numbers.
//!
//! ```rust
//! use normal_sampling::rng::SamplerRng;
//!
//! let mut a = SamplerRng::for_stream(42, 3);
//! let mut b = SamplerRng::for_stream(42, 3);
//! assert_eq!(a.gen_uniform(), b.gen_uniform());
//! ```

pub mod prng;
pub mod sequence;

pub use prng::{derive_seed, SamplerRng};
pub use sequence::RandomSequence;
