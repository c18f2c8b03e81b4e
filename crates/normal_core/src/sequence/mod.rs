//! Point sequences in the unit hypercube.
//!
//! Sampling strategies draw one point of the unit hypercube per attempt and
//! map each coordinate onto one axis of one box. This module defines the
//! interface for such sequences and the Halton implementations.
//!
//! ## Module Structure
//!
//! - [`halton`]: radical inverse, base tables and the stateful [`HaltonSequence`]
//! - [`cache`]: the precomputed [`HaltonCache`] and [`CachedHaltonSequence`]
//!
//! Pseudo-random sequences implement the same trait in the sampling layer.

pub mod cache;
pub mod halton;

pub use cache::{
    CachedHaltonSequence, HaltonCache, PlanarHaltonCache, SpatialHaltonCache,
    DEFAULT_CACHE_CAPACITY,
};
pub use halton::{halton, HaltonSequence, PLANAR_BASES, SPATIAL_BASES};

/// Source of points in the unit hypercube `[0, 1)^d`.
///
/// Implemented by deterministic low-discrepancy sequences (Halton, cached
/// Halton) and by pseudo-random generators. One call to
/// [`next_point`](Self::next_point) corresponds to exactly one sampling
/// attempt, whether or not the attempt yields a usable normal.
///
/// # Examples
///
/// ```rust
/// use normal_core::sequence::{HaltonSequence, PointSequence};
///
/// let mut seq = HaltonSequence::planar();
/// assert_eq!(seq.dimension(), 4);
///
/// let first = seq.next_point().to_vec();
/// assert_eq!(first[0], 0.5); // index 1 in base 2
/// ```
pub trait PointSequence {
    /// Returns the dimensionality of the sequence.
    fn dimension(&self) -> usize;

    /// Advances the sequence and returns the next point.
    ///
    /// The returned slice has `dimension()` values, each in `[0, 1)`.
    fn next_point(&mut self) -> &[f64];

    /// Skips ahead by `n` points in the sequence.
    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.next_point();
        }
    }
}
