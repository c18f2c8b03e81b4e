//! Precomputed Halton values with lazy, once-only initialisation.
//!
//! [`HaltonCache`] stores `capacity` points of a `D`-dimensional Halton
//! sequence. The table is built on first access (or by an explicit
//! [`initialize`](HaltonCache::initialize) call) behind a [`OnceLock`], so
//! concurrent readers never observe a partially built table and the build
//! runs exactly once.
//!
//! ## Wraparound
//!
//! Reads take the index modulo the capacity. Past `capacity` samples a
//! sampler silently reuses earlier values, trading statistical independence
//! for bounded memory. With the default capacity of 200,000 this is well
//! beyond typical convergence budgets; callers needing longer independent
//! streams should use the uncached [`HaltonSequence`](super::HaltonSequence).
//!
//! ## Sharing
//!
//! Caches are plain values passed around behind an [`Arc`]. Tests create
//! fresh instances; production code can use the process-wide
//! `shared_planar()` / `shared_spatial()` handles.

use super::halton::{halton, PLANAR_BASES, SPATIAL_BASES};
use super::PointSequence;
use std::sync::{Arc, OnceLock};

/// Default number of cached points per dimension.
pub const DEFAULT_CACHE_CAPACITY: usize = 200_000;

/// Cache of the four-dimensional planar Halton sequence.
pub type PlanarHaltonCache = HaltonCache<4>;

/// Cache of the nine-dimensional spatial Halton sequence.
pub type SpatialHaltonCache = HaltonCache<9>;

/// Fixed-capacity table of `D`-dimensional Halton points.
///
/// Entry `i` holds `halton(i + 1, bases[d])` for every dimension `d`.
///
/// # Examples
///
/// ```rust
/// use normal_core::sequence::{halton, PlanarHaltonCache};
///
/// let cache = PlanarHaltonCache::planar_with_capacity(16);
/// assert!(!cache.is_initialized());
///
/// assert_eq!(cache.get(0, 0), halton(1, 2));
/// assert!(cache.is_initialized());
///
/// // Index 16 wraps to entry 0
/// assert_eq!(cache.get(16, 3), halton(1, 7));
/// ```
#[derive(Debug)]
pub struct HaltonCache<const D: usize> {
    bases: [u32; D],
    capacity: usize,
    table: OnceLock<Vec<[f64; D]>>,
}

impl<const D: usize> HaltonCache<D> {
    /// Creates an empty cache over the given bases.
    ///
    /// The table is not built until first access. A capacity of zero is
    /// raised to one.
    ///
    /// # Panics
    ///
    /// Panics if any base is smaller than 2.
    pub fn with_bases(bases: [u32; D], capacity: usize) -> Self {
        assert!(
            bases.iter().all(|&b| b >= 2),
            "Halton bases must be at least 2: {:?}",
            bases
        );
        Self {
            bases,
            capacity: capacity.max(1),
            table: OnceLock::new(),
        }
    }

    /// Builds the table if it has not been built yet.
    ///
    /// Idempotent: a second call is a no-op. Safe to call from several
    /// threads; only one builds the table, the others wait for it.
    pub fn initialize(&self) {
        self.table();
    }

    /// Returns whether the table has been built.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    /// Returns the cached value for `index` (modulo capacity) in `dimension`.
    ///
    /// Equals `halton((index % capacity) + 1, bases[dimension])`.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= D`.
    #[inline]
    pub fn get(&self, index: usize, dimension: usize) -> f64 {
        self.point(index)[dimension]
    }

    /// Returns the full cached point for `index` (modulo capacity).
    #[inline]
    pub fn point(&self, index: usize) -> &[f64; D] {
        &self.table()[index % self.capacity]
    }

    /// Returns the number of cached points.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the bases, one per dimension.
    #[inline]
    pub fn bases(&self) -> &[u32; D] {
        &self.bases
    }

    fn table(&self) -> &[[f64; D]] {
        self.table.get_or_init(|| {
            (0..self.capacity)
                .map(|i| {
                    let index = i as u64 + 1;
                    std::array::from_fn(|d| halton(index, self.bases[d]))
                })
                .collect()
        })
    }
}

impl HaltonCache<4> {
    /// Creates a planar cache with the default capacity.
    pub fn planar() -> Self {
        Self::with_bases(PLANAR_BASES, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a planar cache with a custom capacity.
    pub fn planar_with_capacity(capacity: usize) -> Self {
        Self::with_bases(PLANAR_BASES, capacity)
    }

    /// Returns the process-wide planar cache.
    ///
    /// The handle is created once; its table is still built lazily.
    pub fn shared_planar() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PlanarHaltonCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::planar())))
    }
}

impl HaltonCache<9> {
    /// Creates a spatial cache with the default capacity.
    pub fn spatial() -> Self {
        Self::with_bases(SPATIAL_BASES, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a spatial cache with a custom capacity.
    pub fn spatial_with_capacity(capacity: usize) -> Self {
        Self::with_bases(SPATIAL_BASES, capacity)
    }

    /// Returns the process-wide spatial cache.
    pub fn shared_spatial() -> Arc<Self> {
        static SHARED: OnceLock<Arc<SpatialHaltonCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::spatial())))
    }
}

/// Halton point sequence read from a shared [`HaltonCache`].
///
/// Produces the same values as a [`HaltonSequence`](super::HaltonSequence)
/// over the same bases for the first `capacity` points, then wraps.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use normal_core::sequence::{CachedHaltonSequence, PlanarHaltonCache, PointSequence};
///
/// let cache = Arc::new(PlanarHaltonCache::planar_with_capacity(4));
/// let mut seq = CachedHaltonSequence::new(cache);
/// let first = seq.next_point().to_vec();
/// seq.skip(3);
/// assert_eq!(seq.next_point(), first.as_slice());
/// ```
#[derive(Clone, Debug)]
pub struct CachedHaltonSequence<const D: usize> {
    cache: Arc<HaltonCache<D>>,
    /// Zero-based index of the next cache entry to read.
    index: usize,
    point: [f64; D],
}

impl<const D: usize> CachedHaltonSequence<D> {
    /// Creates a sequence reading from `cache`, initialising it if needed.
    pub fn new(cache: Arc<HaltonCache<D>>) -> Self {
        cache.initialize();
        Self {
            cache,
            index: 0,
            point: [0.0; D],
        }
    }

    /// Returns the zero-based index of the next cache read.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the underlying cache.
    #[inline]
    pub fn cache(&self) -> &Arc<HaltonCache<D>> {
        &self.cache
    }
}

impl<const D: usize> PointSequence for CachedHaltonSequence<D> {
    #[inline]
    fn dimension(&self) -> usize {
        D
    }

    #[inline]
    fn next_point(&mut self) -> &[f64] {
        self.point = *self.cache.point(self.index);
        self.index = self.index.wrapping_add(1);
        &self.point
    }

    #[inline]
    fn skip(&mut self, n: usize) {
        self.index = self.index.wrapping_add(n);
    }
}
