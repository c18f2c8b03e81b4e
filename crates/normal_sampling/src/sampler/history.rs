//! Append-only record of sampled normals.

use normal_core::math::vector::NormalVector;

/// Ordered, append-only sequence of unit normals.
///
/// Owned by one sampling strategy; it only grows. A running sum is kept so
/// the average direction costs `O(1)` regardless of history length.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::Vec2;
/// use normal_sampling::sampler::NormalHistory;
///
/// let history = NormalHistory::<Vec2<f64>>::new();
/// assert!(history.is_empty());
/// assert_eq!(history.average(), None);
/// ```
#[derive(Clone, Debug)]
pub struct NormalHistory<V: NormalVector> {
    normals: Vec<V>,
    sum: V,
}

impl<V: NormalVector> NormalHistory<V> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            normals: Vec::new(),
            sum: V::zero(),
        }
    }

    /// Creates an empty history with room for `capacity` normals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            normals: Vec::with_capacity(capacity),
            sum: V::zero(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, normal: V) {
        self.sum += normal;
        self.normals.push(normal);
    }

    /// Number of recorded normals.
    #[inline]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// All normals in sampling order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.normals
    }

    /// Iterator over the normals in sampling order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.normals.iter()
    }

    /// Most recently recorded normal.
    #[inline]
    pub fn last(&self) -> Option<V> {
        self.normals.last().copied()
    }

    /// Unnormalised sum of all normals.
    #[inline]
    pub fn sum(&self) -> V {
        self.sum
    }

    /// Normalised sum of all normals.
    ///
    /// `None` for an empty history or when the normals cancel out.
    #[inline]
    pub fn average(&self) -> Option<V> {
        self.sum.try_normalize()
    }
}

impl<V: NormalVector> Default for NormalHistory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V: NormalVector> IntoIterator for &'a NormalHistory<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.normals.iter()
    }
}
