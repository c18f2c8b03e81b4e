//! Halton low-discrepancy sequence.
//!
//! The Halton value for `(index, base)` is the radical inverse (van der
//! Corput expansion) of `index` in `base`: the base-`b` digits of the index
//! mirrored about the radix point. A multi-dimensional Halton point uses a
//! distinct prime base per dimension.

use super::PointSequence;

/// Bases for planar scenarios: `A.x, A.y, B.x, B.y`.
pub const PLANAR_BASES: [u32; 4] = [2, 3, 5, 7];

/// Bases for spatial scenarios: `A.xyz, B.xyz, C.xyz`.
pub const SPATIAL_BASES: [u32; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];

/// Returns the Halton value of `index` in `base`, in `[0, 1)`.
///
/// `index = 0` yields `0.0`; sequences conventionally start at index 1.
/// Runs in `O(log_base(index))`.
///
/// # Panics
///
/// Panics in debug builds if `base < 2`.
///
/// # Examples
///
/// ```rust
/// use normal_core::sequence::halton;
///
/// assert_eq!(halton(0, 2), 0.0);
/// assert_eq!(halton(1, 2), 0.5);
/// assert_eq!(halton(2, 2), 0.25);
/// assert_eq!(halton(3, 2), 0.75);
/// assert!((halton(1, 3) - 1.0 / 3.0).abs() < 1e-15);
/// ```
#[inline]
pub fn halton(index: u64, base: u32) -> f64 {
    debug_assert!(base >= 2, "Halton base must be at least 2, got {}", base);
    let base_u = u64::from(base);
    let inv_base = 1.0 / f64::from(base);

    let mut result = 0.0;
    let mut factor = inv_base;
    let mut i = index;
    while i > 0 {
        result += factor * (i % base_u) as f64;
        i /= base_u;
        factor *= inv_base;
    }
    result
}

/// Stateful multi-dimensional Halton sequence.
///
/// Yields `halton(i, bases[d])` for `i = 1, 2, 3, ...`; every call to
/// [`next_point`](PointSequence::next_point) advances `i` by one. The
/// sequence is unbounded and never repeats.
///
/// # Examples
///
/// ```rust
/// use normal_core::sequence::{halton, HaltonSequence, PointSequence};
///
/// let mut seq = HaltonSequence::spatial();
/// seq.skip(9);
/// let point = seq.next_point();
/// assert_eq!(point[8], halton(10, 23));
/// ```
#[derive(Clone, Debug)]
pub struct HaltonSequence {
    bases: Vec<u32>,
    /// Index of the next point to generate.
    index: u64,
    point: Vec<f64>,
}

impl HaltonSequence {
    /// Index of the first generated point.
    pub const FIRST_INDEX: u64 = 1;

    /// Creates a sequence over the given bases.
    ///
    /// # Panics
    ///
    /// Panics if any base is smaller than 2.
    pub fn new(bases: &[u32]) -> Self {
        assert!(
            bases.iter().all(|&b| b >= 2),
            "Halton bases must be at least 2: {:?}",
            bases
        );
        Self {
            bases: bases.to_vec(),
            index: Self::FIRST_INDEX,
            point: vec![0.0; bases.len()],
        }
    }

    /// Creates the four-dimensional sequence for planar scenarios.
    pub fn planar() -> Self {
        Self::new(&PLANAR_BASES)
    }

    /// Creates the nine-dimensional sequence for spatial scenarios.
    pub fn spatial() -> Self {
        Self::new(&SPATIAL_BASES)
    }

    /// Returns the bases, one per dimension.
    #[inline]
    pub fn bases(&self) -> &[u32] {
        &self.bases
    }

    /// Returns the index the next point will be generated from.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl PointSequence for HaltonSequence {
    #[inline]
    fn dimension(&self) -> usize {
        self.bases.len()
    }

    fn next_point(&mut self) -> &[f64] {
        for (value, &base) in self.point.iter_mut().zip(&self.bases) {
            *value = halton(self.index, base);
        }
        self.index += 1;
        &self.point
    }

    #[inline]
    fn skip(&mut self, n: usize) {
        self.index += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_base_two_prefix() {
        let expected = [0.5, 0.25, 0.75, 0.125, 0.625, 0.375, 0.875, 0.0625];
        for (i, &value) in expected.iter().enumerate() {
            assert_eq!(halton(i as u64 + 1, 2), value);
        }
    }

    #[test]
    fn test_base_three_prefix() {
        let expected = [1.0 / 3.0, 2.0 / 3.0, 1.0 / 9.0, 4.0 / 9.0, 7.0 / 9.0];
        for (i, &value) in expected.iter().enumerate() {
            assert_relative_eq!(halton(i as u64 + 1, 3), value, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_index_zero_is_zero() {
        for &base in &SPATIAL_BASES {
            assert_eq!(halton(0, base), 0.0);
        }
    }

    #[test]
    fn test_no_repeats_within_full_digit_window() {
        // The first b^k - 1 values of base b are distinct multiples of b^-k
        for &base in &PLANAR_BASES {
            let window = u64::from(base).pow(4);
            let mut values: Vec<f64> = (1..window).map(|i| halton(i, base)).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();
            assert_eq!(values.len() as u64, window - 1, "base {}", base);
        }
    }

    #[test]
    fn test_sequence_matches_free_function() {
        let mut seq = HaltonSequence::planar();
        for i in 1..=100_u64 {
            let point = seq.next_point().to_vec();
            for (d, &base) in PLANAR_BASES.iter().enumerate() {
                assert_eq!(point[d], halton(i, base));
            }
        }
        assert_eq!(seq.index(), 101);
    }

    #[test]
    fn test_skip_matches_stepping() {
        let mut a = HaltonSequence::spatial();
        let mut b = HaltonSequence::spatial();

        a.skip(41);
        for _ in 0..41 {
            b.next_point();
        }
        assert_eq!(a.next_point(), b.next_point());
        assert_eq!(a.index(), HaltonSequence::FIRST_INDEX + 42);
    }

    #[test]
    #[should_panic(expected = "Halton bases must be at least 2")]
    fn test_invalid_base_panics() {
        let _ = HaltonSequence::new(&[2, 1]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn test_halton_in_unit_interval(index in 1_u64..(1_u64 << 40), base in 2_u32..64) {
                let value = halton(index, base);
                prop_assert!(value >= 0.0);
                prop_assert!(value < 1.0);
            }

            #[test]
            fn test_halton_positive_for_positive_index(index in 1_u64..1_000_000, base in 2_u32..32) {
                prop_assert!(halton(index, base) > 0.0);
            }
        }
    }
}
