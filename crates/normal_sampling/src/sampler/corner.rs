//! Corner enumeration proxy for 3D scenarios.

use super::volume::DEGENERATE_THRESHOLD_3D;
use super::{NormalHistory, SamplingStrategy};
use crate::scenario::Scenario3D;
use normal_core::math::vector::{NormalVector, Vec3};

/// Number of `(A, B, C)` corner combinations.
pub const CORNER_COMBINATIONS: usize = 8 * 8 * 8;

/// Decodes a combination index into corner indices `(a, b, c)`.
///
/// C varies fastest, then B, then A. Indices at or past
/// [`CORNER_COMBINATIONS`] wrap.
///
/// # Examples
///
/// ```rust
/// use normal_sampling::sampler::corner_triplet;
///
/// assert_eq!(corner_triplet(0), (0, 0, 0));
/// assert_eq!(corner_triplet(9), (0, 1, 1));
/// assert_eq!(corner_triplet(511), (7, 7, 7));
/// ```
#[inline]
pub fn corner_triplet(index: usize) -> (usize, usize, usize) {
    ((index / 64) % 8, (index / 8) % 8, index % 8)
}

/// Deterministic sampler over the corners of the three boxes.
///
/// Visits each of the 512 corner triangles once, in [`corner_triplet`]
/// order. Degenerate corner triangles are skipped. Once all combinations
/// are visited, `sample` returns 0.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::Vec3;
/// use normal_sampling::sampler::{CornerSampler3D, SamplingStrategy};
/// use normal_sampling::scenario::Scenario3D;
///
/// let s = Scenario3D::from_bounds(
///     (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
///     (Vec3::new(4.0, 0.0, 0.0), Vec3::new(5.0, 1.0, 1.0)),
///     (Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.0, 5.0, 1.0)),
/// ).unwrap();
///
/// let mut sampler = CornerSampler3D::new(s);
/// let added = sampler.sample(1_000);
/// assert!(added > 0 && added <= 512);
/// assert!(sampler.is_exhausted());
/// assert_eq!(sampler.sample(1), 0);
/// ```
#[derive(Clone, Debug)]
pub struct CornerSampler3D {
    scenario: Scenario3D,
    index: usize,
    history: NormalHistory<Vec3<f64>>,
}

impl CornerSampler3D {
    /// Creates a sampler at the first combination.
    pub fn new(scenario: Scenario3D) -> Self {
        Self {
            scenario,
            index: 0,
            history: NormalHistory::with_capacity(CORNER_COMBINATIONS),
        }
    }

    /// The sampled scenario.
    #[inline]
    pub fn scenario(&self) -> &Scenario3D {
        &self.scenario
    }

    /// Number of combinations visited so far.
    #[inline]
    pub fn visited(&self) -> usize {
        self.index
    }

    /// Returns `true` once every combination has been visited.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= CORNER_COMBINATIONS
    }
}

impl SamplingStrategy for CornerSampler3D {
    type Normal = Vec3<f64>;

    fn sample(&mut self, count: usize) -> usize {
        let mut added = 0;
        while self.index < CORNER_COMBINATIONS && added < count {
            let (ia, ib, ic) = corner_triplet(self.index);
            self.index += 1;

            let pa = self.scenario.a().corner(ia);
            let pb = self.scenario.b().corner(ib);
            let pc = self.scenario.c().corner(ic);

            let normal = (pb - pa).cross(pc - pa);
            if normal.length_squared() > DEGENERATE_THRESHOLD_3D {
                self.history.push(normal.normalize());
                added += 1;
            }
        }
        added
    }

    #[inline]
    fn normal_history(&self) -> &NormalHistory<Vec3<f64>> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SamplerRng;
    use crate::scenario::Scenario3DParams;
    use std::collections::HashSet;

    #[test]
    fn test_triplet_covers_all_combinations() {
        let triplets: HashSet<_> = (0..CORNER_COMBINATIONS).map(corner_triplet).collect();
        assert_eq!(triplets.len(), CORNER_COMBINATIONS);

        for index in 0..CORNER_COMBINATIONS {
            let (a, b, c) = corner_triplet(index);
            assert!(a < 8 && b < 8 && c < 8);
            assert_eq!(a * 64 + b * 8 + c, index);
        }
    }

    #[test]
    fn test_c_varies_fastest() {
        assert_eq!(corner_triplet(1), (0, 0, 1));
        assert_eq!(corner_triplet(8), (0, 1, 0));
        assert_eq!(corner_triplet(64), (1, 0, 0));
        assert_eq!(corner_triplet(512), corner_triplet(0));
    }

    #[test]
    fn test_fresh_sampler_returns_non_degenerate_count() {
        let mut rng = SamplerRng::from_seed(5);
        for _ in 0..50 {
            let s = Scenario3D::generate(&mut rng, &Scenario3DParams::default());

            let expected = (0..CORNER_COMBINATIONS)
                .filter(|&i| {
                    let (a, b, c) = corner_triplet(i);
                    let pa = s.a().corner(a);
                    let n = (s.b().corner(b) - pa).cross(s.c().corner(c) - pa);
                    n.length_squared() > DEGENERATE_THRESHOLD_3D
                })
                .count();

            let mut sampler = CornerSampler3D::new(s);
            assert_eq!(sampler.sample(1_000), expected);
            assert_eq!(sampler.normal_history().len(), expected);
            assert_eq!(sampler.sample(1_000), 0);
        }
    }

    #[test]
    fn test_partial_batches_never_exceed_total() {
        let s = Scenario3D::from_bounds(
            (Vec3::splat(0.0), Vec3::splat(1.0)),
            (Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0)),
            (Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 4.0, 1.0)),
        )
        .unwrap();
        let mut sampler = CornerSampler3D::new(s);

        let mut total = 0;
        loop {
            let added = sampler.sample(100);
            assert!(added <= 100);
            if added == 0 {
                break;
            }
            total += added;
        }
        assert!(total <= CORNER_COMBINATIONS);
        assert_eq!(sampler.visited(), CORNER_COMBINATIONS);
        assert!(sampler.is_exhausted());
    }
}
