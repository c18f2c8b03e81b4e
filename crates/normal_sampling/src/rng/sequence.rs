//! Pseudo-random points in the unit hypercube.

use normal_core::sequence::PointSequence;
use rand::{Rng, RngCore};

/// Independent uniform points in `[0, 1)^d` drawn from a generator.
///
/// Coordinates of one point are drawn in order, so a point of dimension 4
/// consumes four consecutive uniforms.
///
/// # Examples
///
/// ```rust
/// use normal_core::sequence::PointSequence;
/// use normal_sampling::rng::{RandomSequence, SamplerRng};
///
/// let mut seq = RandomSequence::new(SamplerRng::from_seed(1), 9);
/// let point = seq.next_point();
/// assert_eq!(point.len(), 9);
/// assert!(point.iter().all(|&t| (0.0..1.0).contains(&t)));
/// ```
#[derive(Clone, Debug)]
pub struct RandomSequence<R> {
    rng: R,
    point: Vec<f64>,
}

impl<R: RngCore> RandomSequence<R> {
    /// Creates a `dimension`-dimensional sequence drawing from `rng`.
    pub fn new(rng: R, dimension: usize) -> Self {
        Self {
            rng,
            point: vec![0.0; dimension],
        }
    }
}

impl<R: RngCore> PointSequence for RandomSequence<R> {
    #[inline]
    fn dimension(&self) -> usize {
        self.point.len()
    }

    #[inline]
    fn next_point(&mut self) -> &[f64] {
        for value in self.point.iter_mut() {
            *value = self.rng.gen();
        }
        &self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SamplerRng;

    #[test]
    fn test_consumes_generator_in_order() {
        let mut seq = RandomSequence::new(SamplerRng::from_seed(11), 4);
        let mut reference = SamplerRng::from_seed(11);

        let point = seq.next_point().to_vec();
        for &value in &point {
            assert_eq!(value, reference.gen_uniform());
        }
    }

    #[test]
    fn test_skip_advances_generator() {
        let mut a = RandomSequence::new(SamplerRng::from_seed(5), 3);
        let mut b = RandomSequence::new(SamplerRng::from_seed(5), 3);
        a.skip(2);
        b.next_point();
        b.next_point();
        assert_eq!(a.next_point(), b.next_point());
    }

    #[test]
    fn test_borrowed_generator() {
        let mut rng = SamplerRng::from_seed(8);
        {
            let mut seq = RandomSequence::new(&mut rng, 2);
            seq.next_point();
        }
        let mut reference = SamplerRng::from_seed(8);
        reference.gen_uniform();
        reference.gen_uniform();
        assert_eq!(rng.gen_uniform(), reference.gen_uniform());
    }
}
