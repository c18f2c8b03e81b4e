//! Summary statistics over experiment measurements.

/// Distribution summary of one measured quantity.
///
/// Percentiles use the nearest lower rank on the sorted data: the median is
/// element `n / 2`, the 95th percentile element `floor(0.95 n)`.
///
/// # Examples
///
/// ```rust
/// use normal_dataset::experiments::SummaryStats;
///
/// let stats = SummaryStats::from_values([3.0, 1.0, 2.0, 4.0]).unwrap();
/// assert_eq!(stats.count, 4);
/// assert_eq!(stats.mean, 2.5);
/// assert_eq!(stats.median, 3.0);
/// assert_eq!(stats.max, 4.0);
///
/// assert!(SummaryStats::from_values(Vec::<f64>::new()).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStats {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation; 0 for a single value.
    pub std_dev: f64,
    /// Median.
    pub median: f64,
    /// 95th percentile.
    pub p95: f64,
    /// 99th percentile.
    pub p99: f64,
    /// Largest value.
    pub max: f64,
}

impl SummaryStats {
    /// Summarises `values`; `None` when there are none.
    ///
    /// NaN values sort last.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut data: Vec<f64> = values.into_iter().collect();
        if data.is_empty() {
            return None;
        }
        data.sort_by(f64::total_cmp);

        let n = data.len();
        let mean = data.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss: f64 = data.iter().map(|x| (x - mean) * (x - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count: n,
            mean,
            std_dev,
            median: data[n / 2],
            p95: data[rank(n, 0.95)],
            p99: data[rank(n, 0.99)],
            max: data[n - 1],
        })
    }
}

#[inline]
fn rank(n: usize, quantile: f64) -> usize {
    ((n as f64 * quantile) as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_value() {
        let stats = SummaryStats::from_values([7.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 7.5);
        assert_eq!(stats.p99, 7.5);
    }

    #[test]
    fn test_percentiles_on_hundred_values() {
        let stats = SummaryStats::from_values((0..100).rev().map(f64::from)).unwrap();
        assert_eq!(stats.median, 50.0);
        assert_eq!(stats.p95, 95.0);
        assert_eq!(stats.p99, 99.0);
        assert_eq!(stats.max, 99.0);
        assert_relative_eq!(stats.mean, 49.5);
    }

    #[test]
    fn test_sample_standard_deviation() {
        let stats = SummaryStats::from_values([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population std dev is 2; sample std dev is sqrt(32 / 7)
        assert_relative_eq!(stats.std_dev, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }
}
