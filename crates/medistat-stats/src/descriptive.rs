/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and dispersion
/// for a dataset of `f64` values. Dispersion uses the sample (N-1) denominator,
/// so it is undefined for a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset.
    ///
    /// For an even number of values this is the mean of the two middle values.
    pub median: f64,
    /// The most frequent value; the smallest one when several values tie.
    pub mode: f64,
    /// The sample variance (N-1 denominator), or `None` for a single value.
    pub variance: Option<f64>,
    /// The sample standard deviation, or `None` for a single value.
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values. The values will be collected and sorted internally.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if any value is NaN, since NaN has no place in an ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use medistat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0, 4.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 6);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.median, 3.5);
    /// assert_eq!(stats.mode, 4.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    /// Use this when you already have sorted data to avoid unnecessary work.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use medistat_stats::descriptive::DescriptiveStats;
    /// let mut values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStats::from_sorted(&values).unwrap();
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.variance, Some(2.5));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;

        // A constant sample has exactly zero spread; summation rounding must not
        // turn it into a tiny positive variance.
        let is_constant = min.total_cmp(&max).is_eq();
        let mean = if is_constant {
            min
        } else {
            mean_of(sorted_values, n)
        };
        let median = median_of_sorted(sorted_values);
        let mode = mode_of_sorted(sorted_values);
        let variance = (count >= 2).then(|| {
            if is_constant {
                0.0
            } else {
                sorted_values
                    .iter()
                    .map(|v| (v - mean).powi(2))
                    .sum::<f64>()
                    / (n - 1.0)
            }
        });
        let std_dev = variance.map(f64::sqrt);

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            mode,
            variance,
            std_dev,
        })
    }
}

/// Returns the median of sorted values, averaging the two middle values for
/// even-length input. Returns `NaN` for empty input.
fn mean_of(values: &[f64], n: f64) -> f64 {
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        // The total left the f64 range; scale each term before adding
        values.iter().map(|v| v / n).sum()
    }
}

fn median_of_sorted(sorted_values: &[f64]) -> f64 {
    let len = sorted_values.len();
    if len == 0 {
        return f64::NAN;
    }
    let mid = len / 2;
    if len % 2 == 1 {
        sorted_values[mid]
    } else {
        f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
    }
}

/// Returns the most frequent value of sorted data.
///
/// Ties resolve to the smallest tied value: runs are scanned in ascending order
/// and only a strictly longer run replaces the current best.
/// Returns `NaN` for empty input.
fn mode_of_sorted(sorted_values: &[f64]) -> f64 {
    let mut best = (f64::NAN, 0);
    for run in sorted_values.chunk_by(|a, b| a.total_cmp(b).is_eq()) {
        if run.len() > best.1 {
            best = (run[0], run.len());
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_returns_none() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
    }

    #[test]
    fn test_single_value_has_undefined_dispersion() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.mode, 42.0);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn test_sample_variance_uses_n_minus_one() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        // Sum of squared deviations is 32; 32 / 7
        assert!((stats.variance.unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev.unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values_have_zero_spread() {
        let stats = DescriptiveStats::new([0.1; 7]).unwrap();
        assert_eq!(stats.mean, 0.1);
        assert_eq!(stats.variance, Some(0.0));
        assert_eq!(stats.std_dev, Some(0.0));
    }

    #[test]
    fn test_mean_of_huge_values_stays_finite() {
        let stats = DescriptiveStats::new([1e308, 1.5e308, 1.7e308]).unwrap();
        assert!((stats.mean - 1.4e308).abs() < 1e-12 * 1.4e308);
        // Squared deviations exceed f64::MAX
        assert_eq!(stats.variance, Some(f64::INFINITY));
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_nan_panics() {
        let _ = DescriptiveStats::new([1.0, f64::NAN]);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(DescriptiveStats::new([3.0, 1.0, 2.0]).unwrap().median, 2.0);
        assert_eq!(
            DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap().median,
            2.5
        );
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        let stats = DescriptiveStats::new([9.0, 3.0, 9.0, 3.0, 5.0]).unwrap();
        assert_eq!(stats.mode, 3.0);

        // All values unique: every value ties with count 1
        let stats = DescriptiveStats::new([7.0, 5.0, 6.0]).unwrap();
        assert_eq!(stats.mode, 5.0);
    }

    #[test]
    fn test_mode_prefers_longest_run() {
        let stats = DescriptiveStats::new([1.0, 2.0, 2.0, 8.0, 8.0, 8.0]).unwrap();
        assert_eq!(stats.mode, 8.0);
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
