use crate::percentiles::compute_percentile;

/// Whisker reach as a multiple of the interquartile range.
pub const TUKEY_WHISKER_FACTOR: f64 = 1.5;

/// Five-number summary with Tukey whiskers, as drawn by a box plot.
///
/// Quartiles use linear interpolation (see
/// [`compute_percentile`]). Whiskers extend to the most extreme data points
/// that lie within `1.5 * IQR` of the box; points beyond them are outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotStats {
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Smallest data point not below `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest data point not above `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Data points outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    /// Computes box plot statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(BoxPlotStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics if any value is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use medistat_stats::boxplot::BoxPlotStats;
    ///
    /// let stats = BoxPlotStats::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(stats.median, 3.5);
    /// assert_eq!(stats.upper_whisker, 5.0);
    /// assert_eq!(stats.outliers, [100.0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes box plot statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let reach = TUKEY_WHISKER_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let inside = || {
            sorted_values
                .iter()
                .copied()
                .filter(|v| (low_fence..=high_fence).contains(v))
        };
        // The median always lies within the fences, so `inside` is never empty
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().last().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
