/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between closest ranks: the k-th percentile sits
/// at fractional position `(n - 1) * k / 100` and is interpolated between the
/// two neighbouring values. This matches the default quantile definition of
/// common data-frame libraries, so `describe()`-style quartiles agree.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (clamped to 0.0..=100.0)
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use medistat_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 25.0), 1.75);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let position = (last as f64) * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = position - lower as f64;
    let (a, b) = (sorted_values[lower], sorted_values[upper]);
    a + (b - a) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_of_single_value() {
        assert_eq!(compute_percentile(&[7.0], 0.0), 7.0);
        assert_eq!(compute_percentile(&[7.0], 50.0), 7.0);
        assert_eq!(compute_percentile(&[7.0], 100.0), 7.0);
    }

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_percentile_extremes_are_min_and_max() {
        let values = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(compute_percentile(&values, 0.0), 1.0);
        assert_eq!(compute_percentile(&values, 100.0), 16.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(compute_percentile(&values, 25.0), 20.0);
        assert_eq!(compute_percentile(&values, 10.0), 14.0);
        assert_eq!(compute_percentile(&values, 90.0), 46.0);
    }

    #[test]
    fn test_quartiles_of_even_length() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(compute_percentile(&values, 25.0), 3.25);
        assert_eq!(compute_percentile(&values, 50.0), 5.5);
        assert_eq!(compute_percentile(&values, 75.0), 7.75);
    }
}
