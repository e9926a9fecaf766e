//! Confidence interval for the population mean
//!
//! Uses the t-distribution with `n - 1` degrees of freedom:
//!
//! ```text
//! SE     = s / √n
//! t*     = quantile_t(n-1)((1 + level) / 2)
//! margin = t* · SE
//! CI     = (x̄ - margin, x̄ + margin)
//! ```

use medistat_stats::descriptive::DescriptiveStats;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::error::{self, AnalysisError};

/// A two-sided confidence interval for the population mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Confidence level, in `(0, 1)`
    pub level: f64,
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Sample mean the interval is centered on
    pub mean: f64,
    /// Standard error of the mean
    pub standard_error: f64,
    /// Two-sided critical value of the t-distribution
    pub critical_value: f64,
    /// Degrees of freedom (`n - 1`)
    pub degrees_of_freedom: usize,
    /// Half-width of the interval
    pub margin: f64,
}

impl ConfidenceInterval {
    /// Estimates a confidence interval for the mean of `sample`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidConfidenceLevel`] if `level` is not in `(0, 1)`
    /// - [`AnalysisError::NonFiniteValue`] if the sample holds NaN or an infinity
    /// - [`AnalysisError::InsufficientSample`] if the sample has fewer than 2 values
    /// - [`AnalysisError::NumericOverflow`] if the values are so large that the
    ///   mean, the standard deviation or a bound is not a finite number
    ///
    /// # Examples
    ///
    /// ```
    /// use medistat_analysis::interval::ConfidenceInterval;
    ///
    /// let ci = ConfidenceInterval::estimate(&[118.0, 121.0, 124.0, 119.0, 123.0], 0.95).unwrap();
    /// assert_eq!(ci.degrees_of_freedom, 4);
    /// assert!(ci.lower < ci.mean && ci.mean < ci.upper);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn estimate(sample: &[f64], level: f64) -> Result<Self, AnalysisError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(AnalysisError::InvalidConfidenceLevel { level });
        }
        error::ensure_finite_sample(sample)?;
        let n = sample.len();
        let stats = DescriptiveStats::new(sample.iter().copied())
            .ok_or(AnalysisError::InsufficientSample { len: n })?;
        let std_dev = stats
            .std_dev
            .ok_or(AnalysisError::InsufficientSample { len: n })?;
        let mean = error::ensure_finite("mean", stats.mean)?;
        let std_dev = error::ensure_finite("standard deviation", std_dev)?;

        let degrees_of_freedom = n - 1;
        let t = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
            .map_err(|_| AnalysisError::InsufficientSample { len: n })?;
        let critical_value = t.inverse_cdf(f64::midpoint(1.0, level));
        let standard_error = std_dev / (n as f64).sqrt();
        let margin = critical_value * standard_error;
        let lower = error::ensure_finite("lower confidence bound", mean - margin)?;
        let upper = error::ensure_finite("upper confidence bound", mean + margin)?;

        Ok(Self {
            level,
            lower,
            upper,
            mean,
            standard_error,
            critical_value,
            degrees_of_freedom,
            margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: [f64; 20] = [
        110.0, 115.0, 120.0, 125.0, 130.0, 118.0, 122.0, 119.0, 121.0, 123.0, 117.0, 124.0, 116.0,
        126.0, 114.0, 127.0, 113.0, 128.0, 112.0, 129.0,
    ];

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        let ci = ConfidenceInterval::estimate(&SCENARIO, 0.95).unwrap();
        assert_eq!(ci.degrees_of_freedom, 19);
        assert_close(ci.mean, 120.45, 1e-12);
        assert_close(ci.critical_value, 2.093_024_054_408_309_7, 1e-6);
        assert_close(ci.standard_error, 6.004_165_220_911_23 / 20.0_f64.sqrt(), 1e-9);
        assert_close(ci.lower, 117.639_964_178_088_1, 1e-6);
        assert_close(ci.upper, 123.260_035_821_911_9, 1e-6);
    }

    #[test]
    fn test_interval_is_centered_on_mean() {
        for level in [0.5, 0.8, 0.9, 0.95, 0.99] {
            let ci = ConfidenceInterval::estimate(&SCENARIO, level).unwrap();
            assert_close(f64::midpoint(ci.lower, ci.upper), ci.mean, 1e-9);
            assert_close(ci.upper - ci.lower, 2.0 * ci.margin, 1e-9);
            assert!(ci.lower < ci.mean && ci.mean < ci.upper);
        }
    }

    #[test]
    fn test_higher_level_widens_interval() {
        let narrow = ConfidenceInterval::estimate(&SCENARIO, 0.9).unwrap();
        let wide = ConfidenceInterval::estimate(&SCENARIO, 0.99).unwrap();
        assert!(wide.margin > narrow.margin);
    }

    #[test]
    fn test_constant_sample_degenerates_to_point() {
        let ci = ConfidenceInterval::estimate(&[121.0; 6], 0.95).unwrap();
        assert_eq!(ci.lower, 121.0);
        assert_eq!(ci.upper, 121.0);
        assert_eq!(ci.margin, 0.0);
    }

    #[test]
    fn test_insufficient_sample() {
        assert_eq!(
            ConfidenceInterval::estimate(&[], 0.95),
            Err(AnalysisError::InsufficientSample { len: 0 })
        );
        assert_eq!(
            ConfidenceInterval::estimate(&[120.0], 0.95),
            Err(AnalysisError::InsufficientSample { len: 1 })
        );
    }

    #[test]
    fn test_critical_values() {
        // Two-sided 95% critical values for small samples, and a 90% one
        for (sample, level, expected) in [
            (&[1.0, 2.0][..], 0.95, 12.706_204_736_174_705),
            (&[1.0, 2.0, 4.0][..], 0.95, 4.302_652_729_749_464),
            (&[1.0, 2.0, 4.0, 8.0, 16.0][..], 0.95, 2.776_445_105_197_793),
            (&SCENARIO[..11], 0.9, 1.812_461_122_811_676_4),
        ] {
            let ci = ConfidenceInterval::estimate(sample, level).unwrap();
            assert_close(ci.critical_value, expected, 1e-8 * expected);
        }
    }

    #[test]
    fn test_huge_values_overflow_instead_of_producing_nan() {
        let err = ConfidenceInterval::estimate(&[1e308, 1.5e308, 1.7e308], 0.95).unwrap_err();
        assert!(matches!(err, AnalysisError::NumericOverflow { .. }));

        let err = ConfidenceInterval::estimate(&[-1.7e308, 1.7e308], 0.95).unwrap_err();
        assert!(matches!(err, AnalysisError::NumericOverflow { .. }));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                ConfidenceInterval::estimate(&[118.0, bad, 122.0], 0.95),
                Err(AnalysisError::NonFiniteValue)
            );
        }
    }

    #[test]
    fn test_invalid_level() {
        for level in [0.0, 1.0, 1.2, -0.3, f64::NAN] {
            assert!(matches!(
                ConfidenceInterval::estimate(&SCENARIO, level),
                Err(AnalysisError::InvalidConfidenceLevel { .. })
            ));
        }
    }
}
