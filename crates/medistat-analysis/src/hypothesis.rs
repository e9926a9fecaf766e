//! One-sample two-sided t-test
//!
//! Tests the null hypothesis that the population mean equals a reference value
//! `μ₀`:
//!
//! ```text
//! t  = (x̄ - μ₀) / (s / √n),   df = n - 1
//! p  = 2 · (1 - CDF_t(df)(|t|))
//! reject H₀  ⇔  p < 0.05
//! ```

use std::fmt;

use medistat_stats::descriptive::DescriptiveStats;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::error::{self, AnalysisError};

/// Fixed significance threshold of the test.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Outcome of a one-sample t-test.
///
/// The numeric fields and the decision are always exposed; the sentence
/// returned by [`conclusion`](Self::conclusion) is derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    /// The t statistic
    pub statistic: f64,
    /// Two-sided p-value, in `[0, 1]`
    pub p_value: f64,
    /// Reference value `μ₀` of the null hypothesis
    pub reference_value: f64,
    /// Degrees of freedom (`n - 1`)
    pub degrees_of_freedom: usize,
    /// Significance threshold the p-value was compared against
    pub significance_level: f64,
    /// Whether the null hypothesis is rejected (`p_value < significance_level`)
    pub reject_null: bool,
}

impl HypothesisTestResult {
    /// Runs a one-sample two-sided t-test of `sample` against `reference_value`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NonFiniteValue`] if the sample holds NaN or an infinity
    /// - [`AnalysisError::InsufficientSample`] if the sample has fewer than 2 values
    /// - [`AnalysisError::DegenerateSample`] if the sample standard deviation is exactly 0
    /// - [`AnalysisError::NumericOverflow`] if the mean, the standard deviation or
    ///   the statistic is not a finite number
    ///
    /// # Examples
    ///
    /// ```
    /// use medistat_analysis::hypothesis::HypothesisTestResult;
    ///
    /// let result = HypothesisTestResult::one_sample_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.0).unwrap();
    /// assert!((result.statistic - 2.828_427_124_746_19).abs() < 1e-9);
    /// assert!((result.p_value - 0.047_420_655_584_319_6).abs() < 1e-9);
    /// assert!(result.reject_null);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn one_sample_t_test(sample: &[f64], reference_value: f64) -> Result<Self, AnalysisError> {
        error::ensure_finite_sample(sample)?;
        let n = sample.len();
        let stats = DescriptiveStats::new(sample.iter().copied())
            .ok_or(AnalysisError::InsufficientSample { len: n })?;
        let std_dev = stats
            .std_dev
            .ok_or(AnalysisError::InsufficientSample { len: n })?;
        if std_dev == 0.0 {
            return Err(AnalysisError::DegenerateSample);
        }
        let mean = error::ensure_finite("mean", stats.mean)?;
        let std_dev = error::ensure_finite("standard deviation", std_dev)?;

        let degrees_of_freedom = n - 1;
        let t = StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
            .map_err(|_| AnalysisError::InsufficientSample { len: n })?;
        let standard_error = std_dev / (n as f64).sqrt();
        let statistic =
            error::ensure_finite("t statistic", (mean - reference_value) / standard_error)?;
        let p_value = (2.0 * t.sf(statistic.abs())).clamp(0.0, 1.0);

        Ok(Self {
            statistic,
            p_value,
            reference_value,
            degrees_of_freedom,
            significance_level: SIGNIFICANCE_LEVEL,
            reject_null: p_value < SIGNIFICANCE_LEVEL,
        })
    }

    /// Returns a sentence stating the decision of the test.
    #[must_use]
    pub fn conclusion(&self) -> Conclusion<'_> {
        Conclusion(self)
    }
}

/// Human-readable decision of a [`HypothesisTestResult`].
#[derive(Debug, Clone, Copy)]
pub struct Conclusion<'a>(&'a HypothesisTestResult);

impl fmt::Display for Conclusion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Conclusion(result) = self;
        if result.reject_null {
            write!(
                f,
                "Reject the null hypothesis: the mean is significantly different from {}.",
                result.reference_value
            )
        } else {
            write!(
                f,
                "Fail to reject the null hypothesis: the mean is not significantly different from {}.",
                result.reference_value
            )
        }
    }
}
