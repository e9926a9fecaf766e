/// Errors raised by the statistics pipeline.
///
/// Every computation is deterministic, so none of these are retryable; they
/// propagate unchanged from the component that detected them to the caller of
/// [`assemble`](crate::report::assemble).
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    /// The dataset has no records, so no statistic is defined.
    #[display("dataset is empty")]
    EmptyDataset,
    /// The sample is too small for a variance-based computation (needs `n >= 2`).
    #[display("sample of size {len} is too small; at least 2 values are required")]
    InsufficientSample { len: usize },
    /// The sample standard deviation is exactly zero, so the t statistic is undefined.
    #[display("sample standard deviation is zero; the t statistic is undefined")]
    DegenerateSample,
    /// The confidence level is not strictly between 0 and 1.
    #[display("confidence level {level} is outside the open interval (0, 1)")]
    InvalidConfidenceLevel { level: f64 },
    /// The sample holds a NaN or infinite value.
    #[display("sample contains a non-finite value")]
    NonFiniteValue,
    /// A derived quantity left the range of `f64` even though every input was finite.
    #[display("{quantity} is not representable as a finite number")]
    NumericOverflow { quantity: &'static str },
}

/// Rejects samples holding NaN or infinite values.
pub(crate) fn ensure_finite_sample(sample: &[f64]) -> Result<(), AnalysisError> {
    if sample.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AnalysisError::NonFiniteValue)
    }
}

/// Passes `value` through if finite, otherwise reports `quantity` as overflowed.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NumericOverflow { quantity })
    }
}
