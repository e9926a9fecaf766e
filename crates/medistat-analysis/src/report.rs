//! Report assembly
//!
//! [`assemble`] is the single entry point of the statistics pipeline. It runs
//! every stage in order and either returns a complete [`Report`] or the error
//! of the first stage that failed:
//!
//! 1. whole-sample summary ([`SampleSummary`])
//! 2. per-group summaries ([`GroupSummary`])
//! 3. confidence interval ([`ConfidenceInterval`])
//! 4. hypothesis test ([`HypothesisTestResult`])
//!
//! The function is pure: it keeps no state between calls, so independent
//! datasets can be analyzed concurrently without synchronization.

use serde::Serialize;

use crate::{
    aggregate::{GroupSummary, SampleSummary},
    chart::ChartData,
    config::AnalysisConfig,
    error::AnalysisError,
    hypothesis::HypothesisTestResult,
    interval::ConfidenceInterval,
    record::{Dataset, PatientRecord},
    render::ReportRenderer,
};

/// Complete result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Configuration the report was computed with
    pub config: AnalysisConfig,
    /// Whole-sample descriptive statistics of the measurements
    pub summary: SampleSummary,
    /// Per-group statistics, ordered lexically by group key
    pub groups: Vec<GroupSummary>,
    /// Confidence interval for the mean measurement
    pub confidence_interval: ConfidenceInterval,
    /// One-sample t-test against the configured reference value
    pub hypothesis_test: HypothesisTestResult,
    /// Data for histogram, box plot and bar chart
    pub charts: ChartData,
}

/// Error from [`publish`]: either the pipeline or the renderer failed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PublishError<E> {
    /// A pipeline stage failed; nothing was rendered.
    #[display("failed to compute the report")]
    Analysis(#[error(source)] AnalysisError),
    /// The report was computed but the renderer could not present it.
    #[display("failed to render the report")]
    Render(#[error(source)] E),
}

/// Runs the statistics pipeline over the blood pressure readings of `dataset`.
///
/// # Errors
///
/// Returns the error of the first failing stage, unchanged:
///
/// - [`AnalysisError::EmptyDataset`] if the dataset has no records
/// - [`AnalysisError::InvalidConfidenceLevel`] if the configured level is not in `(0, 1)`
/// - [`AnalysisError::InsufficientSample`] if the dataset has a single record
/// - [`AnalysisError::DegenerateSample`] if every measurement is identical
/// - [`AnalysisError::NumericOverflow`] if the measurements are too large for
///   the mean or the standard deviation to be finite
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use medistat_analysis::{
///     config::AnalysisConfig,
///     record::{Dataset, PatientRecord},
///     report,
/// };
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let records = [("Asthma", 112.0), ("Cardiac", 131.0), ("Asthma", 118.0)]
///     .into_iter()
///     .zip(1..)
///     .map(|((category, measurement), id)| PatientRecord {
///         id,
///         name: format!("Patient {id}"),
///         category: category.to_owned(),
///         measurement,
///         date,
///     })
///     .collect();
/// let dataset = Dataset::new(records).unwrap();
///
/// let report = report::assemble(&dataset, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.summary.count, 3);
/// assert_eq!(report.groups.len(), 2);
/// assert_eq!(report.hypothesis_test.reference_value, 120.0);
/// ```
pub fn assemble(dataset: &Dataset, config: &AnalysisConfig) -> Result<Report, AnalysisError> {
    let measurement = |record: &PatientRecord| record.measurement;
    let group_field = config.group_by_field;

    let summary = SampleSummary::from_dataset(dataset, measurement)?;
    let groups =
        GroupSummary::collect_by_group(dataset, |record| group_field.key(record), measurement)?;

    let values = dataset.measurements();
    let confidence_interval = ConfidenceInterval::estimate(&values, config.confidence_level)?;
    let hypothesis_test =
        HypothesisTestResult::one_sample_t_test(&values, config.reference_value)?;
    let charts = ChartData::new(&values, &summary, &groups);

    Ok(Report {
        config: *config,
        summary,
        groups,
        confidence_interval,
        hypothesis_test,
        charts,
    })
}

/// Assembles a report and hands it to `renderer`.
///
/// The renderer is only invoked when every stage succeeded.
///
/// # Errors
///
/// Returns [`PublishError::Analysis`] if the pipeline fails (the renderer is
/// not called), or [`PublishError::Render`] if the renderer fails.
pub fn publish<R>(
    dataset: &Dataset,
    config: &AnalysisConfig,
    mut renderer: R,
) -> Result<Report, PublishError<R::Error>>
where
    R: ReportRenderer,
{
    let report = assemble(dataset, config).map_err(PublishError::Analysis)?;
    renderer.render(&report).map_err(PublishError::Render)?;
    Ok(report)
}
