//! Descriptive statistics over the whole sample and per group
//!
//! The Aggregator is the first stage of the pipeline. It produces:
//!
//! - [`SampleSummary`]: count, mean, sample standard deviation, extremes,
//!   median, mode and quartiles of a numeric column
//! - [`GroupSummary`]: per-group count, mean, standard deviation and extremes,
//!   one per distinct group key, ordered lexically by key
//!
//! # Undefined dispersion
//!
//! Standard deviation uses the N-1 denominator. For a single value it is
//! undefined and reported as `None` rather than `NaN` or `0`.
//!
//! # Examples
//!
//! ```
//! use medistat_analysis::aggregate::SampleSummary;
//!
//! let summary = SampleSummary::from_values(&[118.0, 122.0, 125.0, 122.0]).unwrap();
//! assert_eq!(summary.count, 4);
//! assert_eq!(summary.mean, 121.75);
//! assert_eq!(summary.median, 122.0);
//! assert_eq!(summary.mode, 122.0);
//! ```

use std::collections::BTreeMap;

use medistat_stats::{descriptive::DescriptiveStats, percentiles};
use serde::Serialize;

use crate::{
    error::{self, AnalysisError},
    record::{Dataset, PatientRecord},
};

/// Whole-sample descriptive statistics of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (N-1), `None` when `count < 2`
    pub std_dev: Option<f64>,
    /// Smallest value
    pub min: f64,
    /// First quartile (linear interpolation)
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile (linear interpolation)
    pub q3: f64,
    /// Largest value
    pub max: f64,
    /// Most frequent value, smallest on ties
    pub mode: f64,
}

impl SampleSummary {
    /// Summarizes a numeric sample.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NonFiniteValue`] if `values` holds NaN or an infinity
    /// - [`AnalysisError::EmptyDataset`] if `values` is empty
    /// - [`AnalysisError::NumericOverflow`] if the standard deviation is not finite
    pub fn from_values(values: &[f64]) -> Result<Self, AnalysisError> {
        error::ensure_finite_sample(values)?;
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted).ok_or(AnalysisError::EmptyDataset)?;
        if let Some(std_dev) = stats.std_dev {
            error::ensure_finite("standard deviation", std_dev)?;
        }

        Ok(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            q1: percentiles::compute_percentile(&sorted, 25.0),
            median: stats.median,
            q3: percentiles::compute_percentile(&sorted, 75.0),
            max: stats.max,
            mode: stats.mode,
        })
    }

    /// Summarizes the column picked by `selector` from every record of the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDataset`] if the dataset has no records.
    pub fn from_dataset<F>(dataset: &Dataset, selector: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&PatientRecord) -> f64,
    {
        Self::from_values(&dataset.values(selector))
    }
}

/// Descriptive statistics of one group of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Group key (e.g. diagnosis category)
    pub category: String,
    /// Number of records in the group
    pub count: usize,
    /// Mean of the group's values
    pub mean: f64,
    /// Sample standard deviation, `None` for a single-member group
    pub std_dev: Option<f64>,
    /// Smallest value in the group
    pub min: f64,
    /// Largest value in the group
    pub max: f64,
    /// The group's values in dataset order
    pub values: Vec<f64>,
}

impl GroupSummary {
    /// Summarizes a group's values, kept in the order given.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Panics
    ///
    /// Panics if any value is NaN.
    #[must_use]
    pub fn from_values(category: String, values: Vec<f64>) -> Option<Self> {
        let stats = DescriptiveStats::new(values.iter().copied())?;
        Some(Self {
            category,
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
            values,
        })
    }

    /// Groups records by a key and summarizes a numeric column per group.
    ///
    /// Groups are ordered by lexical order of their key, independently of the
    /// order records appear in the dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The records to group
    /// * `key` - Computes the group key of a record
    /// * `selector` - Picks the numeric value to summarize
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyDataset`] if the dataset has no records
    /// - [`AnalysisError::NonFiniteValue`] if `selector` yields NaN or an infinity
    /// - [`AnalysisError::NumericOverflow`] if a group's standard deviation is not finite
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use medistat_analysis::{aggregate::GroupSummary, record::{Dataset, PatientRecord}};
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    /// let record = |id, category: &str, measurement| PatientRecord {
    ///     id,
    ///     name: format!("Patient {id}"),
    ///     category: category.to_owned(),
    ///     measurement,
    ///     date,
    /// };
    /// let dataset = Dataset::new(vec![
    ///     record(1, "Hypertension", 140.0),
    ///     record(2, "Asthma", 110.0),
    ///     record(3, "Hypertension", 150.0),
    /// ])
    /// .unwrap();
    ///
    /// let groups = GroupSummary::collect_by_group(
    ///     &dataset,
    ///     |r| r.category.clone(),
    ///     |r| r.measurement,
    /// )
    /// .unwrap();
    /// assert_eq!(groups[0].category, "Asthma");
    /// assert_eq!(groups[0].std_dev, None);
    /// assert_eq!(groups[1].category, "Hypertension");
    /// assert_eq!(groups[1].mean, 145.0);
    /// ```
    pub fn collect_by_group<K, F>(
        dataset: &Dataset,
        key: K,
        selector: F,
    ) -> Result<Vec<Self>, AnalysisError>
    where
        K: Fn(&PatientRecord) -> String,
        F: Fn(&PatientRecord) -> f64,
    {
        if dataset.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }

        let mut groups = BTreeMap::<String, Vec<f64>>::new();
        for record in dataset.records() {
            let value = selector(record);
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteValue);
            }
            groups.entry(key(record)).or_default().push(value);
        }

        // Every group holds at least the record that created it
        groups
            .into_iter()
            .filter_map(|(category, values)| Self::from_values(category, values))
            .map(|group| {
                if let Some(std_dev) = group.std_dev {
                    error::ensure_finite("group standard deviation", std_dev)?;
                }
                Ok(group)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dataset(rows: &[(&str, f64)]) -> Dataset {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records = rows
            .iter()
            .zip(1..)
            .map(|(&(category, measurement), id)| PatientRecord {
                id,
                name: format!("Patient {id}"),
                category: category.to_owned(),
                measurement,
                date,
            })
            .collect();
        Dataset::new(records).unwrap()
    }

    #[test]
    fn test_empty_dataset_fails() {
        let empty = Dataset::default();
        assert_eq!(
            SampleSummary::from_dataset(&empty, |r| r.measurement),
            Err(AnalysisError::EmptyDataset)
        );
        assert_eq!(
            GroupSummary::collect_by_group(&empty, |r| r.category.clone(), |r| r.measurement),
            Err(AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn test_non_finite_and_overflowing_samples_fail() {
        assert_eq!(
            SampleSummary::from_values(&[120.0, f64::NAN]),
            Err(AnalysisError::NonFiniteValue)
        );
        assert_eq!(
            SampleSummary::from_values(&[1e308, 1.5e308, 1.7e308]),
            Err(AnalysisError::NumericOverflow {
                quantity: "standard deviation"
            })
        );

        let dataset = dataset(&[("A", 120.0), ("A", 130.0), ("B", 125.0)]);
        let scaled = |factor: f64| {
            GroupSummary::collect_by_group(&dataset, |r| r.category.clone(), |r| {
                r.measurement * factor
            })
        };
        assert_eq!(scaled(1e307), Err(AnalysisError::NonFiniteValue));
        assert_eq!(
            scaled(1e306),
            Err(AnalysisError::NumericOverflow {
                quantity: "group standard deviation"
            })
        );
    }

    #[test]
    fn test_sample_summary_matches_describe() {
        let summary =
            SampleSummary::from_values(&[120.0, 111.0, 134.0, 127.0, 119.0, 119.0, 141.0])
                .unwrap();
        assert_eq!(summary.count, 7);
        assert!((summary.mean - 124.428_571_428_571_43).abs() < 1e-9);
        assert!((summary.std_dev.unwrap() - 10.260_882_724_488_877).abs() < 1e-9);
        assert_eq!(summary.min, 111.0);
        assert_eq!(summary.q1, 119.0);
        assert_eq!(summary.median, 120.0);
        assert_eq!(summary.q3, 130.5);
        assert_eq!(summary.max, 141.0);
        assert_eq!(summary.mode, 119.0);
    }

    #[test]
    fn test_single_record_has_undefined_std_dev() {
        let data = dataset(&[("Cardiac", 128.0)]);
        let summary = SampleSummary::from_dataset(&data, |r| r.measurement).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.std_dev, None);

        let groups =
            GroupSummary::collect_by_group(&data, |r| r.category.clone(), |r| r.measurement)
                .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].std_dev, None);
        assert_eq!(groups[0].min, 128.0);
        assert_eq!(groups[0].max, 128.0);
    }

    #[test]
    fn test_groups_ordered_lexically_and_values_in_dataset_order() {
        let data = dataset(&[
            ("Hypertension", 140.0),
            ("Diabetes", 125.0),
            ("Asthma", 112.0),
            ("Diabetes", 115.0),
            ("Cardiac", 130.0),
        ]);
        let groups =
            GroupSummary::collect_by_group(&data, |r| r.category.clone(), |r| r.measurement)
                .unwrap();
        let names = groups.iter().map(|g| g.category.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Asthma", "Cardiac", "Diabetes", "Hypertension"]);

        let diabetes = &groups[2];
        assert_eq!(diabetes.count, 2);
        assert_eq!(diabetes.mean, 120.0);
        assert_eq!(diabetes.min, 115.0);
        assert_eq!(diabetes.max, 125.0);
        assert_eq!(diabetes.values, [125.0, 115.0]);
        assert!((diabetes.std_dev.unwrap() - 50.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_group_means_weight_to_overall_mean() {
        let data = dataset(&[
            ("A", 101.5),
            ("B", 99.0),
            ("A", 131.25),
            ("C", 87.0),
            ("B", 143.0),
            ("A", 120.0),
        ]);
        let overall = SampleSummary::from_dataset(&data, |r| r.measurement).unwrap();
        let groups =
            GroupSummary::collect_by_group(&data, |r| r.category.clone(), |r| r.measurement)
                .unwrap();
        let weighted = groups
            .iter()
            .map(|g| g.count as f64 * g.mean)
            .sum::<f64>();
        assert!((weighted - overall.count as f64 * overall.mean).abs() < 1e-9);
    }
}
