//! Patient records and the validated in-memory dataset
//!
//! A [`Dataset`] is the single input of the statistics pipeline. It is an
//! ordered sequence of [`PatientRecord`]s whose invariants are checked once,
//! at construction, so the pipeline never has to re-validate them:
//!
//! - every measurement is a finite real number
//! - every patient id is unique within the dataset
//!
//! # Serialization
//!
//! Records use the column names of the hospital patient table:
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "patient_id": 1,
//!       "patient_name": "Patient 1",
//!       "disease_type": "Cardiac",
//!       "blood_pressure": 127.0,
//!       "admission_date": "2023-01-01"
//!     }
//!   ]
//! }
//! ```
//!
//! Deserialization runs the same validation as [`Dataset::new`].

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single patient's blood pressure reading.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PatientRecord {
    /// Unique patient identifier
    #[serde(rename = "patient_id")]
    pub id: u64,
    /// Display name of the patient
    #[serde(rename = "patient_name")]
    pub name: String,
    /// Diagnosis category label (e.g. "Diabetes")
    #[serde(rename = "disease_type")]
    pub category: String,
    /// Blood pressure reading
    #[serde(rename = "blood_pressure")]
    pub measurement: f64,
    /// Admission date
    #[serde(rename = "admission_date")]
    pub date: NaiveDate,
}

/// Errors raised when a dataset violates its invariants.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("duplicate patient id {id}")]
    DuplicateId { id: u64 },
    #[display("patient {id} has a non-finite measurement")]
    NonFiniteMeasurement { id: u64 },
}

/// An ordered, validated collection of patient records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    records: Vec<PatientRecord>,
}

#[derive(Deserialize)]
struct RawDataset {
    records: Vec<PatientRecord>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Self::new(raw.records)
    }
}

impl Dataset {
    /// Creates a dataset after checking id uniqueness and measurement finiteness.
    ///
    /// An empty dataset is valid; the pipeline reports it as
    /// [`AnalysisError::EmptyDataset`](crate::error::AnalysisError::EmptyDataset)
    /// when statistics are requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use medistat_analysis::record::{Dataset, DatasetError, PatientRecord};
    ///
    /// let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    /// let record = |id| PatientRecord {
    ///     id,
    ///     name: format!("Patient {id}"),
    ///     category: "Asthma".to_owned(),
    ///     measurement: 118.0,
    ///     date,
    /// };
    ///
    /// assert!(Dataset::new(vec![record(1), record(2)]).is_ok());
    /// assert_eq!(
    ///     Dataset::new(vec![record(1), record(1)]),
    ///     Err(DatasetError::DuplicateId { id: 1 })
    /// );
    /// ```
    pub fn new(records: Vec<PatientRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !record.measurement.is_finite() {
                return Err(DatasetError::NonFiniteMeasurement { id: record.id });
            }
            if !seen.insert(record.id) {
                return Err(DatasetError::DuplicateId { id: record.id });
            }
        }
        Ok(Self { records })
    }

    /// Returns the records in dataset order.
    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extracts a numeric column, in dataset order.
    pub fn values<F>(&self, selector: F) -> Vec<f64>
    where
        F: Fn(&PatientRecord) -> f64,
    {
        self.records.iter().map(selector).collect()
    }

    /// Extracts the blood pressure readings, in dataset order.
    #[must_use]
    pub fn measurements(&self) -> Vec<f64> {
        self.values(|record| record.measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, measurement: f64) -> PatientRecord {
        PatientRecord {
            id,
            name: format!("Patient {id}"),
            category: "Cardiac".to_owned(),
            measurement,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_rejects_non_finite_measurement() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Dataset::new(vec![record(1, 120.0), record(2, bad)]);
            assert_eq!(result, Err(DatasetError::NonFiniteMeasurement { id: 2 }));
        }
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let result = Dataset::new(vec![record(7, 120.0), record(8, 121.0), record(7, 122.0)]);
        assert_eq!(result, Err(DatasetError::DuplicateId { id: 7 }));
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let dataset = Dataset::new(vec![]).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_measurements_keep_dataset_order() {
        let dataset = Dataset::new(vec![record(3, 130.0), record(1, 110.0)]).unwrap();
        assert_eq!(dataset.measurements(), [130.0, 110.0]);
        assert_eq!(dataset.values(|r| r.measurement / 10.0), [13.0, 11.0]);
    }

    #[test]
    fn test_json_uses_table_column_names() {
        let dataset = Dataset::new(vec![record(1, 127.0)]).unwrap();
        let json = serde_json::to_value(&dataset).unwrap();
        let row = &json["records"][0];
        assert_eq!(row["patient_id"], 1);
        assert_eq!(row["patient_name"], "Patient 1");
        assert_eq!(row["disease_type"], "Cardiac");
        assert_eq!(row["blood_pressure"], 127.0);
        assert_eq!(row["admission_date"], "2023-01-01");

        let parsed: Dataset = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, dataset);
    }

    #[test]
    fn test_json_deserialization_validates() {
        let json = r#"{"records": [
            {"patient_id": 1, "patient_name": "A", "disease_type": "Asthma",
             "blood_pressure": 120, "admission_date": "2023-01-01"},
            {"patient_id": 1, "patient_name": "B", "disease_type": "Asthma",
             "blood_pressure": 121, "admission_date": "2023-01-02"}
        ]}"#;
        let err = serde_json::from_str::<Dataset>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate patient id 1"));
    }
}
