//! Pipeline configuration
//!
//! [`AnalysisConfig`] carries the three recognized options of the pipeline.
//! Missing fields in a serialized configuration take their defaults:
//!
//! ```json
//! {
//!   "confidence_level": 0.95,
//!   "reference_value": 120.0,
//!   "group_by_field": "category"
//! }
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;

/// Default confidence level of the interval estimate.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default reference blood pressure of the null hypothesis.
pub const DEFAULT_REFERENCE_VALUE: f64 = 120.0;

/// Errors raised when a configuration value is out of range or unrecognized.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("confidence level {level} is outside the open interval (0, 1)")]
    InvalidConfidenceLevel { level: f64 },
    #[display("reference value {value} is not a finite number")]
    NonFiniteReferenceValue { value: f64 },
    #[display("unknown group field '{name}' (expected one of: category, name, date)")]
    UnknownGroupField { name: String },
}

/// Record field used to partition the dataset into groups.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum GroupField {
    /// Diagnosis category
    #[default]
    Category,
    /// Patient name
    Name,
    /// Admission date, keyed as `YYYY-MM-DD`
    Date,
}

impl GroupField {
    /// All supported group fields.
    pub const ALL: [Self; 3] = [Self::Category, Self::Name, Self::Date];

    /// Returns the field name as used in configuration files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GroupField::Category => "category",
            GroupField::Name => "name",
            GroupField::Date => "date",
        }
    }

    /// Returns the group key of a record.
    ///
    /// Dates are formatted as `YYYY-MM-DD`, so lexical key order is chronological.
    #[must_use]
    pub fn key(self, record: &PatientRecord) -> String {
        match self {
            GroupField::Category => record.category.clone(),
            GroupField::Name => record.name.clone(),
            GroupField::Date => record.date.to_string(),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl FromStr for GroupField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownGroupField { name: s.to_owned() })
    }
}

impl TryFrom<String> for GroupField {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Options controlling one pass of the statistics pipeline.
///
/// # Examples
///
/// ```
/// use medistat_analysis::config::{AnalysisConfig, GroupField};
///
/// let config: AnalysisConfig = serde_json::from_str(r#"{"reference_value": 130}"#).unwrap();
/// assert_eq!(config.confidence_level, 0.95);
/// assert_eq!(config.reference_value, 130.0);
/// assert_eq!(config.group_by_field, GroupField::Category);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level of the interval estimate, in `(0, 1)`
    pub confidence_level: f64,
    /// Population mean assumed by the null hypothesis
    pub reference_value: f64,
    /// Field used to group records for per-group summaries
    pub group_by_field: GroupField,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            reference_value: DEFAULT_REFERENCE_VALUE,
            group_by_field: GroupField::default(),
        }
    }
}

impl AnalysisConfig {
    /// Checks that every option is within its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::InvalidConfidenceLevel { level });
        }
        if !self.reference_value.is_finite() {
            return Err(ConfigError::NonFiniteReferenceValue {
                value: self.reference_value,
            });
        }
        Ok(())
    }
}
