//! Blood pressure statistics pipeline for patient datasets
//!
//! This crate turns a validated [`Dataset`](record::Dataset) of patient
//! records into a [`Report`](report::Report) of descriptive and inferential
//! statistics, ready to be handed to a renderer.
//!
//! # Overview
//!
//! The pipeline runs four stages in order, each consuming the previous
//! stage's input sample:
//!
//! 1. **Aggregate** ([`aggregate::SampleSummary`], [`aggregate::GroupSummary`]):
//!    whole-sample and per-group descriptive statistics
//! 2. **Estimate** ([`interval::ConfidenceInterval`]): t-based confidence
//!    interval for the mean
//! 3. **Test** ([`hypothesis::HypothesisTestResult`]): one-sample two-sided
//!    t-test against a reference value
//! 4. **Report** ([`report::assemble`]): combines the stage outputs and the
//!    chart data ([`chart::ChartData`]) into a single value
//!
//! The first failing stage aborts the run with an
//! [`AnalysisError`](error::AnalysisError); a renderer
//! ([`render::ReportRenderer`]) only ever sees complete reports.
//!
//! Datasets come from JSON ([`record`]) or from the seeded generator in
//! [`synthetic`]. Run options live in [`config::AnalysisConfig`].
//!
//! # Examples
//!
//! ```
//! use medistat_analysis::{
//!     config::AnalysisConfig,
//!     report,
//!     synthetic::{self, SyntheticDatasetConfig},
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let mut rng = Pcg32::seed_from_u64(42);
//! let dataset = synthetic::generate(&SyntheticDatasetConfig::default(), &mut rng)?;
//!
//! let report = report::assemble(&dataset, &AnalysisConfig::default())?;
//! let ci = &report.confidence_interval;
//! assert!(ci.lower <= report.summary.mean && report.summary.mean <= ci.upper);
//! println!("{}", report.hypothesis_test.conclusion());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod hypothesis;
pub mod interval;
pub mod record;
pub mod render;
pub mod report;
pub mod synthetic;
