//! Statistical kernels for the Medistat project.
//!
//! This crate provides dependency-free numeric building blocks for sample
//! summaries and chart data:
//!
//! - **Descriptive statistics**: count, mean, median, mode, sample variance and standard deviation
//! - **Percentiles**: linearly interpolated percentiles (quartiles for `describe`-style summaries)
//! - **Box plots**: quartiles with Tukey whiskers and outliers
//! - **Histogram generation**: equal-width frequency distributions
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Interpolated percentiles of sorted data
//! - [`boxplot`]: Five-number summaries with Tukey whiskers
//! - [`histogram`]: Histogram construction for visualizing data distributions
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use medistat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, Some(2.5));
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use medistat_stats::percentiles::compute_percentile;
//!
//! let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&sorted, 25.0), 2.0);
//! assert_eq!(compute_percentile(&sorted, 50.0), 3.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use medistat_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(values, 5);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod boxplot;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
