//! Chart-ready data handed to renderers
//!
//! The pipeline does not draw anything. It supplies exactly the numbers a
//! renderer needs for the three standard views of the dataset:
//!
//! | Chart | Shape |
//! |-------|-------|
//! | Histogram of the whole sample | [`HistogramData`]: equal-width bins, mean/median/mode markers, raw values |
//! | Box plot per group | [`BoxPlotSeries`]: quartiles, Tukey whiskers, outliers |
//! | Bar chart of group means | [`BarEntry`]: group label and mean |
//!
//! Group series appear in the same (lexical) order as the group summaries.

use medistat_stats::{boxplot::BoxPlotStats, histogram::Histogram};
use serde::Serialize;

use crate::aggregate::{GroupSummary, SampleSummary};

/// Number of histogram bins over the whole sample.
pub const HISTOGRAM_BINS: usize = 10;

/// Data for every chart of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Distribution of the whole sample
    pub histogram: HistogramData,
    /// Per-group box plots
    pub box_plot: Vec<BoxPlotSeries>,
    /// Per-group means
    pub bar_chart: Vec<BarEntry>,
}

/// Histogram of the whole sample with central-tendency markers.
///
/// The histogram is meant to be drawn with a kernel density curve overlaid.
/// No curve is precomputed: renderers estimate it from [`values`](Self::values)
/// with whatever kernel and bandwidth their plotting backend uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramData {
    /// Equal-width bins over `[min, max]`
    pub bins: Vec<HistogramBinData>,
    /// Vertical markers to overlay
    pub markers: Markers,
    /// Raw sample values in dataset order, the input for a density estimate
    pub values: Vec<f64>,
}

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBinData {
    /// Inclusive lower edge
    pub start: f64,
    /// Exclusive upper edge (inclusive for the last bin)
    pub end: f64,
    /// Number of values in the bin
    pub count: u64,
}

/// Mean, median and mode marker positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Markers {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

/// Box plot of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSeries {
    pub category: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Bar of the group-means chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub category: String,
    pub mean: f64,
}

impl ChartData {
    /// Builds chart data from the sample values and the aggregator's output.
    #[must_use]
    pub fn new(values: &[f64], summary: &SampleSummary, groups: &[GroupSummary]) -> Self {
        Self {
            histogram: HistogramData::new(values, summary),
            box_plot: groups.iter().filter_map(BoxPlotSeries::new).collect(),
            bar_chart: groups
                .iter()
                .map(|group| BarEntry {
                    category: group.category.clone(),
                    mean: group.mean,
                })
                .collect(),
        }
    }
}

impl HistogramData {
    fn new(values: &[f64], summary: &SampleSummary) -> Self {
        let histogram = Histogram::new(values.iter().copied(), HISTOGRAM_BINS);
        Self {
            bins: histogram
                .bins
                .into_iter()
                .map(|bin| HistogramBinData {
                    start: bin.range.start,
                    end: bin.range.end,
                    count: bin.count,
                })
                .collect(),
            markers: Markers {
                mean: summary.mean,
                median: summary.median,
                mode: summary.mode,
            },
            values: values.to_vec(),
        }
    }
}

impl BoxPlotSeries {
    fn new(group: &GroupSummary) -> Option<Self> {
        let stats = BoxPlotStats::new(group.values.iter().copied())?;
        Some(Self {
            category: group.category.clone(),
            q1: stats.q1,
            median: stats.median,
            q3: stats.q3,
            lower_whisker: stats.lower_whisker,
            upper_whisker: stats.upper_whisker,
            outliers: stats.outliers,
        })
    }
}
