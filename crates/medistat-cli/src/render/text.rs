//! Plain-text report
//!
//! Prints the dataset and every report section as aligned tables, with text
//! bar charts standing in for the histogram and the group-means chart.

use std::io::{self, Write};

use medistat_analysis::{
    chart::{BoxPlotSeries, HistogramBinData, Markers},
    record::Dataset,
    render::ReportRenderer,
    report::Report,
};

const MAX_BAR_WIDTH: usize = 40;

/// Renders a report as human-readable text.
#[derive(Debug)]
pub(crate) struct TextRenderer<'a, W> {
    writer: W,
    dataset: &'a Dataset,
}

impl<'a, W> TextRenderer<'a, W> {
    pub(crate) fn new(writer: W, dataset: &'a Dataset) -> Self {
        Self { writer, dataset }
    }
}

impl<W> ReportRenderer for TextRenderer<'_, W>
where
    W: Write,
{
    type Error = io::Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error> {
        self.write_records()?;
        self.write_summary(report)?;
        self.write_groups(report)?;
        self.write_confidence_interval(report)?;
        self.write_hypothesis_test(report)?;
        self.write_histogram(report)?;
        self.write_box_plot(report)?;
        self.write_bar_chart(report)?;
        self.writer.flush()
    }
}

impl<W> TextRenderer<'_, W>
where
    W: Write,
{
    fn write_section_title(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.writer)
    }

    fn write_records(&mut self) -> io::Result<()> {
        self.write_section_title(&format!("Patient Records ({})", self.dataset.len()))?;
        writeln!(
            self.writer,
            "  {:>6}  {:<16} {:<16} {:>10}  {:<10}",
            "ID", "Name", "Category", "BP", "Admission"
        )?;
        writeln!(self.writer, "  {}", "-".repeat(64))?;
        for record in self.dataset.records() {
            writeln!(
                self.writer,
                "  {:>6}  {:<16} {:<16} {:>10.1}  {}",
                record.id, record.name, record.category, record.measurement, record.date
            )?;
        }
        writeln!(self.writer)
    }

    fn write_summary(&mut self, report: &Report) -> io::Result<()> {
        let summary = &report.summary;
        self.write_section_title("Blood Pressure Summary")?;
        writeln!(self.writer, "  {:<6} {:>10}", "count", summary.count)?;
        let rows = [
            ("mean", Some(summary.mean)),
            ("std", summary.std_dev),
            ("min", Some(summary.min)),
            ("25%", Some(summary.q1)),
            ("50%", Some(summary.median)),
            ("75%", Some(summary.q3)),
            ("max", Some(summary.max)),
            ("mode", Some(summary.mode)),
        ];
        for (label, value) in rows {
            writeln!(self.writer, "  {label:<6} {:>10}", format_optional(value))?;
        }
        writeln!(self.writer)
    }

    fn write_groups(&mut self, report: &Report) -> io::Result<()> {
        let field = report.config.group_by_field;
        self.write_section_title(&format!("Summary by {field}"))?;
        writeln!(
            self.writer,
            "  {:<16} {:>6} {:>9} {:>9} {:>9} {:>9}",
            "Group", "Count", "Mean", "Std", "Min", "Max"
        )?;
        writeln!(self.writer, "  {}", "-".repeat(63))?;
        for group in &report.groups {
            writeln!(
                self.writer,
                "  {:<16} {:>6} {:>9.2} {:>9} {:>9.2} {:>9.2}",
                group.category,
                group.count,
                group.mean,
                format_optional(group.std_dev),
                group.min,
                group.max
            )?;
        }
        writeln!(self.writer)
    }

    fn write_confidence_interval(&mut self, report: &Report) -> io::Result<()> {
        let ci = &report.confidence_interval;
        self.write_section_title("Confidence Interval")?;
        writeln!(
            self.writer,
            "  {} confidence interval for the mean: ({:.2}, {:.2})",
            format_percent(ci.level),
            ci.lower,
            ci.upper
        )?;
        writeln!(
            self.writer,
            "  mean {:.2}, standard error {:.4}, t* {:.4} (df {}), margin {:.4}",
            ci.mean, ci.standard_error, ci.critical_value, ci.degrees_of_freedom, ci.margin
        )?;
        writeln!(self.writer)
    }

    fn write_hypothesis_test(&mut self, report: &Report) -> io::Result<()> {
        let test = &report.hypothesis_test;
        self.write_section_title(&format!(
            "One-Sample t-Test (H0: mean = {})",
            test.reference_value
        ))?;
        writeln!(self.writer, "  t statistic : {:.4}", test.statistic)?;
        writeln!(self.writer, "  df          : {}", test.degrees_of_freedom)?;
        writeln!(self.writer, "  p-value     : {:.4}", test.p_value)?;
        writeln!(self.writer, "  alpha       : {}", test.significance_level)?;
        writeln!(self.writer, "  {}", test.conclusion())?;
        writeln!(self.writer)
    }

    fn write_histogram(&mut self, report: &Report) -> io::Result<()> {
        let histogram = &report.charts.histogram;
        self.write_section_title("Blood Pressure Distribution")?;
        let max_count = histogram.bins.iter().map(|bin| bin.count).max().unwrap_or(0);
        let last = histogram.bins.len().saturating_sub(1);
        for (i, bin) in histogram.bins.iter().enumerate() {
            let label = if i == last {
                format!("[{:.1}, {:.1}]", bin.start, bin.end)
            } else {
                format!("[{:.1}, {:.1})", bin.start, bin.end)
            };
            let markers = markers_in_bin(&histogram.markers, bin, i == last);
            let bar = "#".repeat(bar_width(bin.count, max_count));
            if markers.is_empty() {
                writeln!(self.writer, "  {label:>16} | {:>4} {bar}", bin.count)?;
            } else {
                writeln!(
                    self.writer,
                    "  {label:>16} | {:>4} {bar} <- {}",
                    bin.count,
                    markers.join(", ")
                )?;
            }
        }
        let Markers { mean, median, mode } = histogram.markers;
        writeln!(
            self.writer,
            "  markers: mean {mean:.2}, median {median:.2}, mode {mode:.2}"
        )?;
        writeln!(self.writer)
    }

    fn write_box_plot(&mut self, report: &Report) -> io::Result<()> {
        let field = report.config.group_by_field;
        self.write_section_title(&format!("Box Plot by {field}"))?;
        writeln!(
            self.writer,
            "  {:<16} {:>9} {:>9} {:>9} {:>9} {:>9}  Outliers",
            "Group", "Lower", "Q1", "Median", "Q3", "Upper"
        )?;
        writeln!(self.writer, "  {}", "-".repeat(76))?;
        for series in &report.charts.box_plot {
            let BoxPlotSeries {
                category,
                q1,
                median,
                q3,
                lower_whisker,
                upper_whisker,
                outliers,
            } = series;
            let outliers = if outliers.is_empty() {
                "-".to_owned()
            } else {
                outliers
                    .iter()
                    .map(|value| format!("{value:.1}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(
                self.writer,
                "  {category:<16} {lower_whisker:>9.2} {q1:>9.2} {median:>9.2} {q3:>9.2} {upper_whisker:>9.2}  {outliers}",
            )?;
        }
        writeln!(self.writer)
    }

    fn write_bar_chart(&mut self, report: &Report) -> io::Result<()> {
        let field = report.config.group_by_field;
        self.write_section_title(&format!("Mean Blood Pressure by {field}"))?;
        let max_mean = report
            .charts
            .bar_chart
            .iter()
            .map(|entry| entry.mean)
            .fold(0.0, f64::max);
        for entry in &report.charts.bar_chart {
            let bar = "#".repeat(scaled_width(entry.mean, max_mean));
            writeln!(
                self.writer,
                "  {:<16} | {:>8.2} {bar}",
                entry.category, entry.mean
            )?;
        }
        Ok(())
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.2}"))
}

fn format_percent(level: f64) -> String {
    let percent = level * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{percent:.0}%")
    } else {
        format!("{percent:.1}%")
    }
}

fn markers_in_bin(markers: &Markers, bin: &HistogramBinData, is_last: bool) -> Vec<&'static str> {
    let contains = |x: f64| bin.start <= x && (x < bin.end || (is_last && x <= bin.end));
    [
        ("mean", markers.mean),
        ("median", markers.median),
        ("mode", markers.mode),
    ]
    .into_iter()
    .filter(|&(_, x)| contains(x))
    .map(|(name, _)| name)
    .collect()
}

#[expect(clippy::cast_possible_truncation)]
fn bar_width(count: u64, max_count: u64) -> usize {
    if max_count == 0 {
        return 0;
    }
    (count * MAX_BAR_WIDTH as u64 / max_count) as usize
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled_width(value: f64, max_value: f64) -> usize {
    if max_value <= 0.0 || value <= 0.0 {
        return 0;
    }
    (value / max_value * MAX_BAR_WIDTH as f64).round() as usize
}
