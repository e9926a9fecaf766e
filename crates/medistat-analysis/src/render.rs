use crate::report::Report;

/// A sink that presents a finished [`Report`].
///
/// Renderers decide how a report is displayed (tables, charts, JSON, ...);
/// the pipeline only guarantees that every value they need is present in the
/// report. A renderer is never invoked with a partial report.
pub trait ReportRenderer {
    type Error;

    /// Presents `report`.
    fn render(&mut self, report: &Report) -> Result<(), Self::Error>;
}

impl<R> ReportRenderer for &mut R
where
    R: ReportRenderer + ?Sized,
{
    type Error = R::Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error> {
        (**self).render(report)
    }
}
