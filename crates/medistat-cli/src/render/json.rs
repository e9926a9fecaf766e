use std::io::{self, Write};

use medistat_analysis::{render::ReportRenderer, report::Report};

/// Writes the report as pretty-printed JSON.
#[derive(Debug)]
pub(crate) struct JsonRenderer<W> {
    writer: W,
}

impl<W> JsonRenderer<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> ReportRenderer for JsonRenderer<W>
where
    W: Write,
{
    type Error = io::Error;

    fn render(&mut self, report: &Report) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use medistat_analysis::{
        config::AnalysisConfig,
        record::{Dataset, PatientRecord},
        report,
    };

    use super::*;

    #[test]
    fn test_report_json_shape() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records = [("Asthma", 112.0), ("Cardiac", 131.0), ("Asthma", 118.0)]
            .into_iter()
            .zip(1..)
            .map(|((category, measurement), id)| PatientRecord {
                id,
                name: format!("Patient {id}"),
                category: category.to_owned(),
                measurement,
                date,
            })
            .collect();
        let dataset = Dataset::new(records).unwrap();

        let mut buffer = Vec::new();
        report::publish(&dataset, &AnalysisConfig::default(), JsonRenderer::new(&mut buffer))
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["summary"]["count"], 3);
        assert_eq!(json["config"]["group_by_field"], "category");
        assert_eq!(json["groups"][0]["category"], "Asthma");
        assert_eq!(json["groups"][1]["std_dev"], serde_json::Value::Null);
        assert_eq!(json["hypothesis_test"]["reference_value"], 120.0);
        assert_eq!(json["charts"]["histogram"]["bins"].as_array().unwrap().len(), 10);
    }
}
