use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use medistat_analysis::{
    config::{AnalysisConfig, GroupField},
    record::Dataset,
    report,
    synthetic::{self, SyntheticDatasetConfig},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{
    render::{OutputFormat, json::JsonRenderer, text::TextRenderer},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Path to a dataset JSON file; a seeded synthetic dataset is used when omitted
    dataset: Option<PathBuf>,

    /// Random seed for the synthetic dataset
    #[arg(long, default_value_t = super::DEFAULT_SEED)]
    seed: u64,

    /// Path to an analysis config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Confidence level of the interval estimate, in (0, 1)
    #[arg(long)]
    confidence_level: Option<f64>,

    /// Population mean assumed by the null hypothesis
    #[arg(long)]
    reference_value: Option<f64>,

    /// Record field used to group per-group summaries (category, name, date)
    #[arg(long)]
    group_by: Option<GroupField>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl AnalyzeArg {
    /// Merges command line options over the config file over the defaults.
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(level) = self.confidence_level {
            config.confidence_level = level;
        }
        if let Some(value) = self.reference_value {
            config.reference_value = value;
        }
        if let Some(field) = self.group_by {
            config.group_by_field = field;
        }
        config
            .validate()
            .context("Invalid analysis configuration")?;
        Ok(config)
    }

    fn load_dataset(&self) -> anyhow::Result<Dataset> {
        match &self.dataset {
            Some(path) => {
                let dataset = util::read_dataset_file(path)?;
                tracing::info!(path = %path.display(), records = dataset.len(), "loaded dataset");
                Ok(dataset)
            }
            None => {
                let mut rng = Pcg32::seed_from_u64(self.seed);
                let dataset = synthetic::generate(&SyntheticDatasetConfig::default(), &mut rng)
                    .context("Failed to generate synthetic dataset")?;
                tracing::info!(
                    seed = self.seed,
                    records = dataset.len(),
                    "generated synthetic dataset"
                );
                Ok(dataset)
            }
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = arg.analysis_config()?;
    tracing::debug!(?config, "resolved analysis config");
    let dataset = arg.load_dataset()?;

    // Render into memory first so a failed run leaves no partial report behind
    let mut buffer = Vec::new();
    let result = match arg.format {
        OutputFormat::Text => {
            report::publish(&dataset, &config, TextRenderer::new(&mut buffer, &dataset))
        }
        OutputFormat::Json => report::publish(&dataset, &config, JsonRenderer::new(&mut buffer)),
    };
    let report = result.context("Failed to analyze dataset")?;
    tracing::info!(
        mean = report.summary.mean,
        p_value = report.hypothesis_test.p_value,
        reject_null = report.hypothesis_test.reject_null,
        "analysis complete"
    );

    let mut output = Output::from_output_path(arg.output.clone())?;
    output
        .write_all(&buffer)
        .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    output
        .flush()
        .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
    Ok(())
}
