use std::path::PathBuf;

use anyhow::Context as _;
use medistat_analysis::synthetic::{self, SyntheticDatasetConfig};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of patient records to generate
    #[arg(long, default_value_t = 20)]
    num_patients: u64,
    /// Random seed; the same seed reproduces the same dataset
    #[arg(long, default_value_t = super::DEFAULT_SEED)]
    seed: u64,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        num_patients,
        seed,
        output,
    } = arg;

    let config = SyntheticDatasetConfig {
        num_patients: *num_patients,
        ..SyntheticDatasetConfig::default()
    };
    let mut rng = Pcg32::seed_from_u64(*seed);
    let dataset =
        synthetic::generate(&config, &mut rng).context("Failed to generate synthetic dataset")?;
    tracing::info!(records = dataset.len(), seed, "generated synthetic dataset");

    Output::save_json(&dataset, output.clone())?;
    Ok(())
}
