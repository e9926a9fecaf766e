//! Report renderers used by the `analyze` command

pub(crate) mod json;
pub(crate) mod text;

/// Report format selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables and text charts
    Text,
    /// The full report as pretty-printed JSON
    Json,
}
