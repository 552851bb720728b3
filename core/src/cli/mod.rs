pub mod report;

use crate::types::{ArrangeConfig, RuleSet, DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for ctsort
#[derive(Parser, Debug)]
#[command(name = "ctsort")]
#[command(about = "Arrange DICOM and MHD datasets into contrast/dose/filter/direction folders")]
#[command(version)]
pub struct Cli {
    /// Root directory holding one subdirectory per dataset
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_ROOT)]
    pub input: PathBuf,

    /// Root directory the arranged datasets are written to
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_OUTPUT_ROOT)]
    pub output: PathBuf,

    /// Classification rule set
    #[arg(short, long, default_value = "five-category")]
    pub rules: RuleSetArg,

    /// Only arrange the named dataset (repeatable)
    #[arg(short, long = "dataset", value_name = "NAME")]
    pub datasets: Vec<String>,

    /// Keep train/test/val folders above the category folders
    #[arg(long)]
    pub preserve_splits: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the arranging configuration from the arguments
    pub fn to_config(&self) -> ArrangeConfig {
        ArrangeConfig::new(&self.input, &self.output)
            .with_rule_set(self.rules.clone().into())
            .with_datasets(self.datasets.iter().cloned())
            .preserve_splits(self.preserve_splits)
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Rule set selection
#[derive(Debug, Clone, ValueEnum)]
pub enum RuleSetArg {
    /// contrast > dose > filter > direction > others
    FiveCategory,
    /// Requires "axial"; contrast > dose > filter > others
    LegacyAxialGated,
}

impl From<RuleSetArg> for RuleSet {
    fn from(arg: RuleSetArg) -> Self {
        match arg {
            RuleSetArg::FiveCategory => RuleSet::FiveCategory,
            RuleSetArg::LegacyAxialGated => RuleSet::LegacyAxialGated,
        }
    }
}
