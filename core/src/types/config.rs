use crate::types::RuleSet;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default input root, relative to the working directory
pub const DEFAULT_INPUT_ROOT: &str = "Datasets";

/// Default output root, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "Arranged_datasets";

/// Directory names treated as train/test splits inside a dataset
pub const SPLIT_FOLDER_NAMES: &[&str] = &["train", "test", "val", "validation"];

/// Configuration for arranging datasets
///
/// Passed explicitly to every arranging call; nothing is read from
/// process-wide state.
///
/// # Example
///
/// ```
/// use ctsort_core::{ArrangeConfig, RuleSet};
///
/// let config = ArrangeConfig::new("Datasets", "Arranged_datasets")
///     .with_rule_set(RuleSet::LegacyAxialGated)
///     .with_datasets(["lidc"])
///     .preserve_splits(true);
///
/// assert_eq!(config.rule_set, RuleSet::LegacyAxialGated);
/// assert!(config.preserve_splits);
/// assert!(config.includes_dataset("lidc"));
/// assert!(!config.includes_dataset("other"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ArrangeConfig {
    /// Root containing one subdirectory per dataset
    pub input_root: PathBuf,

    /// Root the arranged tree and manifests are written under
    pub output_root: PathBuf,

    /// Classification rule set
    pub rule_set: RuleSet,

    /// Datasets to process (whitelist approach)
    /// If None, every dataset directory under the input root is processed.
    pub datasets: Option<BTreeSet<String>>,

    /// Keep train/test/val subfolders above the category folder
    pub preserve_splits: bool,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT)
    }
}

impl ArrangeConfig {
    /// Creates a config with the default rule set and no dataset filter
    pub fn new(input_root: impl AsRef<Path>, output_root: impl AsRef<Path>) -> Self {
        Self {
            input_root: input_root.as_ref().to_path_buf(),
            output_root: output_root.as_ref().to_path_buf(),
            rule_set: RuleSet::default(),
            datasets: None,
            preserve_splits: false,
        }
    }

    /// Builder: Set the classification rule set
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_set = rule_set;
        self
    }

    /// Builder: Restrict processing to the named datasets
    ///
    /// An empty iterator leaves the filter unset.
    pub fn with_datasets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        self.datasets = if names.is_empty() { None } else { Some(names) };
        self
    }

    /// Builder: Keep train/test/val split folders in the output layout
    pub fn preserve_splits(mut self, preserve: bool) -> Self {
        self.preserve_splits = preserve;
        self
    }

    /// Returns whether a dataset passes the dataset filter
    pub fn includes_dataset(&self, name: &str) -> bool {
        self.datasets
            .as_ref()
            .map(|names| names.contains(name))
            .unwrap_or(true)
    }

    /// Directory a dataset is read from
    pub fn dataset_input_dir(&self, dataset: &str) -> PathBuf {
        self.input_root.join(dataset)
    }

    /// Directory a dataset is arranged into
    pub fn dataset_output_dir(&self, dataset: &str) -> PathBuf {
        self.output_root.join(dataset)
    }

    /// Path of a dataset's CSV manifest
    pub fn manifest_path(&self, dataset: &str) -> PathBuf {
        self.dataset_output_dir(dataset)
            .join(format!("report_{}.csv", dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArrangeConfig::default();
        assert_eq!(config.input_root, PathBuf::from("Datasets"));
        assert_eq!(config.output_root, PathBuf::from("Arranged_datasets"));
        assert_eq!(config.rule_set, RuleSet::FiveCategory);
        assert!(config.datasets.is_none());
        assert!(!config.preserve_splits);
    }

    #[test]
    fn test_dataset_filter() {
        let config = ArrangeConfig::default();
        assert!(config.includes_dataset("anything"));

        let config = config.with_datasets(["a", "b"]);
        assert!(config.includes_dataset("a"));
        assert!(config.includes_dataset("b"));
        assert!(!config.includes_dataset("c"));
    }

    #[test]
    fn test_empty_dataset_filter_is_unset() {
        let config = ArrangeConfig::default().with_datasets(Vec::<String>::new());
        assert!(config.datasets.is_none());
    }

    #[test]
    fn test_layout_paths() {
        let config = ArrangeConfig::new("/in", "/out");
        assert_eq!(config.dataset_input_dir("ds1"), PathBuf::from("/in/ds1"));
        assert_eq!(config.dataset_output_dir("ds1"), PathBuf::from("/out/ds1"));
        assert_eq!(
            config.manifest_path("ds1"),
            PathBuf::from("/out/ds1/report_ds1.csv")
        );
    }
}
