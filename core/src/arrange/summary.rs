use super::CopyOutcome;
use crate::types::{Category, RuleSet};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Per-dataset totals accumulated while arranging
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DatasetSummary {
    pub dataset: String,

    pub rule_set: RuleSet,

    /// Arranged files per category; every category of the rule set is present
    pub counts: BTreeMap<Category, usize>,

    /// Recognized and arranged files
    pub total: usize,

    /// Files copied in this run
    pub copied: usize,

    /// Files whose destination already existed
    pub already_present: usize,

    /// Files that were neither DICOM nor MHD
    pub skipped: usize,

    /// Recognized files that could not be copied
    pub failed: usize,

    pub manifest_path: Option<PathBuf>,
}

impl DatasetSummary {
    pub fn new(dataset: &str, rule_set: RuleSet) -> Self {
        Self {
            dataset: dataset.to_string(),
            rule_set,
            counts: rule_set.categories().iter().map(|c| (*c, 0)).collect(),
            total: 0,
            copied: 0,
            already_present: 0,
            skipped: 0,
            failed: 0,
            manifest_path: None,
        }
    }

    /// Counts one arranged file
    pub fn record(&mut self, category: Category, outcome: CopyOutcome) {
        *self.counts.entry(category).or_insert(0) += 1;
        self.total += 1;
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::AlreadyPresent => self.already_present += 1,
        }
    }

    /// Number of files arranged into a category
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

/// Outcome of arranging every selected dataset
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ArrangeReport {
    pub summaries: Vec<DatasetSummary>,

    /// `(dataset, reason)` for datasets that could not be arranged
    pub failures: Vec<(String, String)>,
}

impl ArrangeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total arranged files across datasets
    pub fn total(&self) -> usize {
        self.summaries.iter().map(|s| s.total).sum()
    }
}
