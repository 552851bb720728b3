//! Dataset arranging
//!
//! Walks each dataset under the input root, inspects every file, copies
//! recognized files into `<output>/<dataset>/[<split>/]<category>/` and
//! writes `report_<dataset>.csv` next to the category folders.

mod copy;
mod manifest;
mod summary;

pub use copy::{safe_copy, CopyOutcome};
pub use manifest::{write_manifest, ManifestRow, MANIFEST_COLUMNS};
pub use summary::{ArrangeReport, DatasetSummary};

use crate::api::FileRecord;
use crate::classify::Classifier;
use crate::error::{CtsortError, Result};
use crate::types::{ArrangeConfig, SPLIT_FOLDER_NAMES};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists dataset directories directly under the input root, sorted by name
///
/// # Errors
///
/// Returns an error if the input root is missing or unreadable
pub fn discover_datasets(input_root: &Path) -> Result<Vec<String>> {
    if !input_root.is_dir() {
        return Err(CtsortError::InvalidInput(format!(
            "{} is not a directory",
            input_root.display()
        )));
    }

    let mut datasets = Vec::new();
    for entry in fs::read_dir(input_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            datasets.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    datasets.sort();

    Ok(datasets)
}

/// Finds the first train/test/val folder between the dataset root and a file
///
/// `relative` is the file path relative to the dataset root. The file name
/// itself is never treated as a split.
pub fn detect_split_folder(relative: &Path) -> Option<String> {
    let parent = relative.parent()?;
    parent
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .find(|part| SPLIT_FOLDER_NAMES.contains(&part.to_lowercase().as_str()))
        .map(|part| part.into_owned())
}

/// Arranges datasets according to an [`ArrangeConfig`]
///
/// # Example
///
/// ```
/// use ctsort_core::{ArrangeConfig, Arranger, Category};
///
/// let input = tempfile::tempdir().unwrap();
/// let output = tempfile::tempdir().unwrap();
/// std::fs::create_dir(input.path().join("lidc")).unwrap();
/// std::fs::write(input.path().join("lidc/chest_coronal.mhd"), "NDims = 3\n").unwrap();
/// std::fs::write(input.path().join("lidc/readme.txt"), "notes").unwrap();
///
/// let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));
/// let report = arranger.arrange_all().unwrap();
///
/// let summary = &report.summaries[0];
/// assert_eq!(summary.total, 1);
/// assert_eq!(summary.count(Category::Direction), 1);
/// assert!(output.path().join("lidc/direction/chest_coronal.mhd").exists());
/// assert!(output.path().join("lidc/report_lidc.csv").exists());
/// ```
#[derive(Debug, Clone)]
pub struct Arranger {
    config: ArrangeConfig,
    classifier: Classifier,
}

impl Arranger {
    pub fn new(config: ArrangeConfig) -> Self {
        let classifier = Classifier::new(config.rule_set);
        Self { config, classifier }
    }

    pub fn config(&self) -> &ArrangeConfig {
        &self.config
    }

    /// Arranges every selected dataset under the input root
    ///
    /// A failing dataset is logged and recorded in the report; the
    /// remaining datasets are still processed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input root cannot be listed
    pub fn arrange_all(&self) -> Result<ArrangeReport> {
        let discovered = discover_datasets(&self.config.input_root)?;
        let mut report = ArrangeReport::default();

        if let Some(selected) = &self.config.datasets {
            for name in selected {
                if !discovered.contains(name) {
                    warn!("Dataset not found: {}", name);
                    report
                        .failures
                        .push((name.clone(), "dataset not found".to_string()));
                }
            }
        }

        for name in discovered
            .iter()
            .filter(|name| self.config.includes_dataset(name))
        {
            if self.is_output_root(name) {
                info!("Skipping output directory: {}", name);
                continue;
            }

            match self.arrange_dataset(name) {
                Ok(summary) => report.summaries.push(summary),
                Err(e) => {
                    error!("Failed to arrange {}: {}", name, e);
                    report.failures.push((name.clone(), e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Whether a dataset directory is the output root itself
    ///
    /// An output root placed directly under the input root would otherwise
    /// be picked up as a dataset on the next run.
    fn is_output_root(&self, dataset: &str) -> bool {
        match (
            self.config.dataset_input_dir(dataset).canonicalize(),
            self.config.output_root.canonicalize(),
        ) {
            (Ok(dataset_dir), Ok(output_root)) => dataset_dir == output_root,
            _ => false,
        }
    }

    /// Arranges one dataset and writes its manifest
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset directory is missing, the output
    /// directory cannot be created, or the manifest cannot be written.
    /// Individual files never fail the dataset.
    pub fn arrange_dataset(&self, dataset: &str) -> Result<DatasetSummary> {
        let dataset_dir = self.config.dataset_input_dir(dataset);
        if !dataset_dir.is_dir() {
            return Err(CtsortError::InvalidInput(format!(
                "dataset directory {} does not exist",
                dataset_dir.display()
            )));
        }

        info!("Processing dataset: {}", dataset);

        let out_dir = self.config.dataset_output_dir(dataset);
        for category in self.config.rule_set.categories() {
            fs::create_dir_all(out_dir.join(category.simple_name()))?;
        }

        let input_root = self.config.input_root.canonicalize()?;
        let output_root = self.config.output_root.canonicalize()?;
        let dataset_root = dataset_dir.canonicalize()?;

        let mut summary = DatasetSummary::new(dataset, self.config.rule_set);
        let mut rows = Vec::new();

        for src in walk_files(&dataset_root, &output_root) {
            let rule_path = relative_to(&src, &input_root);
            let Some(record) = FileRecord::inspect(&src, &rule_path, &self.classifier) else {
                summary.skipped += 1;
                continue;
            };

            let mut relative_dst = PathBuf::from(dataset);
            if self.config.preserve_splits {
                if let Some(split) = detect_split_folder(&relative_to(&src, &dataset_root)) {
                    relative_dst.push(split);
                }
            }
            relative_dst.push(record.category().simple_name());
            relative_dst.push(record.file_name());

            let dst = self.config.output_root.join(&relative_dst);
            match safe_copy(&src, &dst) {
                Ok(outcome) => summary.record(record.category(), outcome),
                Err(e) => {
                    warn!("Failed to copy {}: {}", src.display(), e);
                    summary.failed += 1;
                    continue;
                }
            }

            rows.push(ManifestRow::new(dataset, &record, &rule_path, &relative_dst));
        }

        let manifest_path = self.config.manifest_path(dataset);
        write_manifest(&manifest_path, &rows)?;
        info!("Report saved: {}", manifest_path.display());
        summary.manifest_path = Some(manifest_path);

        Ok(summary)
    }
}

/// Files under `root` in sorted order, skipping anything inside `exclude`
///
/// Unreadable entries are logged and skipped.
fn walk_files(root: &Path, exclude: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(exclude))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", CtsortError::from(e));
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, RuleSet};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn dicom_magic_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM\x02\x00\x00\x00");
        bytes
    }

    fn write(root: &Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample_input() -> TempDir {
        let input = TempDir::new().unwrap();
        let root = input.path();
        write(root, "lidc/ct_scan_lowdose_axial.dcm", &dicom_magic_bytes());
        write(root, "lidc/series/contrast_001.dcm", &dicom_magic_bytes());
        write(root, "lidc/series/image_0001.dcm", &dicom_magic_bytes());
        write(root, "lidc/volumes/lung.mhd", b"NDims = 3\nElementDataFile = lung.raw\n");
        write(root, "lidc/volumes/lung.raw", &[0u8; 64]);
        write(root, "lidc/readme.txt", b"contrast study notes");
        write(root, "kits/train/axial_bone.mhd", b"NDims = 3\n");
        input
    }

    /// Snapshot of every file under a root, relative path -> contents
    fn tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(root).unwrap().to_path_buf(),
                    fs::read(e.path()).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_discover_datasets_sorted_dirs_only() {
        let input = sample_input();
        write(input.path(), "loose_file.dcm", &dicom_magic_bytes());

        let datasets = discover_datasets(input.path()).unwrap();
        assert_eq!(datasets, vec!["kits".to_string(), "lidc".to_string()]);
    }

    #[test]
    fn test_discover_datasets_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(discover_datasets(&temp_dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_detect_split_folder() {
        assert_eq!(
            detect_split_folder(Path::new("a/Train/b/x.dcm")),
            Some("Train".to_string())
        );
        assert_eq!(
            detect_split_folder(Path::new("validation/x.dcm")),
            Some("validation".to_string())
        );
        assert_eq!(detect_split_folder(Path::new("a/b/test")), None);
        assert_eq!(detect_split_folder(Path::new("x.dcm")), None);
    }

    #[test]
    fn test_arrange_dataset_layout_and_counts() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));

        let summary = arranger.arrange_dataset("lidc").unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.copied, 4);
        assert_eq!(summary.count(Category::Dose), 1);
        assert_eq!(summary.count(Category::Contrast), 1);
        assert_eq!(summary.count(Category::Filter), 1);
        assert_eq!(summary.count(Category::Others), 1);
        assert_eq!(summary.count(Category::Direction), 0);

        let out = output.path().join("lidc");
        assert!(out.join("dose/ct_scan_lowdose_axial.dcm").exists());
        assert!(out.join("contrast/contrast_001.dcm").exists());
        assert!(out.join("filter/lung.mhd").exists());
        assert!(out.join("others/image_0001.dcm").exists());
        assert!(out.join("direction").is_dir());
        assert!(!out.join("others/readme.txt").exists());
        assert!(!out.join("others/lung.raw").exists());
    }

    #[test]
    fn test_manifest_rows_match_copies() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));
        arranger.arrange_dataset("lidc").unwrap();

        let manifest = fs::read_to_string(output.path().join("lidc/report_lidc.csv")).unwrap();
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("lidc,DICOM,"));
        assert!(lines[1].ends_with(
            ",dose,lidc/ct_scan_lowdose_axial.dcm,lidc/dose/ct_scan_lowdose_axial.dcm"
        ));
        assert!(!manifest.contains("readme.txt"));
        assert!(manifest.contains(",MHD,"));
    }

    #[test]
    fn test_arrange_twice_is_idempotent() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));

        let first = arranger.arrange_all().unwrap();
        let first_tree = tree(output.path());

        let second = arranger.arrange_all().unwrap();
        let second_tree = tree(output.path());

        assert_eq!(first_tree, second_tree);
        for (a, b) in first.summaries.iter().zip(&second.summaries) {
            assert_eq!(a.counts, b.counts);
            assert_eq!(a.total, b.total);
        }
        assert_eq!(second.summaries.iter().map(|s| s.copied).sum::<usize>(), 0);
        assert_eq!(
            second
                .summaries
                .iter()
                .map(|s| s.already_present)
                .sum::<usize>(),
            5
        );
    }

    #[test]
    fn test_preserve_splits() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let config = ArrangeConfig::new(input.path(), output.path()).preserve_splits(true);

        let summary = Arranger::new(config).arrange_dataset("kits").unwrap();
        assert_eq!(summary.count(Category::Filter), 1);
        assert!(output
            .path()
            .join("kits/train/filter/axial_bone.mhd")
            .exists());
    }

    #[test]
    fn test_splits_flattened_by_default() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));

        arranger.arrange_dataset("kits").unwrap();
        assert!(output.path().join("kits/filter/axial_bone.mhd").exists());
    }

    #[test]
    fn test_legacy_rule_set_layout() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let config = ArrangeConfig::new(input.path(), output.path())
            .with_rule_set(RuleSet::LegacyAxialGated);

        let summary = Arranger::new(config).arrange_dataset("lidc").unwrap();
        assert_eq!(summary.count(Category::Dose), 1);
        assert_eq!(summary.count(Category::Others), 3);
        assert!(!output.path().join("lidc/direction").exists());
    }

    #[test]
    fn test_dataset_filter_and_missing_dataset() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let config =
            ArrangeConfig::new(input.path(), output.path()).with_datasets(["kits", "ghost"]);

        let report = Arranger::new(config).arrange_all().unwrap();
        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.summaries[0].dataset, "kits");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "ghost");
        assert!(!output.path().join("lidc").exists());
    }

    #[test]
    fn test_output_inside_input_is_not_rewalked() {
        let input = sample_input();
        let output_root = input.path().join("lidc/arranged");
        fs::create_dir_all(&output_root).unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), &output_root));

        let first = arranger.arrange_dataset("lidc").unwrap();
        let second = arranger.arrange_dataset("lidc").unwrap();
        assert_eq!(first.total, 4);
        assert_eq!(second.total, 4);
    }

    #[test]
    fn test_output_under_input_root_is_not_a_dataset() {
        let input = TempDir::new().unwrap();
        write(input.path(), "ds/a_axial.mhd", b"NDims = 3\n");
        let output_root = input.path().join("arranged");
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), &output_root));

        let first = arranger.arrange_all().unwrap();
        let snapshot = tree(&output_root);
        let second = arranger.arrange_all().unwrap();

        for report in [&first, &second] {
            let names: Vec<&str> = report.summaries.iter().map(|s| s.dataset.as_str()).collect();
            assert_eq!(names, vec!["ds"]);
            assert!(report.is_success());
        }
        assert!(!output_root.join("arranged").exists());
        assert_eq!(tree(&output_root), snapshot);
        assert!(output_root.join("ds/direction/a_axial.mhd").exists());
    }

    #[test]
    fn test_missing_dataset_is_error() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let arranger = Arranger::new(ArrangeConfig::new(input.path(), output.path()));

        assert!(arranger.arrange_dataset("ghost").is_err());
    }
}
