use crate::classify::{Classification, Classifier};
use crate::extraction::{classify_format, extract_fields};
use crate::types::{Category, FieldSet, FileFormat};
use log::debug;
use std::path::{Path, PathBuf};

/// One recognized input file with everything learned about it
///
/// Built by [`FileRecord::inspect`], which runs the sniffer, the field
/// extractor and the classifier in sequence.
///
/// # Example
///
/// ```
/// use ctsort_core::{Category, Classifier, FileFormat, FileRecord};
/// use std::path::Path;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("chest_coronal.mhd");
/// std::fs::write(&path, "NDims = 3\nElementDataFile = chest.raw\n").unwrap();
///
/// let record = FileRecord::inspect(&path, Path::new("chest_coronal.mhd"), &Classifier::default())
///     .expect("recognized as MHD");
///
/// assert_eq!(record.format, FileFormat::Mhd);
/// assert!(record.fields.is_empty());
/// assert_eq!(record.category(), Category::Direction);
///
/// let text = dir.path().join("readme.txt");
/// std::fs::write(&text, "notes").unwrap();
/// assert!(FileRecord::inspect(&text, Path::new("readme.txt"), &Classifier::default()).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FileRecord {
    /// Path the file was read from
    pub path: PathBuf,

    /// Detected format (never `Unknown`)
    pub format: FileFormat,

    /// Extracted classification fields
    pub fields: FieldSet,

    /// Assigned category plus the rule that decided it
    pub classification: Classification,
}

impl FileRecord {
    /// Inspects a file: sniff, extract, classify
    ///
    /// `rule_path` is the path the classifier sees; the arranger passes the
    /// path relative to the input root.
    ///
    /// # Returns
    ///
    /// `None` for files that are neither DICOM nor MHD
    pub fn inspect(path: &Path, rule_path: &Path, classifier: &Classifier) -> Option<Self> {
        let format = classify_format(path);
        if format.is_unknown() {
            debug!("Skipping unrecognized file: {}", path.display());
            return None;
        }

        let fields = extract_fields(path, format);
        let classification = classifier.classify(&fields, rule_path);
        debug!(
            "{} [{}] {} -> {}",
            path.display(),
            format,
            fields,
            classification
        );

        Some(Self {
            path: path.to_path_buf(),
            format,
            fields,
            classification,
        })
    }

    /// Returns the assigned category
    pub fn category(&self) -> Category {
        self.classification.category
    }

    /// Returns the file name, or an empty string for odd paths
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
