use crate::api::FileRecord;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Column order of the CSV manifest
pub const MANIFEST_COLUMNS: [&str; 9] = [
    "dataset",
    "file_type",
    "contrast",
    "dose",
    "filter",
    "direction",
    "category",
    "source_path",
    "destination_path",
];

/// One manifest line per arranged file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRow {
    pub dataset: String,
    pub file_type: String,
    pub contrast: String,
    pub dose: String,
    pub filter: String,
    pub direction: String,
    pub category: String,

    /// Relative to the input root
    pub source_path: String,

    /// Relative to the output root
    pub destination_path: String,
}

impl ManifestRow {
    pub fn new(
        dataset: &str,
        record: &FileRecord,
        source_path: &Path,
        destination_path: &Path,
    ) -> Self {
        Self {
            dataset: dataset.to_string(),
            file_type: record.format.label().to_string(),
            contrast: record.fields.contrast.clone(),
            dose: record.fields.dose.clone(),
            filter: record.fields.filter.clone(),
            direction: record.fields.direction.clone(),
            category: record.category().simple_name().to_string(),
            source_path: source_path.to_string_lossy().into_owned(),
            destination_path: destination_path.to_string_lossy().into_owned(),
        }
    }
}

/// Writes a manifest, replacing any previous file at `path`
///
/// The header row is always written, even with no rows.
pub fn write_manifest(path: &Path, rows: &[ManifestRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(MANIFEST_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
