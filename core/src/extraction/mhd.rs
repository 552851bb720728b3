use crate::error::{CtsortError, Result};
use crate::types::FieldSet;
use log::debug;
use std::path::Path;

use super::dicom::plane_regex;

/// Key that terminates a MetaImage header
///
/// With `ElementDataFile = LOCAL` raw voxels follow directly, so nothing
/// after this line is read as text.
pub const ELEMENT_DATA_FILE: &str = "ElementDataFile";

/// Standard MetaImage keys describing layout and geometry
///
/// These never carry acquisition metadata and are left out of field
/// extraction. `ElementDataFile` names the raw volume, so a raw file called
/// `contrast_axial.raw` must not classify the scan.
pub const STANDARD_KEYS: [&str; 22] = [
    "ObjectType",
    "ObjectSubType",
    "NDims",
    "DimSize",
    "ElementType",
    "ElementSpacing",
    "ElementSize",
    "ElementNumberOfChannels",
    "ElementByteOrderMSB",
    "BinaryData",
    "BinaryDataByteOrderMSB",
    "CompressedData",
    "CompressedDataSize",
    "HeaderSize",
    "Offset",
    "Position",
    "Origin",
    "CenterOfRotation",
    "TransformMatrix",
    "Rotation",
    "AnatomicalOrientation",
    ELEMENT_DATA_FILE,
];

fn is_standard_key(key: &str) -> bool {
    STANDARD_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Parsed MetaImage (`.mhd`) header
///
/// Keeps `Key = Value` pairs in file order. Values are stored as written;
/// lower-casing happens at field extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaHeader {
    entries: Vec<(String, String)>,
}

impl MetaHeader {
    /// Reads and parses a header file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds no
    /// `Key = Value` pairs.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse_bytes(&bytes)
    }

    /// Parses header bytes, tolerating binary data after `ElementDataFile`
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();

        for raw_line in bytes.split(|&b| b == b'\n') {
            let line = String::from_utf8_lossy(raw_line);
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.push((key.to_string(), value.trim().to_string()));

            if key == ELEMENT_DATA_FILE {
                break;
            }
        }

        if entries.is_empty() {
            return Err(CtsortError::MhdError(
                "no Key = Value pairs found".to_string(),
            ));
        }

        Ok(Self { entries })
    }

    /// Parses a header from text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Self::parse_bytes(s.as_bytes())
    }

    /// Iterates over `(key, value)` pairs in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the non-standard pairs, the header's extra metadata
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries().filter(|(k, _)| !is_standard_key(k))
    }

    /// Maps metadata pairs onto the four classification fields
    ///
    /// Standard layout keys are ignored. For each remaining pair, with the value lower-cased and the key matched
    /// case-insensitively:
    /// - key or value contains "contrast" → contrast
    /// - key or value contains "dose", or value contains "kvp" → dose
    /// - key contains "filter" or value contains "kernel" → filter
    /// - key contains "direction" or value has a plane token → direction
    ///
    /// One pair may feed several fields. Later pairs overwrite earlier ones.
    pub fn fields(&self) -> FieldSet {
        let mut fields = FieldSet::default();

        for (key, value) in self.metadata() {
            let key = key.to_lowercase();
            let value = value.to_lowercase();

            if key.contains("contrast") || value.contains("contrast") {
                fields.contrast = value.clone();
            }
            if key.contains("dose") || value.contains("kvp") || value.contains("dose") {
                fields.dose = value.clone();
            }
            if key.contains("filter") || value.contains("kernel") {
                fields.filter = value.clone();
            }
            if key.contains("direction") || plane_regex().is_match(&value) {
                fields.direction = value;
            }
        }

        fields
    }
}

/// Extracts the four classification fields from an MHD header file
///
/// Any read or parse failure yields the empty field set.
pub fn extract_mhd_fields(path: &Path) -> FieldSet {
    match MetaHeader::read(path) {
        Ok(header) => header.fields(),
        Err(e) => {
            debug!("MHD header unreadable {}: {}", path.display(), e);
            FieldSet::default()
        }
    }
}
