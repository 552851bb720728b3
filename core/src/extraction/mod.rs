pub mod dicom;
pub mod mhd;
pub mod sniff;
pub mod tags;

pub use dicom::{extract_dicom_fields, open_header, plane_from_file_name};
pub use mhd::{extract_mhd_fields, MetaHeader};
pub use sniff::{classify_format, has_dicom_magic, is_dicom, is_mhd};
pub use tags::*;

use crate::types::{FieldSet, FileFormat};
use std::path::Path;

/// Extracts the four classification fields for a file of known format
///
/// Never fails: unknown formats and unreadable headers give the empty
/// field set.
pub fn extract_fields(path: &Path, format: FileFormat) -> FieldSet {
    match format {
        FileFormat::Dicom => extract_dicom_fields(path),
        FileFormat::Mhd => extract_mhd_fields(path),
        FileFormat::Unknown => FieldSet::default(),
    }
}
