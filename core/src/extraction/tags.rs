use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Acquisition Tags
pub const CONTRAST_BOLUS_AGENT: Tag = Tag(0x0018, 0x0010);
pub const KVP: Tag = Tag(0x0018, 0x0060);
pub const CONVOLUTION_KERNEL: Tag = Tag(0x0018, 0x1210);

// Description Tags
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Header-only reads stop here
pub const PIXEL_DATA: Tag = dicom_dictionary_std::tags::PIXEL_DATA;

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string.
/// Multi-valued elements come back joined with a backslash.
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string())
}

/// Helper to get a tag as a lower-cased string, empty when absent
pub fn get_lowercase_value(dcm: &InMemDicomObject, tag: Tag) -> String {
    get_string_value(dcm, tag)
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}
