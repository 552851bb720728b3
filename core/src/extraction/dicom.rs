use crate::error::Result;
use crate::types::FieldSet;
use dicom_object::{DefaultDicomObject, InMemDicomObject, OpenFileOptions};
use log::debug;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use super::tags::{
    get_lowercase_value, CONTRAST_BOLUS_AGENT, CONVOLUTION_KERNEL, KVP, PIXEL_DATA,
    SERIES_DESCRIPTION,
};

/// Anatomical plane tokens recognized in file names and header values
pub(crate) fn plane_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(axial|coronal|sagittal|3d)").expect("Failed to compile regex")
    })
}

/// Opens a DICOM file without loading pixel data
pub fn open_header(path: &Path) -> Result<DefaultDicomObject> {
    let dcm = OpenFileOptions::new()
        .read_until(PIXEL_DATA)
        .open_file(path)?;
    Ok(dcm)
}

/// Extracts the four classification fields from a DICOM file
///
/// # Algorithm
///
/// 1. Read the header only (stop before Pixel Data)
/// 2. ContrastBolusAgent → contrast, KVP → dose,
///    ConvolutionKernel → filter, SeriesDescription → direction
/// 3. If direction is still empty, take the first plane token
///    (axial/coronal/sagittal/3d) found in the file name
///
/// Any read failure yields the empty field set.
pub fn extract_dicom_fields(path: &Path) -> FieldSet {
    match open_header(path) {
        Ok(dcm) => {
            let mut fields = fields_from_dicom(&dcm);
            if fields.direction.is_empty() {
                if let Some(plane) = plane_from_file_name(path) {
                    fields.direction = plane;
                }
            }
            fields
        }
        Err(e) => {
            debug!("DICOM header unreadable {}: {}", path.display(), e);
            FieldSet::default()
        }
    }
}

/// Maps header tags onto a field set, without any file name fallback
pub fn fields_from_dicom(dcm: &InMemDicomObject) -> FieldSet {
    FieldSet {
        contrast: get_lowercase_value(dcm, CONTRAST_BOLUS_AGENT),
        dose: get_lowercase_value(dcm, KVP),
        filter: get_lowercase_value(dcm, CONVOLUTION_KERNEL),
        direction: get_lowercase_value(dcm, SERIES_DESCRIPTION),
    }
}

/// Finds the leftmost plane token in the lower-cased file name
pub fn plane_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    plane_regex().find(&name).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};
    use dicom_object::mem::InMemElement;
    use dicom_object::meta::FileMetaTableBuilder;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";
    const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";

    fn write_dicom(dir: &TempDir, name: &str, elements: Vec<InMemElement>) -> PathBuf {
        let dcm = InMemDicomObject::from_element_iter(elements);
        let file_obj = dcm
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(EXPLICIT_VR_LE)
                    .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid("2.25.1234567890"),
            )
            .unwrap();

        let path = dir.path().join(name);
        file_obj.write_to_file(&path).unwrap();
        path
    }

    #[test]
    fn test_extract_all_tags() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dicom(
            &temp_dir,
            "series_001.dcm",
            vec![
                DataElement::new(
                    CONTRAST_BOLUS_AGENT,
                    VR::LO,
                    PrimitiveValue::from("Omnipaque"),
                ),
                DataElement::new(KVP, VR::DS, PrimitiveValue::from("120")),
                DataElement::new(CONVOLUTION_KERNEL, VR::SH, PrimitiveValue::from("B70F")),
                DataElement::new(
                    SERIES_DESCRIPTION,
                    VR::LO,
                    PrimitiveValue::from("Thorax 1.0 Coronal"),
                ),
            ],
        );

        let fields = extract_dicom_fields(&path);
        assert_eq!(fields.contrast, "omnipaque");
        assert_eq!(fields.dose, "120");
        assert_eq!(fields.filter, "b70f");
        assert_eq!(fields.direction, "thorax 1.0 coronal");
    }

    #[test]
    fn test_missing_description_falls_back_to_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dicom(
            &temp_dir,
            "Chest_Sagittal_then_Axial.dcm",
            vec![DataElement::new(KVP, VR::DS, PrimitiveValue::from("100"))],
        );

        let fields = extract_dicom_fields(&path);
        assert_eq!(fields.dose, "100");
        assert_eq!(fields.contrast, "");
        assert_eq!(fields.direction, "sagittal");
    }

    #[test]
    fn test_header_description_wins_over_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dicom(
            &temp_dir,
            "scan_axial.dcm",
            vec![DataElement::new(
                SERIES_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from("Lung Window"),
            )],
        );

        assert_eq!(extract_dicom_fields(&path).direction, "lung window");
    }

    #[test]
    fn test_written_file_is_sniffed_as_dicom() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_dicom(&temp_dir, "noext", vec![]);
        assert!(open_header(&path).is_ok());
        assert_eq!(
            crate::extraction::classify_format(&path),
            crate::types::FileFormat::Dicom
        );
    }

    #[test]
    fn test_garbage_after_magic_yields_empty_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken_axial.dcm");
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICMgarbage");
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(extract_dicom_fields(&path), FieldSet::default());
    }

    #[test]
    fn test_plane_from_file_name() {
        assert_eq!(
            plane_from_file_name(Path::new("/data/CT_3D_recon.dcm")),
            Some("3d".to_string())
        );
        assert_eq!(
            plane_from_file_name(Path::new("coronal_axial.dcm")),
            Some("coronal".to_string())
        );
        assert_eq!(plane_from_file_name(Path::new("image_0001.dcm")), None);
    }

    #[test]
    fn test_fields_from_empty_object() {
        let dcm = InMemDicomObject::new_empty();
        assert!(fields_from_dicom(&dcm).is_empty());
    }
}
