use crate::extraction::dicom::open_header;
use crate::types::FileFormat;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Length of the DICOM preamble plus the magic marker
pub const DICOM_PREAMBLE_LEN: usize = 132;

/// Magic marker at offset 128 of a DICOM Part 10 file
pub const DICOM_MAGIC: &[u8; 4] = b"DICM";

/// Determines the on-disk format of a file
///
/// # Algorithm
///
/// 1. `DICM` at bytes 128..132 → DICOM
/// 2. Header-only DICOM parse succeeds → DICOM
/// 3. `.mhd` extension (any case) → MHD
/// 4. Otherwise → Unknown
///
/// Never fails: unreadable files are simply `Unknown`.
pub fn classify_format(path: &Path) -> FileFormat {
    if is_dicom(path) {
        FileFormat::Dicom
    } else if is_mhd(path) {
        FileFormat::Mhd
    } else {
        FileFormat::Unknown
    }
}

/// Checks whether a file is DICOM, by marker or by parse
pub fn is_dicom(path: &Path) -> bool {
    if has_dicom_magic(path) {
        return true;
    }

    match open_header(path) {
        Ok(_) => true,
        Err(e) => {
            debug!("Not DICOM {}: {}", path.display(), e);
            false
        }
    }
}

/// Checks if a file has a DICOM header
///
/// DICOM files typically have:
/// - 128-byte preamble
/// - 4-byte "DICM" magic string at offset 128
///
/// Files shorter than 132 bytes never match.
pub fn has_dicom_magic(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; DICOM_PREAMBLE_LEN];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..DICOM_PREAMBLE_LEN] == DICOM_MAGIC,
        Err(_) => false,
    }
}

/// Checks for a `.mhd` extension, case-insensitive
pub fn is_mhd(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("mhd"))
        .unwrap_or(false)
}
