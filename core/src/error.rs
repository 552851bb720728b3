use thiserror::Error;

/// Result type for ctsort operations
pub type Result<T> = std::result::Result<T, CtsortError>;

/// Error types for ctsort operations
///
/// Only dataset-level failures surface as errors. Per-file sniffing and
/// extraction problems degrade to "unknown format" or empty fields instead.
#[derive(Error, Debug)]
pub enum CtsortError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// MetaImage header could not be parsed
    #[error("MHD header error: {0}")]
    MhdError(String),

    /// Manifest could not be written
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Directory traversal error
    #[error("Walk error: {0}")]
    WalkError(String),

    /// Invalid input root, dataset or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<dicom_object::ReadError> for CtsortError {
    fn from(e: dicom_object::ReadError) -> Self {
        CtsortError::DicomError(format!("{}", e))
    }
}

impl From<csv::Error> for CtsortError {
    fn from(e: csv::Error) -> Self {
        CtsortError::CsvError(format!("{}", e))
    }
}

impl From<walkdir::Error> for CtsortError {
    fn from(e: walkdir::Error) -> Self {
        CtsortError::WalkError(format!("{}", e))
    }
}
