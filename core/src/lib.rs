pub mod api;
pub mod arrange;
pub mod classify;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod types;

pub use api::FileRecord;
pub use arrange::{discover_datasets, ArrangeReport, Arranger, DatasetSummary, ManifestRow};
pub use classify::{classify, Classification, Classifier, MatchSource};
pub use cli::report::TextReport;
pub use error::{CtsortError, Result};
pub use extraction::{classify_format, extract_fields};
pub use types::*;
