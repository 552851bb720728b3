//! Core type definitions
//!
//! - [`FileFormat`]: detected on-disk format (DICOM, MHD, unknown)
//! - [`Category`]: the closed set of output folders
//! - [`RuleSet`]: named classification rule sets
//! - [`FieldSet`]: the four lower-cased fields used for classification
//! - [`ArrangeConfig`]: explicit configuration for arranging datasets

mod config;
mod enums;
mod fields;

pub use config::{ArrangeConfig, DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT_ROOT, SPLIT_FOLDER_NAMES};
pub use enums::{Category, FileFormat, RuleSet, ALL_CATEGORIES};
pub use fields::FieldSet;
