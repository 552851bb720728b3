use std::fmt;

/// Detected on-disk format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "UPPERCASE"))]
pub enum FileFormat {
    Unknown,
    Dicom,
    Mhd,
}

impl FileFormat {
    /// Returns whether this format is unrecognized
    pub fn is_unknown(&self) -> bool {
        matches!(self, FileFormat::Unknown)
    }

    /// Returns the label written to the manifest `file_type` column
    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Unknown => "UNKNOWN",
            FileFormat::Dicom => "DICOM",
            FileFormat::Mhd => "MHD",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Category folder a file is arranged into
///
/// Closed set; `Others` is the catch-all so classification is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Category {
    Contrast,
    Dose,
    Filter,
    Direction,
    Others,
}

/// Every category, in decision-list order
pub const ALL_CATEGORIES: [Category; 5] = [
    Category::Contrast,
    Category::Dose,
    Category::Filter,
    Category::Direction,
    Category::Others,
];

impl Category {
    /// Returns the folder / manifest name
    pub fn simple_name(&self) -> &'static str {
        match self {
            Category::Contrast => "contrast",
            Category::Dose => "dose",
            Category::Filter => "filter",
            Category::Direction => "direction",
            Category::Others => "others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Named classification rule set
///
/// Two historical variants of the arranging heuristic disagree on the
/// category set and on whether an "axial" token gates classification.
/// Both are kept and selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum RuleSet {
    /// contrast > dose > filter > direction > others, tested per field
    /// against the field value and the file name
    #[default]
    FiveCategory,

    /// Requires "axial" somewhere in the fields or path, then
    /// contrast > dose > filter > others over the combined text
    LegacyAxialGated,
}

impl RuleSet {
    /// Categories this rule set can produce, in output order
    pub fn categories(&self) -> &'static [Category] {
        match self {
            RuleSet::FiveCategory => &ALL_CATEGORIES,
            RuleSet::LegacyAxialGated => &[
                Category::Contrast,
                Category::Dose,
                Category::Filter,
                Category::Others,
            ],
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            RuleSet::FiveCategory => "five-category",
            RuleSet::LegacyAxialGated => "legacy-axial-gated",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
