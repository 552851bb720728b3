//! Category classification
//!
//! Assigns exactly one [`Category`] to a file from its [`FieldSet`] and
//! path by walking an ordered decision list; the first rule that matches
//! wins. Header fields are filled inconsistently across datasets, so every
//! rule also looks at the file name.

mod rules;

use crate::types::{Category, FieldSet, RuleSet};
use std::fmt;
use std::path::Path;

/// Where the deciding token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum MatchSource {
    /// In the header field tied to the rule
    Field,
    /// In the file name
    FileName,
    /// Somewhere in the combined fields + path text (legacy rules)
    Combined,
    /// Legacy rules: no "axial" token, so nothing else was tested
    AxialGate,
    /// No rule matched
    Fallthrough,
}

/// Outcome of classifying one file
///
/// Carries the rule diagnostic next to the category so the precedence
/// decision can be audited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Classification {
    pub category: Category,

    /// Token that fired, if any
    pub token: Option<String>,

    pub source: MatchSource,
}

impl Classification {
    fn matched(category: Category, token: &str, source: MatchSource) -> Self {
        Self {
            category,
            token: Some(token.to_string()),
            source,
        }
    }

    fn fallthrough() -> Self {
        Self {
            category: Category::Others,
            token: None,
            source: MatchSource::Fallthrough,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{} ({:?} matched {:?})", self.category, token, self.source),
            None => write!(f, "{} ({:?})", self.category, self.source),
        }
    }
}

/// Classifier bound to one rule set
///
/// # Example
///
/// ```
/// use ctsort_core::{Category, Classifier, FieldSet, RuleSet};
/// use std::path::Path;
///
/// let classifier = Classifier::new(RuleSet::FiveCategory);
/// let result = classifier.classify(
///     &FieldSet::default(),
///     Path::new("ct_scan_lowdose_axial.dcm"),
/// );
///
/// // dose is tested before direction
/// assert_eq!(result.category, Category::Dose);
/// assert_eq!(result.token.as_deref(), Some("lowdose"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    rule_set: RuleSet,
}

impl Classifier {
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    /// Classifies a file from its fields and path
    ///
    /// The five-category rules look only at the file name; the legacy rules
    /// also search the whole path, so pass it relative to the input root to
    /// keep results independent of where the data lives.
    pub fn classify(&self, fields: &FieldSet, path: &Path) -> Classification {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.rule_set {
            RuleSet::FiveCategory => rules::classify_five_category(fields, &file_name),
            RuleSet::LegacyAxialGated => rules::classify_legacy_axial_gated(
                fields,
                &file_name,
                &path.to_string_lossy(),
            ),
        }
    }
}

/// Classifies a file name with the default five-category rules
///
/// # Example
///
/// ```
/// use ctsort_core::{classify, Category, FieldSet};
///
/// let fields = FieldSet::new("", "", "", "axial");
/// assert_eq!(classify(&fields, "contrast_series.dcm"), Category::Contrast);
/// assert_eq!(classify(&fields, "image_0001.dcm"), Category::Direction);
/// assert_eq!(classify(&FieldSet::default(), "image_0001.dcm"), Category::Others);
/// ```
pub fn classify(fields: &FieldSet, file_name: &str) -> Category {
    rules::classify_five_category(fields, file_name).category
}
