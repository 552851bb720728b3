use crate::types::{Category, FieldSet};
use regex::Regex;
use std::sync::OnceLock;

use super::{Classification, MatchSource};

// Decision list for the five-category rule set, in priority order.
// Each pattern runs against "<field> <file name>".
const FIVE_CATEGORY_PATTERNS: [(Category, &str); 4] = [
    (Category::Contrast, r"(contrast|non[- ]?contrast|with|without)"),
    (Category::Dose, r"(low[- ]?dose|high[- ]?dose|kvp)"),
    (Category::Filter, r"(bone|lung|standard|sharp|smooth|kernel)"),
    (Category::Direction, r"(axial|coronal|sagittal|3d)"),
];

// Token lists for the legacy rule set, in priority order.
// Each is a plain substring test against the combined text.
const LEGACY_GATE: &str = "axial";
const LEGACY_CONTRAST: &[&str] = &["contrast", "with_contrast", "non-contrast", "without"];
const LEGACY_DOSE: &[&str] = &["lowdose", "low dose", "highdose", "high dose", "kvp"];
const LEGACY_FILTER: &[&str] = &[
    "bone",
    "lung",
    "standard",
    "parenchyma",
    "sharp",
    "smooth",
];

fn five_category_rules() -> &'static [(Category, Regex)] {
    static RULES: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        FIVE_CATEGORY_PATTERNS
            .iter()
            .map(|(category, pattern)| {
                (
                    *category,
                    Regex::new(pattern).expect("Failed to compile regex"),
                )
            })
            .collect()
    })
}

fn field_for(fields: &FieldSet, category: Category) -> &str {
    match category {
        Category::Contrast => &fields.contrast,
        Category::Dose => &fields.dose,
        Category::Filter => &fields.filter,
        Category::Direction => &fields.direction,
        Category::Others => "",
    }
}

/// Five-category decision list
///
/// # Algorithm
///
/// For contrast, dose, filter, direction in that order, match the rule's
/// pattern against `"<field> <file name>"`. The first hit decides the
/// category; no hit gives `Others`.
pub(super) fn classify_five_category(fields: &FieldSet, file_name: &str) -> Classification {
    let file_name = file_name.to_lowercase();

    for (category, regex) in five_category_rules() {
        let field = field_for(fields, *category);
        let haystack = format!("{} {}", field, file_name);

        if let Some(m) = regex.find(&haystack) {
            let source = if m.start() < field.len() {
                MatchSource::Field
            } else {
                MatchSource::FileName
            };
            return Classification::matched(*category, m.as_str(), source);
        }
    }

    Classification::fallthrough()
}

/// Legacy axial-gated decision list
///
/// # Algorithm
///
/// 1. Join all four fields, the file name and the path into one text
/// 2. No "axial" anywhere → `Others`
/// 3. Contrast tokens → `Contrast`
/// 4. Dose tokens → `Dose`
/// 5. Filter tokens → `Filter`
/// 6. Default → `Others`
pub(super) fn classify_legacy_axial_gated(
    fields: &FieldSet,
    file_name: &str,
    path: &str,
) -> Classification {
    let file_name = file_name.to_lowercase();
    let path = path.to_lowercase();
    let combined = [
        fields.contrast.as_str(),
        fields.dose.as_str(),
        fields.filter.as_str(),
        fields.direction.as_str(),
        file_name.as_str(),
        path.as_str(),
    ]
    .join(" ");

    if !combined.contains(LEGACY_GATE) {
        return Classification {
            category: Category::Others,
            token: None,
            source: MatchSource::AxialGate,
        };
    }

    let lists = [
        (Category::Contrast, LEGACY_CONTRAST),
        (Category::Dose, LEGACY_DOSE),
        (Category::Filter, LEGACY_FILTER),
    ];

    for (category, tokens) in lists {
        if let Some(token) = tokens.iter().find(|t| combined.contains(*t)) {
            return Classification::matched(category, token, MatchSource::Combined);
        }
    }

    Classification::fallthrough()
}
