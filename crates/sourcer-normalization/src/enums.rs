//! Mapping free-text values onto the model's enumerations.

use sourcer_model::{Gender, MaritalStatus};

/// Provider quarter labels for registration indexes.
const QUARTER_LABELS: &[(&str, u8)] = &[
    ("Jan-Feb-Mar", 1),
    ("Apr-May-Jun", 2),
    ("Jul-Aug-Sep", 3),
    ("Oct-Nov-Dec", 4),
];

/// Variant spellings of household relationships mapped to a display form.
const RELATIONSHIP_SYNONYMS: &[(&str, &str)] = &[
    ("head of household", "head"),
    ("self", "head"),
    ("dau", "daughter"),
    ("dau.", "daughter"),
    ("step-son", "stepson"),
    ("step son", "stepson"),
    ("step-daughter", "stepdaughter"),
    ("step daughter", "stepdaughter"),
    ("son in law", "son-in-law"),
    ("daughter in law", "daughter-in-law"),
    ("father in law", "father-in-law"),
    ("mother in law", "mother-in-law"),
    ("brother in law", "brother-in-law"),
    ("sister in law", "sister-in-law"),
    ("serv", "servant"),
    ("serv.", "servant"),
    ("grand son", "grandson"),
    ("grand daughter", "granddaughter"),
];

/// Map a gender value; anything not clearly male or female is dropped.
pub fn standardize_gender(raw: &str) -> Option<Gender> {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" | "man" | "boy" => Some(Gender::Male),
        "female" | "f" | "woman" | "girl" => Some(Gender::Female),
        _ => None,
    }
}

/// Map a marital status value, including single-letter census codes.
pub fn standardize_marital_status(raw: &str) -> Option<MaritalStatus> {
    match raw.trim().to_lowercase().as_str() {
        "single" | "unmarried" | "never married" | "s" | "u" | "unm" | "unm." => {
            Some(MaritalStatus::Single)
        }
        "married" | "m" | "mar" | "mar." => Some(MaritalStatus::Married),
        "widowed" | "widow" | "widower" | "w" | "wid" | "wid." => Some(MaritalStatus::Widowed),
        "divorced" | "d" | "div" | "div." => Some(MaritalStatus::Divorced),
        "separated" => Some(MaritalStatus::Separated),
        _ => None,
    }
}

/// Lower-case a relationship-to-head value and resolve common variants.
///
/// Blank and `Unknown` values yield `None`.
pub fn standardize_relationship_to_head(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() || lowered == "unknown" {
        return None;
    }
    let resolved = RELATIONSHIP_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == lowered)
        .map_or(lowered.as_str(), |(_, display)| *display);
    Some(resolved.to_string())
}

/// Map a registration quarter label such as `Jul-Aug-Sep` to 1..=4.
pub fn quarter_from_label(label: &str) -> Option<u8> {
    let trimmed = label.trim();
    QUARTER_LABELS
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, quarter)| *quarter)
}
