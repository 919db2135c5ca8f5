//! Wills and testaments subtyping.
//!
//! The `Type` column is free text written by many hands over two centuries
//! (`TD&I`, `Testament Testamentar; Latter Will and Inventory`, `Eik granted,
//! 28/02/, to the above Executrices.`). It is normalized, then matched
//! against exact and prefix tables in order; the first match wins.

use std::sync::LazyLock;

use regex::Regex;
use sourcer_model::{RecordSubtype, ScotpExtractedData};
use sourcer_normalization::clean_dd_mm_yyyy_date;
use tracing::debug;

use crate::builder::RecordBuilder;

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;.,]$").expect("Invalid trailing punctuation regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static DEATH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" d\. (\d\d/\d\d/\d{4})").expect("Invalid death date regex"));

static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\d/\d\d/\d{4}").expect("Invalid full date regex"));

static PARTIAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d\d/\d\d/").expect("Invalid partial date regex"));

const NON_SCOTTISH_COURT: &str = "non-Scottish Court";

static EXACT_MATCHES: &[(RecordSubtype, &[&str])] = &[
    (
        RecordSubtype::Probate,
        &["probate of will", "probate of the will", "note of probate"],
    ),
    (
        RecordSubtype::Testament,
        &[
            "will",
            "will or deed",
            "last will and testament",
            "tt",
            "tt and i",
            "inventory; testament",
            "testament testamentar and inventory",
        ],
    ),
    (
        RecordSubtype::Testament,
        &[
            "testament dative",
            "testament dative and inventory",
            "td",
            "td and i",
        ],
    ),
    (
        RecordSubtype::Inventory,
        &["inventory", "inventory only", "extract inventory"],
    ),
    (
        RecordSubtype::AdditionalInventory,
        &["eik", "additional inventory", "2nd additional inventory"],
    ),
    (
        RecordSubtype::TrustDisposition,
        &[
            "last deed and settlement",
            "deed of settlement",
            "trust disposition and deed of settlement",
            "disposition and settlement",
        ],
    ),
    (
        RecordSubtype::Other,
        &["will mislaid", "testamentary writings"],
    ),
];

static PREFIX_MATCHES: &[(RecordSubtype, &[&str])] = &[
    (RecordSubtype::Probate, &["probate"]),
    (
        RecordSubtype::Testament,
        &["will", "last will", "testament testamentar", "tt", "t.", "t "],
    ),
    (RecordSubtype::Testament, &["testament dative", "td"]),
    (RecordSubtype::Inventory, &["inventory", "i ", "i;", "i,"]),
    (
        RecordSubtype::AdditionalInventory,
        &[
            "eik",
            "additional inventory",
            "original confirmation granted",
            "confirmation ad omissa",
        ],
    ),
    (
        RecordSubtype::Testament,
        &[
            "last deed",
            "deed",
            "trust disposition",
            "disposition",
            "extract deed",
        ],
    ),
];

/// Whether the deceased left a will, as stated in the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testacy {
    Testate,
    Intestate,
}

impl Testacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Testacy::Testate => "testate",
            Testacy::Intestate => "intestate",
        }
    }
}

/// Lower-case, spell out `&`, drop one trailing `;.,` and collapse spaces.
pub fn normalize_type(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('&', " and ");
    let trimmed = TRAILING_PUNCTUATION.replace(&lowered, "");
    WHITESPACE_RUN.replace_all(&trimmed, " ").into_owned()
}

pub fn testacy_from_description(description: &str) -> Option<Testacy> {
    let lowered = description.to_lowercase();
    let ending = lowered.trim_end_matches(|ch: char| matches!(ch, '.' | ',' | ';') || ch.is_whitespace());
    if ending.ends_with(" intestate") {
        return Some(Testacy::Intestate);
    }
    if ending.ends_with(" testate") {
        return Some(Testacy::Testate);
    }
    if lowered.contains(", intestate,") {
        return Some(Testacy::Intestate);
    }
    if lowered.contains(", testate,") {
        return Some(Testacy::Testate);
    }
    None
}

/// Decide the subtype of a wills and testaments entry.
///
/// `court_suffix` is the text after `Court` in the court name, such as
/// `Wills` or `Inventories`.
pub fn will_subtype(
    will_type: &str,
    is_non_scottish_court: bool,
    court_suffix: Option<&str>,
    testacy: Option<Testacy>,
) -> RecordSubtype {
    if will_type.is_empty() {
        return if is_non_scottish_court {
            match testacy {
                Some(Testacy::Intestate) => RecordSubtype::LettersOfAdministration,
                _ => RecordSubtype::Probate,
            }
        } else if court_suffix == Some("Inventories") {
            RecordSubtype::Inventory
        } else {
            RecordSubtype::Testament
        };
    }

    if let Some((subtype, _)) = EXACT_MATCHES
        .iter()
        .find(|(_, types)| types.contains(&will_type))
    {
        return *subtype;
    }
    if let Some((subtype, _)) = PREFIX_MATCHES
        .iter()
        .find(|(_, starts)| starts.iter().any(|start| will_type.starts_with(start)))
    {
        return *subtype;
    }

    match court_suffix {
        Some("Inventories") => RecordSubtype::Inventory,
        Some("Wills") => RecordSubtype::Testament,
        _ => RecordSubtype::Other,
    }
}

/// A `dd/mm/yyyy` date after `marker`, or `dd/mm/` completed with the
/// event year.
fn date_after(will_type: &str, marker: &str, event_year: Option<&str>) -> Option<String> {
    let (_, remainder) = will_type.split_once(marker)?;
    if FULL_DATE.is_match(remainder) {
        return clean_dd_mm_yyyy_date(remainder.get(..10)?);
    }
    if PARTIAL_DATE.is_match(remainder) {
        let date = format!("{}{}", remainder.get(..6)?, event_year?);
        return clean_dd_mm_yyyy_date(&date);
    }
    None
}

/// Set subtype, testacy, death date and grant dates for a will entry.
pub fn apply_will_details(data: &ScotpExtractedData, builder: &mut RecordBuilder) {
    let court = data.record_value("Court").unwrap_or_default();
    let will_type = normalize_type(data.record_value("Type").unwrap_or_default());
    let description = data.record_value("Description");

    let is_non_scottish_court = court == NON_SCOTTISH_COURT;
    let court_suffix = if is_non_scottish_court {
        None
    } else {
        court
            .split_once("Court")
            .map(|(_, after)| after.trim())
            .filter(|after| !after.is_empty())
    };

    let testacy = description.and_then(testacy_from_description);
    let subtype = will_subtype(&will_type, is_non_scottish_court, court_suffix, testacy);
    debug!(will_type = %will_type, subtype = %subtype, "classified will entry");

    if let Some(caps) = description.and_then(|text| DEATH_DATE.captures(text)) {
        builder.set_death_date(clean_dd_mm_yyyy_date(&caps[1]).as_deref(), None);
    }

    let event_year = builder.record().infer_event_year();
    let granted = date_after(&will_type, " granted ", event_year.as_deref());
    let given = if granted.is_none() {
        date_after(&will_type, " given up ", event_year.as_deref())
    } else {
        None
    };

    let record = builder.record_mut();
    record.record_subtype = Some(subtype);
    record.testate_or_intestate = testacy.map(|testacy| testacy.as_str().to_string());
    match granted {
        Some(date) if will_type.starts_with("original confirmation granted") => {
            record.original_confirmation_granted_date = Some(date);
        }
        Some(date) => record.granted_date = Some(date),
        None => record.given_date = given,
    }
}
