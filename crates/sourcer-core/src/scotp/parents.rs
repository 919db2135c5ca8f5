//! Parents and other details column.
//!
//! Normally `ARCHIBALD FRASER/MARY MCARTHUR`, sometimes with film frame
//! and page references on the end: `WILLIAM FAICHNEY/MARY FAICHNEY FR400 (FR400)`.

use std::sync::LazyLock;

use regex::Regex;
use sourcer_model::{NameValue, ScotpExtractedData, collection_keys};
use sourcer_normalization::{is_dash_placeholder, standardize_name};

use crate::builder::RecordBuilder;

static FRAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+FR\d").expect("Invalid frame suffix regex"));

static PAGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+PG\d").expect("Invalid page suffix regex"));

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("Invalid leading number regex"));

/// Below this age the details column of a death names the parents; above it
/// it may name a spouse instead.
const MIN_MARRIAGE_AGE: u32 = 14;

/// Record `FR400 (FR401)` style references as pending collection data.
///
/// The first number goes under `key`; a different bracketed number under
/// `key2`.
pub fn record_reference_parts(suffix: &str, prefix: &str, key: &str, builder: &mut RecordBuilder) {
    let Some(number_start) = suffix.find(|ch: char| ch.is_ascii_digit()) else {
        return;
    };
    let number_end = suffix
        .find(char::is_whitespace)
        .unwrap_or(suffix.len());
    let first = suffix.get(number_start..number_end).unwrap_or_default();
    builder.add_pending_collection(key, first);

    let Some((_, after_open)) = suffix.split_once('(') else {
        return;
    };
    let Some((inside, _)) = after_open.split_once(')') else {
        return;
    };
    if let Some(second) = inside.strip_prefix(prefix)
        && second != first
    {
        builder.add_pending_collection(&format!("{key}2"), second);
    }
}

/// Find the details column, tolerating key case and `/ ` spacing changes.
fn details_value<'a>(data: &'a ScotpExtractedData, key: &str) -> Option<&'a str> {
    if let Some(value) = data.record_value(key) {
        return Some(value);
    }
    let normalize = |value: &str| value.to_lowercase().replace("/ ", "/").trim().to_string();
    let wanted = normalize(key);
    data.record_data
        .iter()
        .find(|(field, _)| normalize(field) == wanted)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.trim().is_empty())
}

fn is_blank_name(name: &str) -> bool {
    name.chars().all(|ch| ch == '-' || ch.is_whitespace())
}

fn parent_name(raw: &str) -> Option<NameValue> {
    if is_blank_name(raw) {
        return None;
    }
    NameValue::default().with_name(&standardize_name(raw)).non_empty()
}

fn is_young_enough(age: Option<&str>) -> bool {
    age.and_then(|age| LEADING_NUMBER.captures(age))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .is_some_and(|age| age < MIN_MARRIAGE_AGE)
}

/// Parse parents from the details column into the record.
///
/// For old parish deaths the column only names parents when the deceased
/// was a child, so parents are kept only below marriage age.
pub fn apply_parents(
    data: &ScotpExtractedData,
    key: &str,
    is_opr_death: bool,
    builder: &mut RecordBuilder,
) {
    let Some(details) = details_value(data, key) else {
        return;
    };
    if is_dash_placeholder(details) {
        return;
    }

    let mut details = details;
    if let Some(found) = FRAME_SUFFIX.find(details) {
        let suffix = details[found.start()..].trim();
        details = &details[..found.start()];
        record_reference_parts(suffix, "FR", collection_keys::FRAME_NUMBER, builder);
    }
    if let Some(found) = PAGE_SUFFIX.find(details) {
        let suffix = details[found.start()..].trim();
        details = &details[..found.start()];
        record_reference_parts(suffix, "PG", collection_keys::PAGE_NUMBER, builder);
    }

    let (father, mother) = match details.split_once('/') {
        Some((father, mother)) => (father, mother),
        None => (details, ""),
    };

    if is_opr_death && !is_young_enough(builder.record().age_at_death.as_deref()) {
        return;
    }

    let record = builder.record_mut();
    if let Some(father) = parent_name(father) {
        record.parents.father = Some(father);
    }
    if let Some(mother) = parent_name(mother) {
        record.parents.mother = Some(mother);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(key: &str, value: &str) -> ScotpExtractedData {
        ScotpExtractedData {
            record_data: [(key.to_string(), value.to_string())].into_iter().collect(),
            ..ScotpExtractedData::default()
        }
    }

    fn father_name(builder: &RecordBuilder) -> Option<&str> {
        builder
            .record()
            .parents
            .father
            .as_ref()
            .and_then(NameValue::name)
    }

    #[test]
    fn frame_numbers_are_collected() {
        let data = data(
            "Parents/Other details",
            "WILLIAM FAICHNEY/MARY FAICHNEY FR400 (FR401)",
        );
        let mut builder = RecordBuilder::new("scotp");
        apply_parents(&data, "Parents/Other details", false, &mut builder);

        assert_eq!(father_name(&builder), Some("William Faichney"));
        let pending = builder.pending_collection();
        assert_eq!(pending.get("frameNumber").map(String::as_str), Some("400"));
        assert_eq!(pending.get("frameNumber2").map(String::as_str), Some("401"));
    }

    #[test]
    fn identical_bracketed_frame_is_not_repeated() {
        let data = data("Parents/Other details", "A SMITH/B JONES FR12 (FR12)");
        let mut builder = RecordBuilder::new("scotp");
        apply_parents(&data, "Parents/Other details", false, &mut builder);
        assert_eq!(builder.pending_collection().len(), 1);
    }

    #[test]
    fn key_spacing_is_tolerated() {
        let data = data("Parents/ Other Details", "JAMES FRASER/----- -----");
        let mut builder = RecordBuilder::new("scotp");
        apply_parents(&data, "Parents/Other details", false, &mut builder);
        assert_eq!(father_name(&builder), Some("James Fraser"));
        assert!(builder.record().parents.mother.is_none());
    }

    #[test]
    fn adult_death_keeps_no_parents() {
        let data = data("Parents/Other details", "JOHN BROWN/ANN BROWN PG12");
        let mut builder = RecordBuilder::new("scotp");
        builder.record_mut().age_at_death = Some("40".to_string());
        apply_parents(&data, "Parents/Other details", true, &mut builder);
        assert!(builder.record().parents.is_empty());
        assert_eq!(
            builder.pending_collection().get("pageNumber").map(String::as_str),
            Some("12")
        );

        let mut child = RecordBuilder::new("scotp");
        child.record_mut().age_at_death = Some("3 months".to_string());
        apply_parents(&data, "Parents/Other details", true, &mut child);
        assert_eq!(father_name(&child), Some("John Brown"));
    }
}
