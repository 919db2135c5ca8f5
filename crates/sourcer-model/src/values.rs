//! Immutable value objects for names, dates and places.
//!
//! Values are built through factory functions that normalize their input.
//! A factory returns `None` when there is nothing to store, so an empty
//! string never ends up inside a canonical record.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3,4})\b").expect("Invalid year regex"));

/// Date formats tried before falling back to the last year-like token.
const FULL_DATE_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%Y-%m-%d", "%B %d, %Y"];

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract the year from a display date string.
///
/// Full dates are parsed with chrono; anything else uses the last
/// three or four digit token.
pub fn extract_year_string(date_string: &str) -> Option<String> {
    let trimmed = date_string.trim();
    for format in FULL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.year().to_string());
        }
    }
    YEAR_TOKEN
        .captures_iter(trimmed)
        .last()
        .map(|caps| caps[1].to_string())
}

/// Qualifier attached to a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateQualifier {
    #[default]
    Exact,
    About,
    Before,
    After,
}

impl DateQualifier {
    pub fn is_exact(&self) -> bool {
        matches!(self, DateQualifier::Exact)
    }

    /// Recognize a leading qualifier word such as `abt` or `before`.
    fn from_prefix(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "abt" | "abt." | "about" | "c" | "c." | "ca" | "ca." | "circa" => {
                Some(DateQualifier::About)
            }
            "bef" | "bef." | "before" => Some(DateQualifier::Before),
            "aft" | "aft." | "after" => Some(DateQualifier::After),
            _ => None,
        }
    }
}

/// A date as captured from a record: display string, year and qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year_string: Option<String>,
    #[serde(default, skip_serializing_if = "DateQualifier::is_exact")]
    qualifier: DateQualifier,
}

impl DateValue {
    /// Build a date from a display string, splitting off a leading qualifier.
    pub fn from_date_string(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (qualifier, rest) = match trimmed.split_once(' ') {
            Some((first, rest)) => match DateQualifier::from_prefix(first) {
                Some(qualifier) => (qualifier, rest.trim()),
                None => (DateQualifier::Exact, trimmed),
            },
            None => (DateQualifier::Exact, trimmed),
        };
        let date_string = non_empty(rest)?;
        Some(Self {
            date_string: Some(date_string),
            year_string: None,
            qualifier,
        })
    }

    /// Build a date that only knows its year.
    pub fn from_year(raw: &str) -> Option<Self> {
        Some(Self {
            date_string: None,
            year_string: Some(non_empty(raw)?),
            qualifier: DateQualifier::Exact,
        })
    }

    /// Returns a copy with the year set; empty input leaves it unchanged.
    #[must_use]
    pub fn with_year(mut self, raw: &str) -> Self {
        if let Some(year) = non_empty(raw) {
            self.year_string = Some(year);
        }
        self
    }

    /// Returns a copy with the qualifier set.
    ///
    /// A qualifier is only kept alongside a date string.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: DateQualifier) -> Self {
        if self.date_string.is_some() {
            self.qualifier = qualifier;
        }
        self
    }

    pub fn date_string(&self) -> Option<&str> {
        self.date_string.as_deref()
    }

    pub fn year_string(&self) -> Option<&str> {
        self.year_string.as_deref()
    }

    pub fn qualifier(&self) -> DateQualifier {
        self.qualifier
    }

    /// The best display form: the full date string, else the year.
    pub fn display(&self) -> Option<&str> {
        self.date_string().or(self.year_string())
    }

    /// The year as a string, from the year field or derived from the date.
    pub fn year(&self) -> Option<String> {
        if let Some(year) = &self.year_string {
            return Some(year.clone());
        }
        self.date_string.as_deref().and_then(extract_year_string)
    }

    /// The year as a number when it parses.
    pub fn year_number(&self) -> Option<i32> {
        self.year().and_then(|year| year.trim().parse().ok())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display().unwrap_or_default())
    }
}

/// A place: display string plus optional structured parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    street_address: Option<String>,
}

impl PlaceValue {
    pub fn from_place_string(raw: &str) -> Option<Self> {
        Some(Self {
            place_string: Some(non_empty(raw)?),
            ..Self::default()
        })
    }

    /// A place in a known country with no display string yet.
    pub fn in_country(country: &str) -> Self {
        Self {
            country: non_empty(country),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_place_string(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.place_string = Some(value);
        }
        self
    }

    #[must_use]
    pub fn with_county(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.county = Some(value);
        }
        self
    }

    #[must_use]
    pub fn with_street_address(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.street_address = Some(value);
        }
        self
    }

    pub fn place_string(&self) -> Option<&str> {
        self.place_string.as_deref()
    }

    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn street_address(&self) -> Option<&str> {
        self.street_address.as_deref()
    }

    /// True when no part of the place is populated.
    pub fn is_empty(&self) -> bool {
        self.place_string.is_none()
            && self.county.is_none()
            && self.country.is_none()
            && self.street_address.is_none()
    }
}

/// A structured person name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forenames: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nicknames: Option<String>,
}

/// Split `John "Jack" Smith` into (`John Smith`, `Some("Jack")`).
fn split_nicknames(raw: &str) -> (String, Option<String>) {
    let mut remaining = String::new();
    let mut nicknames = Vec::new();
    let mut rest = raw;
    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('"') else {
            break;
        };
        remaining.push_str(&rest[..open]);
        remaining.push(' ');
        let nickname = after_open[..close].trim();
        if !nickname.is_empty() {
            nicknames.push(nickname.to_string());
        }
        rest = &after_open[close + 1..];
    }
    remaining.push_str(rest);
    let collapsed = remaining.split_whitespace().collect::<Vec<_>>().join(" ");
    let nicknames = if nicknames.is_empty() {
        None
    } else {
        Some(nicknames.join(" "))
    };
    (collapsed, nicknames)
}

impl NameValue {
    /// Build a name from a full name string.
    ///
    /// Double-quoted segments are treated as nicknames and removed from the
    /// full name.
    pub fn from_full_name(raw: &str) -> Option<Self> {
        Self::default().with_full_name(raw).non_empty()
    }

    /// Returns `None` when no part of the name is populated.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    #[must_use]
    pub fn with_full_name(mut self, raw: &str) -> Self {
        let (name, nicknames) = split_nicknames(raw);
        if let Some(name) = non_empty(&name) {
            self.name = Some(name);
        }
        if nicknames.is_some() {
            self.nicknames = nicknames;
        }
        self
    }

    /// Set the full name verbatim, without nickname extraction.
    #[must_use]
    pub fn with_name(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.name = Some(value);
        }
        self
    }

    /// Set forenames, moving any quoted nickname into `nicknames`.
    #[must_use]
    pub fn with_forenames(mut self, raw: &str) -> Self {
        let (forenames, nicknames) = split_nicknames(raw);
        if let Some(value) = non_empty(&forenames) {
            self.forenames = Some(value);
        }
        if nicknames.is_some() {
            self.nicknames = nicknames;
        }
        self
    }

    #[must_use]
    pub fn with_last_name(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.last_name = Some(value);
        }
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.prefix = Some(value);
        }
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.suffix = Some(value);
        }
        self
    }

    #[must_use]
    pub fn with_nicknames(mut self, raw: &str) -> Self {
        if let Some(value) = non_empty(raw) {
            self.nicknames = Some(value);
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn forenames(&self) -> Option<&str> {
        self.forenames.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn nicknames(&self) -> Option<&str> {
        self.nicknames.as_deref()
    }

    /// The full name, or forenames and last name joined.
    pub fn full_name(&self) -> Option<String> {
        if let Some(name) = &self.name {
            return Some(name.clone());
        }
        match (&self.forenames, &self.last_name) {
            (Some(forenames), Some(last)) => Some(format!("{forenames} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.forenames.is_none()
            && self.last_name.is_none()
            && self.prefix.is_none()
            && self.suffix.is_none()
            && self.nicknames.is_none()
    }
}

/// Gender of the record subject. Unknown values are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Marital status at the time of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
    Separated,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Separated => "separated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_factory_rejects_blank_input() {
        assert!(DateValue::from_date_string("   ").is_none());
        assert!(DateValue::from_year("").is_none());
    }

    #[test]
    fn date_factory_splits_qualifier() {
        let date = DateValue::from_date_string("abt 1850").unwrap();
        assert_eq!(date.date_string(), Some("1850"));
        assert_eq!(date.qualifier(), DateQualifier::About);
        assert_eq!(date.year().as_deref(), Some("1850"));
    }

    #[test]
    fn qualifier_requires_date_string() {
        let date = DateValue::from_year("1850")
            .unwrap()
            .with_qualifier(DateQualifier::Before);
        assert_eq!(date.qualifier(), DateQualifier::Exact);
    }

    #[test]
    fn year_is_derived_from_full_date() {
        let date = DateValue::from_date_string("08 Nov 1921").unwrap();
        assert_eq!(date.year_number(), Some(1921));
        assert_eq!(extract_year_string("Q3 1865").as_deref(), Some("1865"));
    }

    #[test]
    fn nicknames_are_split_from_full_name() {
        let name = NameValue::from_full_name("John \"Jack\" Smith").unwrap();
        assert_eq!(name.name(), Some("John Smith"));
        assert_eq!(name.nicknames(), Some("Jack"));
    }

    #[test]
    fn empty_place_is_detected() {
        assert!(PlaceValue::default().is_empty());
        assert!(!PlaceValue::in_country("Scotland").is_empty());
        assert!(PlaceValue::from_place_string(" ").is_none());
    }
}
