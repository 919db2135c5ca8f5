//! Date selection and reformatting.
//!
//! Providers often publish a date twice: a normalized working field and the
//! text as transcribed from the document. [`select_date`] picks the more
//! readable of the two. The `clean_*` functions turn provider-specific
//! numeric layouts into display strings such as `25 June 1867`.

use std::sync::LazyLock;

use regex::Regex;
use sourcer_model::extract_year_string;
use tracing::trace;

use crate::text::{is_dash_placeholder, non_empty, strip_angle_brackets, to_initial_caps_each_word};

static EIGHT_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{8}").expect("Invalid digit run regex"));

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d?\d/\d?\d/\d{4}").expect("Invalid slash date regex"));

static SPACED_NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d?\d\s+\d?\d\s+\d{4}").expect("Invalid spaced date regex"));

static DASH_BETWEEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*-\s*(\d)").expect("Invalid dash date regex"));

static SPACED_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*/\s*").expect("Invalid slash regex"));

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("Invalid number regex"));

/// A working date shorter than this is treated as year-only.
const MIN_FULL_DATE_LEN: usize = 6;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn cleaned(value: Option<&str>) -> Option<String> {
    value.map(strip_angle_brackets).and_then(|v| non_empty(&v))
}

/// Choose between a working date and the date as originally transcribed.
///
/// The original wins when the working value is an ambiguous numeric form
/// (`11081921`, `05/24/1974`, `1 11 1854`) or only a year while the
/// original is longer. Otherwise the working value is kept.
pub fn select_date(primary: Option<&str>, original: Option<&str>) -> Option<String> {
    let primary = cleaned(primary);
    let original = cleaned(original);

    let (primary, original) = match (primary, original) {
        (None, original) => return original,
        (primary, None) => return primary,
        (Some(primary), Some(original)) => (primary, original),
    };

    if EIGHT_DIGITS.is_match(&primary)
        || SLASH_DATE.is_match(&primary)
        || SPACED_NUMERIC_DATE.is_match(&primary)
    {
        trace!(primary = %primary, "numeric date deferred to original");
        return Some(original);
    }

    let primary_len = primary.chars().count();
    if primary_len < MIN_FULL_DATE_LEN && original.chars().count() > primary_len {
        return Some(original);
    }

    Some(primary)
}

/// Reformat a `D/M/YYYY` style date as `D Month YYYY`.
///
/// Dashes between digits are read as slashes and spaces around slashes are
/// dropped. Year-first values are swapped. A value without slashes is
/// taken to be a year. Values with out-of-range parts are returned in their
/// slash-normalized form rather than rejected.
pub fn clean_dd_mm_yyyy_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_dash_placeholder(trimmed) {
        return None;
    }

    let slashed = DASH_BETWEEN_DIGITS.replace_all(trimmed, "$1/$2");
    let date = SPACED_SLASH.replace_all(&slashed, "/").into_owned();
    if date == "0/0/0" {
        return None;
    }

    let parts: Vec<&str> = date.splitn(3, '/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Some(date);
    };
    let (mut day, month, mut year) = (day.trim(), month.trim(), year.trim());
    if year.len() < 3 || day.len() > 2 {
        std::mem::swap(&mut day, &mut year);
    }

    let Ok(day_num) = day.parse::<u32>() else {
        return Some(date);
    };
    if !(1..=31).contains(&day_num) {
        return Some(date);
    }
    let Ok(month_num) = month.parse::<usize>() else {
        return Some(date);
    };
    if !(1..=12).contains(&month_num) {
        return Some(date);
    }
    let Ok(year_num) = year.parse::<u32>() else {
        return Some(date);
    };
    if !(100..=2500).contains(&year_num) {
        return Some(date);
    }

    Some(format!("{day_num} {} {year}", MONTH_NAMES[month_num - 1]))
}

/// Reformat `23/FEBRUARY/1854` or `23 FEBRUARY 1854` as `23 February 1854`.
pub fn clean_dd_month_yyyy_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_dash_placeholder(trimmed) {
        return None;
    }
    let spaced = SPACED_SLASH.replace_all(trimmed, " ");
    non_empty(&to_initial_caps_each_word(&spaced))
}

/// The year a duration in years before the given date, e.g. the approximate
/// marriage year from a census date and a years-married count.
pub fn approximate_year_before(date: &str, years: &str) -> Option<String> {
    let year: i32 = extract_year_string(date)?.parse().ok()?;
    let years: i32 = LEADING_NUMBER.captures(years)?[1].parse().ok()?;
    Some((year - years).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_date_prefers_readable_original() {
        assert_eq!(
            select_date(Some("11081921"), Some("08 Nov 1921")).as_deref(),
            Some("08 Nov 1921")
        );
        assert_eq!(
            select_date(Some("05/24/1974"), Some("24 May 1974")).as_deref(),
            Some("24 May 1974")
        );
        assert_eq!(
            select_date(Some("1 11 1854"), Some("1 Nov 1854")).as_deref(),
            Some("1 Nov 1854")
        );
        assert_eq!(
            select_date(Some("1921"), Some("08 Nov 1921")).as_deref(),
            Some("08 Nov 1921")
        );
    }

    #[test]
    fn select_date_keeps_primary_otherwise() {
        assert_eq!(
            select_date(Some("08 Nov 1921"), None).as_deref(),
            Some("08 Nov 1921")
        );
        assert_eq!(
            select_date(Some("8 November 1921"), Some("8 Nov 1921")).as_deref(),
            Some("8 November 1921")
        );
        assert_eq!(
            select_date(Some("<1851>"), Some("  ")).as_deref(),
            Some("1851")
        );
        assert_eq!(select_date(None, None), None);
    }

    #[test]
    fn numeric_dates_become_month_names() {
        assert_eq!(
            clean_dd_mm_yyyy_date("25/6/1867").as_deref(),
            Some("25 June 1867")
        );
        assert_eq!(
            clean_dd_mm_yyyy_date("25 / 06 / 1867").as_deref(),
            Some("25 June 1867")
        );
        assert_eq!(
            clean_dd_mm_yyyy_date("1917-03-09").as_deref(),
            Some("9 March 1917")
        );
        assert_eq!(
            clean_dd_mm_yyyy_date("05/01/1850").as_deref(),
            Some("5 January 1850")
        );
    }

    #[test]
    fn numeric_date_edge_cases() {
        assert_eq!(clean_dd_mm_yyyy_date("-----"), None);
        assert_eq!(clean_dd_mm_yyyy_date("0/0/0"), None);
        assert_eq!(clean_dd_mm_yyyy_date("1855").as_deref(), Some("1855"));
        assert_eq!(clean_dd_mm_yyyy_date("12/1855").as_deref(), Some("12/1855"));
        assert_eq!(
            clean_dd_mm_yyyy_date("32/13/1855").as_deref(),
            Some("32/13/1855")
        );
    }

    #[test]
    fn month_name_dates() {
        assert_eq!(
            clean_dd_month_yyyy_date("23/FEBRUARY/1854").as_deref(),
            Some("23 February 1854")
        );
        assert_eq!(
            clean_dd_month_yyyy_date("23 FEBRUARY 1854").as_deref(),
            Some("23 February 1854")
        );
        assert_eq!(clean_dd_month_yyyy_date("---"), None);
    }

    #[test]
    fn years_before_date() {
        assert_eq!(
            approximate_year_before("1900", "12").as_deref(),
            Some("1888")
        );
        assert_eq!(
            approximate_year_before("2 Apr 1911", "20 years").as_deref(),
            Some("1891")
        );
        assert_eq!(approximate_year_before("unknown", "12"), None);
    }
}
