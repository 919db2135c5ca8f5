//! Low-level text primitives.

use std::sync::LazyLock;

use regex::Regex;

static ANGLE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<([^>]*)>\s*$").expect("Invalid angle bracket regex"));

static DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+$").expect("Invalid dash placeholder regex"));

static LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]").expect("Invalid lowercase regex"));

static LEADING_ZEROES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0*(\d)").expect("Invalid leading zero regex"));

static YEARS_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*years\s*$").expect("Invalid years suffix regex"));

/// Age value providers use for "not known".
const UNKNOWN_AGE: &str = "999";

/// Trim and return `None` for blank input.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Remove `<...>` decoration around a whole value and trim.
///
/// If nothing remains inside the brackets the trimmed input is returned.
pub fn strip_angle_brackets(value: &str) -> String {
    if let Some(caps) = ANGLE_BRACKETS.captures(value) {
        let inner = caps[1].trim();
        if !inner.is_empty() {
            return inner.to_string();
        }
    }
    value.trim().to_string()
}

/// True when upper-casing the string leaves it unchanged.
///
/// Strings without any cased letters count as upper-case.
pub fn is_all_uppercase(value: &str) -> bool {
    value.to_uppercase() == value
}

/// Lower-case the string, then capitalize the first letter of each word.
///
/// Words start at the beginning of the string and after whitespace, `-` or `(`.
pub fn to_initial_caps_each_word(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || ch == '-' || ch == '(';
    }
    out
}

/// True for the `-----` placeholder providers use for blank columns.
pub fn is_dash_placeholder(value: &str) -> bool {
    DASHES.is_match(value.trim())
}

/// The last whitespace-delimited word.
pub fn last_word(value: &str) -> Option<&str> {
    value.split_whitespace().last()
}

/// Re-case an occupation only when it has no lower-case letters.
pub fn clean_occupation(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if LOWERCASE.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        Some(to_initial_caps_each_word(trimmed))
    }
}

/// Normalize an age: leading zeroes and a trailing `years` are removed.
///
/// `999` means unknown and yields `None`. A lone `0` is kept.
pub fn clean_age(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == UNKNOWN_AGE {
        return None;
    }
    let mut age = LEADING_ZEROES.replace(trimmed, "$1").into_owned();
    if age.chars().count() > 1 && age.chars().any(|ch| !ch.is_ascii_digit()) {
        age = YEARS_SUFFIX.replace(&age, "").into_owned();
    }
    non_empty(&age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_brackets_are_stripped() {
        assert_eq!(strip_angle_brackets(" <12 May 1890> "), "12 May 1890");
        assert_eq!(strip_angle_brackets("<>"), "<>");
        assert_eq!(strip_angle_brackets("Leeds"), "Leeds");
    }

    #[test]
    fn initial_caps_handles_word_boundaries() {
        assert_eq!(
            to_initial_caps_each_word("ST MARGARET'S UNITED SECESSION"),
            "St Margaret's United Secession"
        );
        assert_eq!(to_initial_caps_each_word("SMITH-JONES (MRS)"), "Smith-Jones (Mrs)");
    }

    #[test]
    fn dash_placeholder_detection() {
        assert!(is_dash_placeholder("-----"));
        assert!(is_dash_placeholder(" - "));
        assert!(!is_dash_placeholder("--x"));
        assert!(!is_dash_placeholder(""));
    }

    #[test]
    fn occupation_recased_only_without_lowercase() {
        assert_eq!(clean_occupation("COAL MINER").as_deref(), Some("Coal Miner"));
        assert_eq!(clean_occupation("Coal miner").as_deref(), Some("Coal miner"));
        assert_eq!(clean_occupation("  "), None);
    }

    #[test]
    fn age_cleaning() {
        assert_eq!(clean_age("007 years").as_deref(), Some("7"));
        assert_eq!(clean_age("0").as_deref(), Some("0"));
        assert_eq!(clean_age("00").as_deref(), Some("0"));
        assert_eq!(clean_age("42").as_deref(), Some("42"));
        assert_eq!(clean_age("3 Years").as_deref(), Some("3"));
        assert_eq!(clean_age("6 months").as_deref(), Some("6 months"));
        assert_eq!(clean_age("999"), None);
    }

    #[test]
    fn last_word_of_phrase() {
        assert_eq!(last_word("about 1851"), Some("1851"));
        assert_eq!(last_word("   "), None);
    }
}
