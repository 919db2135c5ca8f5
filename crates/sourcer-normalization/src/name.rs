//! Display-case standardization for person names.
//!
//! Providers often index names entirely in upper case (`MACGREGOR`,
//! `O'CONNOR`). Such names are converted to display case with a few
//! Gaelic prefix rules. Mixed-case input is assumed to be well formed and
//! returned as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::is_all_uppercase;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static OR_CONJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+or\s+").expect("Invalid conjunction regex"));

static PERIOD_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s").expect("Invalid period regex"));

static TRAILING_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.$").expect("Invalid period regex"));

static PERIOD_BEFORE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([^\s])").expect("Invalid period regex"));

const MAC_EXCEPTIONS: &[&str] = &["Macilbowie", "Mackenzie", "Macmaster"];
const MC_EXCEPTIONS: &[&str] = &["Mcilbowie", "Mckenzie", "Mcmaster"];

/// Words shorter than this (`Mack`, `Mach`) never get a capital after `Mac`.
const MIN_MAC_WORD_LEN: usize = 5;

const CONJUNCTION: &str = "or";

/// Convert an upper-case name to display case.
///
/// `"MACGREGOR"` becomes `"MacGregor"`, `"MCKENZIE"` becomes `"Mckenzie"`
/// (exception list), and `"BAIRD or MCGREGOR"` becomes
/// `"Baird or McGregor"`. A leading parenthetical such as `(Mrs)` is
/// dropped.
pub fn standardize_name(raw: &str) -> String {
    let original = raw.trim();
    if original.is_empty() {
        return String::new();
    }

    let mut result = WHITESPACE.replace_all(original, " ").into_owned();

    if result.starts_with('(')
        && let Some(close) = result.find(')')
    {
        result = result[close + 1..].trim().to_string();
        if result.is_empty() {
            return original.to_string();
        }
    }

    if result.contains('.') {
        result = PERIOD_SPACE.replace_all(&result, " ").into_owned();
        result = TRAILING_PERIOD.replace(&result, "").into_owned();
        result = PERIOD_BEFORE_TEXT.replace_all(&result, " $1").into_owned();
    }

    if !is_all_uppercase(&result) {
        let without_conjunction = OR_CONJUNCTION.replace_all(&result, "");
        if !is_all_uppercase(&without_conjunction) {
            return original.to_string();
        }
    }

    if result.chars().count() == 1 {
        return result.to_uppercase();
    }

    let lowered = result.to_lowercase();
    let words: Vec<&str> = lowered.trim().split(' ').collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if *word == CONJUNCTION && index > 0 && index < last {
                (*word).to_string()
            } else {
                capitalize_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn upper_at(word: &str, index: usize) -> String {
    let mut out = String::with_capacity(word.len());
    for (position, ch) in word.chars().enumerate() {
        if position == index {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Capitalize the first letter, then apply the `Mac`/`Mc`/`O'` rules.
fn capitalize_word(word: &str) -> String {
    let capitalized = upper_at(word, 0);
    let len = capitalized.chars().count();
    let inner_capital = if capitalized.starts_with("Mac") && len > 3 {
        (len >= MIN_MAC_WORD_LEN && !MAC_EXCEPTIONS.contains(&capitalized.as_str())).then_some(3)
    } else if capitalized.starts_with("Mc") && len > 2 {
        (!MC_EXCEPTIONS.contains(&capitalized.as_str())).then_some(2)
    } else if capitalized.starts_with("O'") && len > 2 {
        Some(2)
    } else {
        None
    };

    match inner_capital {
        Some(index) => upper_at(&capitalized, index),
        None => capitalized,
    }
}
