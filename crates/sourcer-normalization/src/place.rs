//! Place selection and cleaning.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::{is_all_uppercase, non_empty, strip_angle_brackets, to_initial_caps_each_word};

static LEADING_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*of\s+").expect("Invalid leading article regex"));

/// Jurisdiction annotations that are not part of a display place name.
static NON_STANDARD_SUFFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r",? *British Colonial America"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid place suffix regex"))
        .collect()
});

/// Strip `<...>` decoration and a leading `of `.
pub fn clean_place(raw: &str) -> Option<String> {
    let place = strip_angle_brackets(raw);
    let without_article = LEADING_OF.replace(&place, "");
    match non_empty(&without_article) {
        Some(value) => Some(value),
        None => non_empty(&place),
    }
}

/// Choose between a working place and the place as originally transcribed.
///
/// The original is only used when the working value is missing.
pub fn select_place(primary: Option<&str>, original: Option<&str>) -> Option<String> {
    let Some(primary) = primary.and_then(clean_place) else {
        return original.and_then(clean_place);
    };
    let mut place = primary;
    for suffix in NON_STANDARD_SUFFIXES.iter() {
        place = suffix.replace(&place, "").into_owned();
    }
    non_empty(&place)
}

/// Join the non-empty parts with `", "`.
pub fn join_place_parts<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    non_empty(&joined)
}

/// Re-case a place name when it is entirely upper case.
pub fn standardize_place_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_all_uppercase(trimmed) {
        to_initial_caps_each_word(trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_article_is_removed() {
        assert_eq!(clean_place("of Leeds, Yorkshire").as_deref(), Some("Leeds, Yorkshire"));
        assert_eq!(clean_place("<Of Bath>").as_deref(), Some("Bath"));
        assert_eq!(clean_place("Offord, Huntingdonshire").as_deref(), Some("Offord, Huntingdonshire"));
    }

    #[test]
    fn select_place_falls_back_to_original() {
        assert_eq!(
            select_place(None, Some("of Boston")).as_deref(),
            Some("Boston")
        );
        assert_eq!(
            select_place(Some("Salem, Essex, Massachusetts, British Colonial America"), Some("Salem"))
                .as_deref(),
            Some("Salem, Essex, Massachusetts")
        );
        assert_eq!(select_place(Some(" "), None), None);
    }

    #[test]
    fn parts_are_joined_skipping_blanks() {
        assert_eq!(
            join_place_parts([Some("Springfield"), None, Some(" "), Some("Illinois")]).as_deref(),
            Some("Springfield, Illinois")
        );
        assert_eq!(join_place_parts([None, Some("")]), None);
    }

    #[test]
    fn upper_case_place_is_recased() {
        assert_eq!(standardize_place_name("ST ANDREWS"), "St Andrews");
        assert_eq!(standardize_place_name("Govan"), "Govan");
    }
}
