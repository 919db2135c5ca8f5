use proptest::prelude::*;
use sourcer_normalization::{
    clean_age, clean_dd_mm_yyyy_date, select_date, select_place, standardize_name,
};

#[test]
fn ambiguous_eight_digit_date_defers_to_original() {
    assert_eq!(
        select_date(Some("11081921"), Some("08 Nov 1921")).as_deref(),
        Some("08 Nov 1921")
    );
}

#[test]
fn year_only_date_defers_to_fuller_original() {
    assert_eq!(
        select_date(Some("1921"), Some("08 Nov 1921")).as_deref(),
        Some("08 Nov 1921")
    );
}

#[test]
fn missing_original_keeps_primary() {
    assert_eq!(
        select_date(Some("08 Nov 1921"), None).as_deref(),
        Some("08 Nov 1921")
    );
}

#[test]
fn upper_case_surnames_get_display_case() {
    assert_eq!(standardize_name("MACGREGOR"), "MacGregor");
    assert_eq!(standardize_name("MCKENZIE"), "Mckenzie");
    assert_eq!(standardize_name("Smith"), "Smith");
    assert_eq!(standardize_name("ANDREW ROSS FRASER"), "Andrew Ross Fraser");
}

#[test]
fn age_with_padding_and_unit() {
    assert_eq!(clean_age("007 years").as_deref(), Some("7"));
}

#[test]
fn place_prefers_primary_without_colonial_suffix() {
    assert_eq!(
        select_place(Some("<Hartford, Connecticut, British Colonial America>"), None).as_deref(),
        Some("Hartford, Connecticut")
    );
}

proptest! {
    #[test]
    fn standardize_name_is_idempotent(raw in "[A-Za-z' ]{1,24}") {
        let once = standardize_name(&raw);
        prop_assert_eq!(standardize_name(&once), once.clone());
    }

    #[test]
    fn standardize_name_keeps_mixed_case(raw in "[A-Z][a-z]{1,12}") {
        prop_assert_eq!(standardize_name(&raw), raw.clone());
    }

    #[test]
    fn select_date_returns_one_of_its_inputs(
        primary in proptest::option::of("[0-9A-Za-z /]{0,16}"),
        original in proptest::option::of("[0-9A-Za-z /]{0,16}"),
    ) {
        if let Some(chosen) = select_date(primary.as_deref(), original.as_deref()) {
            let candidates = [primary.as_deref(), original.as_deref()];
            prop_assert!(candidates.iter().flatten().any(|value| value.trim() == chosen));
        }
    }

    #[test]
    fn cleaned_age_has_no_padding(age in 0u32..120, padding in 0usize..3) {
        let raw = format!("{}{age} years", "0".repeat(padding));
        prop_assert_eq!(clean_age(&raw), Some(age.to_string()));
    }

    #[test]
    fn valid_numeric_dates_are_spelled_out(day in 1u32..=28, month in 1u32..=12, year in 1700u32..2000) {
        let cleaned = clean_dd_mm_yyyy_date(&format!("{day}/{month}/{year}")).unwrap();
        let expected_prefix = format!("{day} ");
        let expected_suffix = format!(" {year}");
        prop_assert!(cleaned.starts_with(&expected_prefix));
        prop_assert!(cleaned.ends_with(&expected_suffix));
        prop_assert!(!cleaned.contains('/'));
    }
}
