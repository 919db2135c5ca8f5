//! Household table expansion and relative inference.

use std::collections::BTreeSet;

use sourcer_model::{
    CanonicalRecord, DateValue, FsHousehold, FsHouseholdMember, Gender, HouseholdField,
    HouseholdMember, NameValue, Spouse,
};
use sourcer_normalization::{
    approximate_year_before, clean_occupation, last_word, non_empty, standardize_gender,
    standardize_marital_status, standardize_relationship_to_head,
};
use tracing::debug;

/// Placeholder providers use for unreadable household cells.
const UNKNOWN: &str = "Unknown";
/// Age providers use when the age is not known.
const UNKNOWN_AGE: &str = "999";

/// Expanded household rows plus the attributes seen in at least one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseholdSummary {
    pub members: Vec<HouseholdMember>,
    pub fields: Vec<HouseholdField>,
}

fn known(value: Option<&str>) -> Option<String> {
    value
        .and_then(non_empty)
        .filter(|value| !value.eq_ignore_ascii_case(UNKNOWN))
}

fn summarize_member(member: &FsHouseholdMember) -> HouseholdMember {
    if member.is_closed {
        return HouseholdMember {
            is_closed: true,
            ..HouseholdMember::default()
        };
    }

    let birth_year = known(member.birth_year.as_deref());
    let birth_date =
        known(member.birth_date.as_deref()).filter(|date| Some(date) != birth_year.as_ref());
    let birth_place = known(member.birth_place.as_deref())
        .or_else(|| known(member.birth_place_original.as_deref()));

    HouseholdMember {
        is_closed: false,
        name: member.full_name.as_deref().and_then(non_empty),
        relationship: known(member.relationship.as_deref())
            .and_then(|rel| standardize_relationship_to_head(&rel)),
        marital_status: member
            .marital_status
            .as_deref()
            .and_then(standardize_marital_status),
        gender: known(member.gender.as_deref()).and_then(|gender| standardize_gender(&gender)),
        age: known(member.age.as_deref()).filter(|age| age != UNKNOWN_AGE),
        birth_year,
        birth_date,
        occupation: member
            .occupation
            .as_deref()
            .and_then(clean_occupation)
            .filter(|occupation| occupation != UNKNOWN),
        birth_place,
        is_selected: member.is_selected,
    }
}

/// Expand a household table into member summaries.
///
/// Returns `None` unless the table has both headings and member rows.
/// `fields` is the union of populated attributes in canonical order,
/// independent of row order.
pub fn expand_household(household: &FsHousehold) -> Option<HouseholdSummary> {
    let (Some(_headings), Some(rows)) = (&household.headings, &household.members) else {
        return None;
    };

    let members: Vec<HouseholdMember> = rows.iter().map(summarize_member).collect();
    let fields: BTreeSet<HouseholdField> = members
        .iter()
        .flat_map(|member| {
            HouseholdField::ALL
                .iter()
                .copied()
                .filter(|field| member.has_field(*field))
        })
        .collect();

    debug!(
        members = members.len(),
        fields = fields.len(),
        "expanded household table"
    );
    Some(HouseholdSummary {
        members,
        fields: fields.into_iter().collect(),
    })
}

/// The raw row marked as the record subject.
pub fn selected_raw_member(household: &FsHousehold) -> Option<&FsHouseholdMember> {
    household
        .members
        .as_ref()?
        .iter()
        .find(|member| member.is_selected)
}

fn has_relationship(member: &HouseholdMember, relationships: &[&str]) -> bool {
    member
        .relationship
        .as_deref()
        .is_some_and(|rel| relationships.contains(&rel))
}

fn find_member<'a>(
    members: &'a [HouseholdMember],
    relationships: &[&str],
) -> Option<&'a HouseholdMember> {
    members
        .iter()
        .find(|member| !member.is_selected && has_relationship(member, relationships))
}

fn member_name(member: &HouseholdMember) -> Option<NameValue> {
    member.name.as_deref().and_then(NameValue::from_full_name)
}

fn spouse_from_member(member: &HouseholdMember) -> Spouse {
    Spouse {
        name: member_name(member),
        age: member.age.clone(),
        ..Spouse::default()
    }
}

/// Which of two partners is the father, going by gender then relationship.
fn is_father(member: &HouseholdMember) -> bool {
    match member.gender {
        Some(Gender::Male) => true,
        Some(Gender::Female) => false,
        None => !has_relationship(member, &["wife"]),
    }
}

/// Infer spouse and parents of the selected member from the other rows.
///
/// Only fills in spouses or parents the record does not already have.
pub fn infer_relatives(record: &mut CanonicalRecord) {
    let Some(selected) = record.selected_household_member().cloned() else {
        return;
    };
    let Some(relationship) = selected.relationship.as_deref() else {
        return;
    };
    let members = record.household_array.clone();

    let mut spouse = None;
    let mut father = None;
    let mut mother = None;
    match relationship {
        "head" => {
            spouse = find_member(&members, &["wife", "husband"]);
            father = find_member(&members, &["father"]);
            mother = find_member(&members, &["mother"]);
        }
        "wife" | "husband" => {
            spouse = find_member(&members, &["head"]);
        }
        "son" | "daughter" => {
            let head = find_member(&members, &["head"]);
            let partner = find_member(&members, &["wife", "husband"]);
            for parent in [head, partner].into_iter().flatten() {
                if is_father(parent) {
                    father = father.or(Some(parent));
                } else {
                    mother = mother.or(Some(parent));
                }
            }
        }
        _ => {}
    }

    if record.spouses.is_empty()
        && let Some(spouse) = spouse
    {
        record.spouses.push(spouse_from_member(spouse));
    }
    if record.parents.is_empty() {
        record.parents.father = father.and_then(member_name);
        record.parents.mother = mother.and_then(member_name);
    }
}

/// Annotate the only spouse with an approximate marriage year.
///
/// The year is the event date minus the years married; it is a best-effort
/// estimate, stored as a year string only.
pub fn apply_years_married(record: &mut CanonicalRecord, years_married: &str) {
    if record.spouses.len() != 1 {
        return;
    }
    let Some(event_date) = record.infer_event_date() else {
        return;
    };
    let Some(estimate) = approximate_year_before(&event_date, years_married) else {
        return;
    };
    let Some(year) = last_word(&estimate) else {
        return;
    };

    let spouse = &mut record.spouses[0];
    spouse.marriage_date = match spouse.marriage_date.take() {
        Some(date) => Some(date.with_year(year)),
        None => DateValue::from_year(year),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, relationship: &str, gender: &str) -> FsHouseholdMember {
        FsHouseholdMember {
            full_name: Some(name.to_string()),
            relationship: Some(relationship.to_string()),
            gender: Some(gender.to_string()),
            ..FsHouseholdMember::default()
        }
    }

    #[test]
    fn unknown_cells_are_skipped() {
        let raw = FsHouseholdMember {
            full_name: Some("Ann Fraser".to_string()),
            relationship: Some("Unknown".to_string()),
            age: Some("999".to_string()),
            birth_year: Some("1850".to_string()),
            birth_date: Some("1850".to_string()),
            birth_place_original: Some("Inverness".to_string()),
            ..FsHouseholdMember::default()
        };
        let summary = summarize_member(&raw);
        assert_eq!(summary.relationship, None);
        assert_eq!(summary.age, None);
        assert_eq!(summary.birth_date, None);
        assert_eq!(summary.birth_place.as_deref(), Some("Inverness"));
    }

    #[test]
    fn closed_rows_carry_nothing_else() {
        let raw = FsHouseholdMember {
            is_closed: true,
            full_name: Some("Hidden".to_string()),
            ..FsHouseholdMember::default()
        };
        let summary = summarize_member(&raw);
        assert!(summary.is_closed);
        assert_eq!(summary.name, None);
    }

    #[test]
    fn household_without_headings_is_ignored() {
        let household = FsHousehold {
            headings: None,
            members: Some(vec![member("Ann", "Head", "Female")]),
        };
        assert!(expand_household(&household).is_none());
    }

    #[test]
    fn child_gets_both_parents() {
        let mut selected = member("Jane Smith", "Daughter", "Female");
        selected.is_selected = true;
        let household = FsHousehold {
            headings: Some(vec!["Name".to_string()]),
            members: Some(vec![
                member("John Smith", "Head", "Male"),
                member("Mary Smith", "Wife", "Female"),
                selected,
            ]),
        };
        let summary = expand_household(&household).unwrap();
        let mut record = CanonicalRecord {
            household_array: summary.members,
            ..CanonicalRecord::default()
        };
        infer_relatives(&mut record);
        assert_eq!(
            record.parents.father.as_ref().and_then(NameValue::name),
            Some("John Smith")
        );
        assert_eq!(
            record.parents.mother.as_ref().and_then(NameValue::name),
            Some("Mary Smith")
        );
        assert!(record.spouses.is_empty());
    }
}
