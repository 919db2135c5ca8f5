use proptest::prelude::*;
use sourcer_core::expand_household;
use sourcer_model::{FsHousehold, FsHouseholdMember};

fn optional(value: &'static str) -> impl Strategy<Value = Option<String>> {
    prop::option::of(Just(value.to_string()))
}

fn member_strategy() -> impl Strategy<Value = FsHouseholdMember> {
    (
        optional("Ann Fraser"),
        optional("Daughter"),
        optional("Single"),
        optional("Female"),
        optional("12"),
        optional("Scholar"),
        optional("Inverness, Scotland"),
        any::<bool>(),
    )
        .prop_map(
            |(full_name, relationship, marital_status, gender, age, occupation, birth_place, is_closed)| {
                FsHouseholdMember {
                    is_closed,
                    full_name,
                    relationship,
                    marital_status,
                    gender,
                    age,
                    occupation,
                    birth_place,
                    ..FsHouseholdMember::default()
                }
            },
        )
}

fn household(members: Vec<FsHouseholdMember>) -> FsHousehold {
    FsHousehold {
        headings: Some(vec!["Name".to_string()]),
        members: Some(members),
    }
}

proptest! {
    #[test]
    fn field_union_ignores_row_order(members in prop::collection::vec(member_strategy(), 1..6)) {
        let forward = expand_household(&household(members.clone())).unwrap();
        let mut reversed_rows = members;
        reversed_rows.reverse();
        let reversed = expand_household(&household(reversed_rows)).unwrap();

        prop_assert_eq!(&forward.fields, &reversed.fields);
        prop_assert_eq!(forward.members.len(), reversed.members.len());
    }

    #[test]
    fn every_field_is_populated_somewhere(members in prop::collection::vec(member_strategy(), 1..6)) {
        let summary = expand_household(&household(members)).unwrap();
        for field in &summary.fields {
            prop_assert!(summary.members.iter().any(|member| member.has_field(*field)));
        }
    }
}

#[test]
fn closed_rows_contribute_no_fields() {
    let closed = FsHouseholdMember {
        is_closed: true,
        full_name: Some("Hidden".to_string()),
        age: Some("30".to_string()),
        ..FsHouseholdMember::default()
    };
    let summary = expand_household(&household(vec![closed])).unwrap();
    assert!(summary.fields.is_empty());
    assert!(summary.members[0].is_closed);
}
