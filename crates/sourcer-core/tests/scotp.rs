use std::sync::Arc;

use sourcer_core::build_registry;
use sourcer_core::scotp::generalize;
use sourcer_model::{
    CanonicalRecord, ExtractedRecord, Gender, NameValue, PlaceValue, RecordSubtype, RecordType,
    ScotpExtractedData,
};
use sourcer_reference::{ReferenceTables, default_reference_root};

fn tables() -> ReferenceTables {
    let (tables, _) =
        ReferenceTables::load(&default_reference_root()).expect("load reference tables");
    tables
}

fn scotp(code: &str, pairs: &[(&str, &str)]) -> ScotpExtractedData {
    ScotpExtractedData {
        record_type: Some(code.to_string()),
        record_data: pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect(),
        ..ScotpExtractedData::default()
    }
}

fn run(data: &ScotpExtractedData) -> CanonicalRecord {
    generalize(data, &tables())
}

fn place_string(place: Option<&PlaceValue>) -> Option<&str> {
    place.and_then(PlaceValue::place_string)
}

#[test]
fn statutory_birth_resolves_district_county() {
    let data = scotp(
        "stat_births",
        &[
            ("Surname", "MACGREGOR"),
            ("Forename", "ROBERT"),
            ("Gender", "M"),
            ("Year", "1881"),
            ("RD Name", "GOVAN"),
            ("Ref", "644/10 123"),
            ("Mother's Maiden Name", "BAIRD"),
        ],
    );
    let record = run(&data);

    assert!(record.has_valid_data);
    assert_eq!(record.record_type, Some(RecordType::BirthRegistration));
    assert_eq!(record.person_gender, Some(Gender::Male));
    let name = record.name.as_ref().expect("name");
    assert_eq!(name.forenames(), Some("Robert"));
    assert_eq!(name.last_name(), Some("MacGregor"));
    assert_eq!(record.last_name_at_birth.as_deref(), Some("MacGregor"));
    assert_eq!(record.mothers_maiden_name.as_deref(), Some("Baird"));
    assert_eq!(record.registration_district.as_deref(), Some("GOVAN"));

    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("Govan, Lanarkshire, Scotland")
    );
    assert_eq!(record.birth_place, record.event_place);
    assert_eq!(
        record.birth_date.as_ref().and_then(|date| date.year_string()),
        Some("1881")
    );
}

#[test]
fn district_county_follows_validity_years() {
    let data = scotp(
        "stat_deaths",
        &[
            ("Surname", "SCOTT"),
            ("Year", "1910"),
            ("RD Name", "EDINBURGH ST GILES"),
            ("Ref", "685/1 77"),
            ("Age at death", "61"),
        ],
    );
    let record = run(&data);
    assert_eq!(
        place_string(record.death_place.as_ref()),
        Some("Edinburgh St Giles, Midlothian, Scotland")
    );
    assert_eq!(record.age_at_death.as_deref(), Some("61"));
    assert_eq!(record.last_name_at_death.as_deref(), Some("Scott"));
}

#[test]
fn unknown_district_falls_back_to_searched_county() {
    let mut data = scotp(
        "stat_births",
        &[("Surname", "WATT"), ("Year", "1890"), ("RD Name", "NOWHERE"), ("Ref", "999/1 4")],
    );
    data.search_criteria
        .insert("County/city".to_string(), "FIFE".to_string());
    let record = run(&data);
    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("Nowhere, Fife, Scotland")
    );
}

#[test]
fn census_reference_is_split_into_collection_data() {
    let data = scotp(
        "census",
        &[
            ("Surname", "SCOTT"),
            ("Forename", "WALTER"),
            ("Year", "1881"),
            ("RD Name", "ST GEORGE"),
            ("County / City", "Edinburgh"),
            ("Ref", "685/1 12/ 3"),
            ("Age at census", "10"),
        ],
    );
    let record = run(&data);

    assert_eq!(record.record_type, Some(RecordType::Census));
    assert_eq!(record.age_at_event.as_deref(), Some("10"));
    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("St George, Midlothian, Scotland")
    );

    let collection = &record.collection_data;
    assert_eq!(collection.get("id").map(String::as_str), Some("census1881"));
    assert_eq!(
        collection.get("registrationNumber").map(String::as_str),
        Some("685/1")
    );
    assert_eq!(
        collection.get("enumerationDistrict").map(String::as_str),
        Some("12")
    );
    assert_eq!(collection.get("page").map(String::as_str), Some("3"));
}

#[test]
fn old_parish_birth_with_parents_and_frame() {
    let data = scotp(
        "opr_births",
        &[
            ("Surname", "SMITH"),
            ("Forename", "ADAM"),
            ("Birth Date", "05/06/1823"),
            ("Parish", "GOVAN"),
            ("Parish Number", "646/"),
            ("Parents/Other details", "JOHN SMITH/MARY BROWN FR400"),
        ],
    );
    let record = run(&data);

    assert_eq!(
        record.event_date.as_ref().and_then(|date| date.date_string()),
        Some("5 June 1823")
    );
    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("Govan, Lanarkshire, Scotland")
    );
    assert_eq!(
        record.parents.father.as_ref().and_then(NameValue::name),
        Some("John Smith")
    );
    assert_eq!(
        record.parents.mother.as_ref().and_then(NameValue::name),
        Some("Mary Brown")
    );
    assert_eq!(
        record.collection_data.get("frameNumber").map(String::as_str),
        Some("400")
    );
}

#[test]
fn catholic_baptism_congregation_is_street_address() {
    let data = scotp(
        "cr_baptisms",
        &[
            ("Surname", "KELLY"),
            ("Baptism Date", "14/02/1870"),
            ("Parish", "Glasgow, St Andrew's Cathedral"),
        ],
    );
    let record = run(&data);
    let place = record.event_place.expect("event place");
    assert_eq!(place.place_string(), Some("Glasgow, Lanarkshire, Scotland"));
    assert_eq!(place.street_address(), Some("St Andrew's Cathedral"));
    assert_eq!(place.county(), Some("Lanarkshire"));
}

#[test]
fn will_entry_gets_court_subtype_and_testacy() {
    let data = scotp(
        "wills",
        &[
            ("Surname", "DOUGLAS"),
            ("Forenames", "JAMES"),
            ("Date", "12/03/1890"),
            ("Court", "Glasgow Sheriff Court Wills"),
            ("Type", "TD&I"),
            ("Description", "Merchant, Glasgow, intestate."),
        ],
    );
    let record = run(&data);

    assert_eq!(record.record_type, Some(RecordType::Will));
    assert_eq!(record.record_subtype, Some(RecordSubtype::Testament));
    assert_eq!(record.testate_or_intestate.as_deref(), Some("intestate"));
    assert_eq!(record.court_name.as_deref(), Some("Glasgow Sheriff Court"));
    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("Glasgow, Lanarkshire, Scotland")
    );
    assert_eq!(
        record.event_date.as_ref().and_then(|date| date.date_string()),
        Some("12 March 1890")
    );
}

#[test]
fn unknown_code_leaves_record_invalid() {
    let record = run(&scotp("stat_adoptions", &[("Surname", "SMITH")]));
    assert!(!record.has_valid_data);
    assert_eq!(record.source_of_data.as_deref(), Some("scotp"));
}

#[test]
fn registry_routes_envelopes_to_providers() {
    let registry = build_registry(Arc::new(tables()));
    let envelope: ExtractedRecord = serde_json::from_value(serde_json::json!({
        "provider": "scotp",
        "extractedData": {
            "recordType": "vr",
            "recordData": { "Surname": "BURNS", "Year": "1855", "Parish": "AYR" }
        }
    }))
    .unwrap();

    let record = registry.generalize(&envelope).unwrap();
    assert_eq!(record.record_type, Some(RecordType::ValuationRoll));
    assert_eq!(
        place_string(record.event_place.as_ref()),
        Some("Ayr, Ayrshire, Scotland")
    );
}

#[test]
fn statutory_marriage_json() {
    let data = scotp(
        "stat_marriages",
        &[
            ("Surname", "BURNS"),
            ("Forename", "ROBERT"),
            ("Gender", "M"),
            ("Year", "1888"),
            ("RD Name", "AYR"),
            ("Ref", "578/12"),
            ("Spouse Surname", "ARMOUR"),
            ("Spouse Forename", "JEAN"),
        ],
    );
    insta::assert_json_snapshot!(run(&data), @r#"
    {
      "sourceOfData": "scotp",
      "sourceType": "record",
      "recordType": "MarriageRegistration",
      "name": {
        "forenames": "Robert",
        "lastName": "Burns"
      },
      "personGender": "male",
      "eventDate": {
        "yearString": "1888"
      },
      "eventPlace": {
        "placeString": "Ayr, Ayrshire, Scotland",
        "county": "Ayrshire",
        "country": "Scotland"
      },
      "spouses": [
        {
          "name": {
            "forenames": "Jean",
            "lastName": "Armour"
          },
          "marriageDate": {
            "yearString": "1888"
          },
          "marriagePlace": {
            "placeString": "Ayr, Ayrshire, Scotland",
            "county": "Ayrshire",
            "country": "Scotland"
          }
        }
      ],
      "registrationDistrict": "AYR",
      "hasValidData": true
    }
    "#);
}
