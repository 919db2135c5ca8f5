use sourcer_model::{
    CanonicalRecord, DateQualifier, DateValue, ExtractedRecord, FsExtractedData, Gender,
    HouseholdField, NameValue, PlaceValue, RecordType, SourceType, Spouse, collection_keys,
};

#[test]
fn canonical_record_serializes_camel_case() {
    let mut record = CanonicalRecord::for_provider("fs");
    record.source_type = Some(SourceType::Record);
    record.record_type = Some(RecordType::BirthRegistration);
    record.person_gender = Some(Gender::Female);
    record.name = NameValue::from_full_name("Mary Fraser");
    record.event_date = DateValue::from_date_string("abt 1865");
    record.event_quarter = Some(3);
    record.household_array_fields = vec![HouseholdField::Name, HouseholdField::BirthPlace];
    record
        .collection_data
        .insert(collection_keys::PIECE.to_string(), "1234".to_string());
    record.has_valid_data = true;

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["sourceType"], "record");
    assert_eq!(json["recordType"], "BirthRegistration");
    assert_eq!(json["personGender"], "female");
    assert_eq!(json["name"]["name"], "Mary Fraser");
    assert_eq!(json["eventDate"]["dateString"], "1865");
    assert_eq!(json["eventDate"]["qualifier"], "About");
    assert_eq!(json["eventQuarter"], 3);
    assert_eq!(
        json["householdArrayFields"],
        serde_json::json!(["name", "birthPlace"])
    );
    assert_eq!(json["collectionData"]["piece"], "1234");
    assert!(json.get("spouses").is_none());
    assert!(json.get("parents").is_none());
}

#[test]
fn canonical_record_round_trips_through_json() {
    let mut record = CanonicalRecord::for_provider("scotp");
    record.record_type = Some(RecordType::Marriage);
    record.spouses.push(Spouse {
        name: NameValue::from_full_name("John Smith"),
        marriage_date: DateValue::from_date_string("3 June 1870"),
        marriage_place: PlaceValue::from_place_string("Dunoon, Argyll, Scotland"),
        age: None,
    });
    record.has_valid_data = true;

    let text = serde_json::to_string(&record).unwrap();
    let back: CanonicalRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
}

#[test]
fn envelope_carries_untyped_payload() {
    let envelope: ExtractedRecord = serde_json::from_str(
        r#"{"provider":"fs","extractedData":{"pageType":"book","success":true}}"#,
    )
    .unwrap();
    assert_eq!(envelope.provider, "fs");
    let data: FsExtractedData = serde_json::from_value(envelope.extracted_data).unwrap();
    assert_eq!(data.page_type.as_deref(), Some("book"));
}

#[test]
fn exact_qualifier_is_not_serialized() {
    let date = DateValue::from_date_string("12 May 1901")
        .unwrap()
        .with_qualifier(DateQualifier::Exact);
    let json = serde_json::to_value(&date).unwrap();
    assert_eq!(json, serde_json::json!({ "dateString": "12 May 1901" }));
}
