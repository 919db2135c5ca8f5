//! FamilySearch generalization.

pub mod classify;
pub mod mappers;

use sourcer_model::{
    CanonicalRecord, FsExtractedData, NameValue, PlaceValue, RecordType, SourceType,
    collection_keys,
};
use sourcer_normalization::{
    join_place_parts, non_empty, quarter_from_label, select_date, select_place,
    standardize_marital_status, standardize_relationship_to_head,
};
use tracing::{debug, warn};

pub use classify::{Classification, classify, classify_record_type};

use crate::builder::RecordBuilder;
use crate::household::{apply_years_married, expand_household, infer_relatives, selected_raw_member};

pub const PROVIDER: &str = "fs";

/// Collections whose event place is really the subject's residence.
const RESIDENCE_COLLECTIONS: &[&str] = &["United States Social Security Death Index"];

/// Convert FamilySearch extracted data into a canonical record.
pub fn generalize(data: &FsExtractedData) -> CanonicalRecord {
    let mut builder = RecordBuilder::new(PROVIDER);
    if !data.success {
        debug!("extraction failed, record left invalid");
        return builder.into_incomplete();
    }

    let classification = match data.page_type.as_deref() {
        Some("book") => {
            builder.record_mut().source_type = Some(SourceType::Book);
            return builder.finish();
        }
        Some("person") => {
            let record = builder.record_mut();
            record.source_type = Some(SourceType::Profile);
            record.record_type = Some(RecordType::Unclassified);
            None
        }
        _ => {
            let classification = classify(data);
            let record = builder.record_mut();
            record.source_type = Some(SourceType::Record);
            record.record_type = Some(classification.record_type);
            record.role = classification.role;
            record.primary_person = classification.role_subject_name.clone();
            record.primary_person_gender = classification.role_subject_gender;
            Some(classification)
        }
    };

    apply_identity(data, &mut builder);
    apply_event_place(data, &mut builder);
    apply_registration(data, &mut builder);

    match &classification {
        Some(classification) => {
            debug!(record_type = %classification.record_type, "dispatching record mapper");
            mappers::mapper_for(classification.record_type)(data, classification, &mut builder);
        }
        None => mappers::map_profile(data, &mut builder),
    }

    apply_household(data, &mut builder);
    apply_collection(data, &mut builder);
    builder.finish()
}

fn apply_identity(data: &FsExtractedData, builder: &mut RecordBuilder) {
    builder.set_gender(data.gender.as_deref());

    let mut name = NameValue::default();
    if let Some(full) = data.full_name.as_deref() {
        name = name.with_full_name(full);
    }
    if let Some(given) = data.given_name.as_deref() {
        name = name.with_forenames(given);
    }
    if let Some(surname) = data.surname.as_deref() {
        name = name.with_last_name(surname);
    }
    if let Some(prefix) = data.prefix.as_deref() {
        name = name.with_prefix(prefix);
    }
    if let Some(suffix) = data.suffix.as_deref() {
        name = name.with_suffix(suffix);
    }
    builder.set_name(Some(name));

    let birth = select_date(
        data.birth_date.as_deref(),
        data.birth_date_original.as_deref(),
    );
    builder.set_birth_date(birth.as_deref(), data.birth_year.as_deref());
    let death = select_date(
        data.death_date.as_deref(),
        data.death_date_original.as_deref(),
    );
    builder.set_death_date(death.as_deref(), data.death_year.as_deref());
    let event = select_date(
        data.event_date.as_deref(),
        data.event_date_original.as_deref(),
    );
    builder.set_event_date(event.as_deref(), data.event_year.as_deref());

    let birth_place = select_place(
        data.birth_place.as_deref(),
        data.birth_place_original.as_deref(),
    );
    builder.set_birth_place(birth_place.as_deref());
    let death_place = select_place(
        data.death_place.as_deref(),
        data.death_place_original.as_deref(),
    );
    builder.set_death_place(death_place.as_deref());
}

fn apply_event_place(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let place_string = select_place(
        data.event_place.as_deref(),
        data.event_place_original.as_deref(),
    )
    .or_else(|| {
        join_place_parts([
            data.event_city.as_deref(),
            data.event_county.as_deref(),
            data.event_state.as_deref(),
            data.event_country.as_deref(),
        ])
    });
    let Some(mut place) = place_string.as_deref().and_then(PlaceValue::from_place_string) else {
        return;
    };

    let residence = data
        .residence
        .as_deref()
        .and_then(non_empty)
        .or_else(|| data.record_value("Note Res Place").and_then(non_empty));
    if let Some(residence) = residence {
        place = place.with_street_address(&residence);
    }

    let moves_to_residence = data
        .collection_title
        .as_deref()
        .is_some_and(|title| RESIDENCE_COLLECTIONS.contains(&title.trim()));
    if moves_to_residence {
        builder.record_mut().residence_place = Some(place);
    } else {
        builder.set_event_place(Some(place));
    }
}

fn apply_registration(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let record = builder.record_mut();
    record.registration_district = data.registration_district.as_deref().and_then(non_empty);
    if let Some(label) = data.registration_quarter.as_deref().and_then(non_empty) {
        match quarter_from_label(&label) {
            Some(quarter) => record.event_quarter = Some(quarter),
            None => warn!(label = %label, "unmapped registration quarter dropped"),
        }
    }
}

fn apply_household(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let record = builder.record_mut();
    let household = data
        .household
        .as_ref()
        .filter(|household| household.members.as_ref().is_some_and(|rows| !rows.is_empty()));
    if let Some(household) = household {
        if let Some(summary) = expand_household(household) {
            record.household_array = summary.members;
            record.household_array_fields = summary.fields;
        }
        if let Some(selected) = selected_raw_member(household) {
            record.marital_status = selected
                .marital_status
                .as_deref()
                .and_then(standardize_marital_status);
            record.relationship_to_head = selected
                .relationship
                .as_deref()
                .and_then(standardize_relationship_to_head);
        }
    }

    if record.marital_status.is_none() {
        record.marital_status = data
            .record_value("MaritalStatus")
            .and_then(standardize_marital_status);
    }

    // Relatives and the years-married estimate come from household rows only.
    if household.is_none() {
        return;
    }
    infer_relatives(record);
    if let Some(years) = data.record_value("Cnt Years Married") {
        apply_years_married(record, years);
    }
}

fn apply_collection(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let Some(collection_id) = data.fs_collection_id.as_deref().and_then(non_empty) else {
        return;
    };
    let collection = &mut builder.record_mut().collection_data;
    collection.insert(collection_keys::ID.to_string(), collection_id);

    let Some(reference) = &data.reference_data else {
        return;
    };
    let mut insert = |key: &str, value: Option<&str>| {
        if let Some(value) = value.and_then(non_empty) {
            collection.insert(key.to_string(), value);
        }
    };
    insert(collection_keys::VOLUME, reference.source_volume.as_deref());
    insert(collection_keys::PAGE, reference.source_page_nbr.as_deref());
    insert(
        collection_keys::SCHEDULE,
        reference.source_schedule_type.as_deref(),
    );

    if let Some(piece_folio) = reference.source_piece_folio.as_deref() {
        match piece_folio.split_once('/') {
            Some((piece, folio)) => {
                insert(collection_keys::PIECE, Some(piece));
                insert(collection_keys::FOLIO, Some(folio));
            }
            None => insert(collection_keys::FOLIO, Some(piece_folio)),
        }
    }
}
