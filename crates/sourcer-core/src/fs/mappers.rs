//! Per-kind field mapping for FamilySearch records.
//!
//! Every record kind maps to one [`FsMapper`]. Kinds without a dedicated
//! entry use [`map_default`], which only carries age and occupation.

use sourcer_model::{
    DateQualifier, FsExtractedData, FsPersonName, FsSpouse, NameValue, PlaceValue, RecordType,
    Role, Spouse,
};
use sourcer_normalization::{clean_age, clean_occupation, select_date, select_place};

use super::classify::Classification;
use crate::builder::{RecordBuilder, date_value};

pub type FsMapper = fn(&FsExtractedData, &Classification, &mut RecordBuilder);

static MAPPERS: &[(RecordType, FsMapper)] = &[
    (RecordType::Baptism, map_birth_or_death),
    (RecordType::Birth, map_birth_or_death),
    (RecordType::BirthRegistration, map_birth_or_death),
    (RecordType::BirthOrBaptism, map_birth_or_death),
    (RecordType::Death, map_birth_or_death),
    (RecordType::DeathRegistration, map_birth_or_death),
    (RecordType::Marriage, map_marriage),
    (RecordType::MarriageRegistration, map_marriage_registration),
];

/// The mapper registered for a record kind, else [`map_default`].
pub fn mapper_for(record_type: RecordType) -> FsMapper {
    MAPPERS
        .iter()
        .find(|(kind, _)| *kind == record_type)
        .map_or(map_default as FsMapper, |(_, mapper)| *mapper)
}

fn person_name(person: &FsPersonName) -> Option<NameValue> {
    let mut name = NameValue::default();
    if let Some(full) = person.full_name.as_deref() {
        name = name.with_full_name(full);
    }
    if let Some(given) = person.given_name.as_deref() {
        name = name.with_forenames(given);
    }
    if let Some(surname) = person.surname.as_deref() {
        name = name.with_last_name(surname);
    }
    if let Some(prefix) = person.prefix.as_deref() {
        name = name.with_prefix(prefix);
    }
    if let Some(suffix) = person.suffix.as_deref() {
        name = name.with_suffix(suffix);
    }
    name.non_empty()
}

fn apply_age_and_occupation(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let is_death = builder
        .record()
        .record_type
        .is_some_and(|record_type| record_type.is_death());
    let record = builder.record_mut();
    if let Some(age) = data.age.as_deref().and_then(clean_age) {
        if is_death {
            record.age_at_death = Some(age);
        } else {
            record.age_at_event = Some(age);
        }
    }
    if let Some(occupation) = data.record_value("Occupation").and_then(clean_occupation) {
        record.occupation = Some(occupation);
    }
}

fn apply_parents(data: &FsExtractedData, builder: &mut RecordBuilder) {
    let record = builder.record_mut();
    record.parents.father = data.father.as_ref().and_then(person_name);
    record.parents.mother = data.mother.as_ref().and_then(person_name);
}

fn spouse_name(data: &FsExtractedData) -> Option<NameValue> {
    person_name(&FsPersonName {
        full_name: data.spouse_full_name.clone(),
        given_name: data.spouse_given_name.clone(),
        surname: data.spouse_surname.clone(),
        prefix: data.spouse_prefix.clone(),
        suffix: data.spouse_suffix.clone(),
    })
}

fn related_spouse_name(data: &FsExtractedData) -> Option<NameValue> {
    person_name(&FsPersonName {
        full_name: data.related_person_spouse_full_name.clone(),
        given_name: data.related_person_spouse_given_name.clone(),
        surname: data.related_person_spouse_surname.clone(),
        prefix: None,
        suffix: None,
    })
}

fn spouse_age(data: &FsExtractedData) -> Option<String> {
    data.spouse_age.as_deref().and_then(clean_age)
}

pub fn map_default(data: &FsExtractedData, _: &Classification, builder: &mut RecordBuilder) {
    apply_age_and_occupation(data, builder);
}

fn map_birth_or_death(
    data: &FsExtractedData,
    classification: &Classification,
    builder: &mut RecordBuilder,
) {
    apply_age_and_occupation(data, builder);
    if classification.role == Some(Role::Parent) {
        return;
    }
    apply_parents(data, builder);
    if let Some(name) = spouse_name(data) {
        builder.record_mut().spouses.push(Spouse {
            name: Some(name),
            age: spouse_age(data),
            ..Spouse::default()
        });
    }
}

/// The one spouse of a marriage: defaults to the event, explicit marriage
/// fields win. The spouse may be unnamed.
fn marriage_spouse(data: &FsExtractedData, name: Option<NameValue>, builder: &mut RecordBuilder) {
    let record = builder.record_mut();
    let mut spouse = Spouse {
        name,
        marriage_date: record.event_date.clone(),
        marriage_place: record.event_place.clone(),
        age: spouse_age(data),
    };

    let date = select_date(
        data.record_value("Marriage Date"),
        data.record_value("Marriage Date (Original)"),
    );
    let year = data.record_value("Marriage Year");
    if let Some(marriage_date) = date_value(date.as_deref(), year) {
        record.marriage_date = marriage_date.display().map(str::to_string);
        spouse.marriage_date = Some(marriage_date);
    }
    if spouse != Spouse::default() {
        record.spouses.push(spouse);
    }
}

fn map_marriage(data: &FsExtractedData, classification: &Classification, builder: &mut RecordBuilder) {
    apply_age_and_occupation(data, builder);
    if classification.role != Some(Role::Parent) {
        apply_parents(data, builder);
    }
    let name = spouse_name(data).or_else(|| related_spouse_name(data));
    marriage_spouse(data, name, builder);
}

/// Registration indexes often give the spouse's surname alone; the full
/// name then appears as another name on the page.
fn registration_spouse_name(data: &FsExtractedData) -> Option<NameValue> {
    let name = spouse_name(data).or_else(|| related_spouse_name(data))?;
    let (Some(full), Some(surname)) = (
        data.spouse_full_name.as_deref().map(str::trim),
        data.spouse_surname.as_deref().map(str::trim),
    ) else {
        return Some(name);
    };
    if full != surname || data.record_value("Other On Page Name2").is_some() {
        return Some(name);
    }
    let Some(other) = data.record_value("Other On Page Name1") else {
        return Some(name);
    };
    let same_surname = data
        .record_value("Other On Page Name Surn1")
        .is_some_and(|other_surname| other_surname.trim().eq_ignore_ascii_case(surname));
    if same_surname || other.trim().ends_with(surname) {
        return Some(name.with_full_name(other));
    }
    Some(name)
}

fn map_marriage_registration(
    data: &FsExtractedData,
    _: &Classification,
    builder: &mut RecordBuilder,
) {
    apply_age_and_occupation(data, builder);
    marriage_spouse(data, registration_spouse_name(data), builder);
}

fn profile_spouse(spouse: &FsSpouse) -> Option<Spouse> {
    let name = person_name(&FsPersonName {
        full_name: spouse.full_name.clone(),
        given_name: spouse.given_name.clone(),
        surname: spouse.surname.clone(),
        prefix: spouse.prefix.clone(),
        suffix: spouse.suffix.clone(),
    });
    let date = select_date(
        spouse.marriage_date.as_deref(),
        spouse.marriage_date_original.as_deref(),
    );
    let place = select_place(
        spouse.marriage_place.as_deref(),
        spouse.marriage_place_original.as_deref(),
    );
    let mapped = Spouse {
        name,
        marriage_date: date_value(date.as_deref(), None),
        marriage_place: place.as_deref().and_then(PlaceValue::from_place_string),
        age: None,
    };
    if mapped == Spouse::default() {
        None
    } else {
        Some(mapped)
    }
}

/// Mapping for person profile pages.
///
/// Profiles keep the full name as entered, nickname quotes included. A
/// missing birth or death falls back to baptism or burial, qualified
/// `Before`.
pub fn map_profile(data: &FsExtractedData, builder: &mut RecordBuilder) {
    if let Some(full) = data.full_name.as_deref()
        && let Some(nicknamed) = NameValue::from_full_name(full)
        && let Some(nicknames) = nicknamed.nicknames()
    {
        let name = builder
            .record_mut()
            .name
            .take()
            .unwrap_or_default()
            .with_name(full)
            .with_nicknames(nicknames);
        builder.set_name(Some(name));
    }

    let record = builder.record_mut();
    if record.birth_date.is_none() {
        let baptism = select_date(
            data.baptism_date.as_deref(),
            data.baptism_date_original.as_deref(),
        );
        if let Some(date) = date_value(baptism.as_deref(), data.baptism_year.as_deref()) {
            record.birth_date = Some(date.with_qualifier(DateQualifier::Before));
            if record.birth_place.is_none() {
                record.birth_place = select_place(
                    data.baptism_place.as_deref(),
                    data.baptism_place_original.as_deref(),
                )
                .as_deref()
                .and_then(PlaceValue::from_place_string);
            }
        }
    }
    if record.death_date.is_none() {
        let burial = select_date(
            data.burial_date.as_deref(),
            data.burial_date_original.as_deref(),
        );
        if let Some(date) = date_value(burial.as_deref(), data.burial_year.as_deref()) {
            record.death_date = Some(date.with_qualifier(DateQualifier::Before));
            if record.death_place.is_none() {
                record.death_place = select_place(
                    data.burial_place.as_deref(),
                    data.burial_place_original.as_deref(),
                )
                .as_deref()
                .and_then(PlaceValue::from_place_string);
            }
        }
    }

    if let Some(spouses) = &data.spouses {
        record.spouses = spouses.iter().filter_map(profile_spouse).collect();
    }
    record.parents.father = data.father.as_ref().and_then(person_name);
    record.parents.mother = data.mother.as_ref().and_then(person_name);
}
