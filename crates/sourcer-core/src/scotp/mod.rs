//! ScotlandsPeople generalization.
//!
//! Records are dispatched on the provider's record-type code. Places are
//! resolved against the reference tables passed in by the caller.

pub mod mappers;
pub mod parents;
pub mod place;
pub mod record_type;
pub mod wills;

use sourcer_model::{
    CanonicalRecord, NameValue, ScotpExtractedData, SourceType, collection_keys,
};
use sourcer_normalization::{is_dash_placeholder, standardize_name};
use sourcer_reference::ReferenceLookup;
use tracing::{debug, warn};

pub use place::{CourtPlace, PlaceResolver};
pub use record_type::{ScotpTypeInfo, known_codes, resolve_record_type, type_info};

use crate::builder::RecordBuilder;

pub const PROVIDER: &str = "scotp";

/// The LDS transcription only covers the 1881 census.
const LDS_CENSUS_COLLECTION: &str = "census1881";

/// Convert ScotlandsPeople extracted data into a canonical record.
pub fn generalize(data: &ScotpExtractedData, lookup: &dyn ReferenceLookup) -> CanonicalRecord {
    let mut builder = RecordBuilder::new(PROVIDER);
    if !data.success {
        debug!("extraction failed, record left invalid");
        return builder.into_incomplete();
    }
    let Some(code) = data.record_type.as_deref() else {
        debug!("no record type code, record left invalid");
        return builder.into_incomplete();
    };
    let Some(info) = type_info(code) else {
        warn!(code, "unknown record type code, record left invalid");
        return builder.into_incomplete();
    };

    let record_type = resolve_record_type(info, data);
    {
        let record = builder.record_mut();
        record.source_type = Some(SourceType::Record);
        record.record_type = Some(record_type);
    }
    debug!(code = info.code, record_type = %record_type, "dispatching record mapper");

    builder.set_name(subject_name(info.code, data));
    if let Some(key) = info.gender_key {
        builder.set_gender(data.record_value(key));
    }

    let places = PlaceResolver::new(data, info, lookup);
    (info.mapper)(data, &places, &mut builder);

    apply_census_collection(info, data, &mut builder);
    builder.finish()
}

fn subject_name(code: &str, data: &ScotpExtractedData) -> Option<NameValue> {
    if code == "coa" {
        let full = data.record_value("Full Name").map(standardize_name)?;
        if is_dash_placeholder(&full) {
            return None;
        }
        return NameValue::default().with_name(&full).non_empty();
    }

    let surname = data.record_value("Surname").map(standardize_name);
    let forenames = data
        .first_record_value(&["Forename", "Forenames"])
        .map(standardize_name)
        .filter(|forenames| !is_dash_placeholder(forenames));

    let mut name = NameValue::default();
    if let Some(forenames) = forenames.as_deref() {
        name = name.with_forenames(forenames);
    }
    if let Some(surname) = surname.as_deref() {
        name = name.with_last_name(surname);
    }
    name.non_empty()
}

/// Census collection id and the archive reference split into its parts.
///
/// `685/1 12/ 3` gives registration number `685/1`, enumeration district
/// `12` and page `3`.
fn apply_census_collection(
    info: &ScotpTypeInfo,
    data: &ScotpExtractedData,
    builder: &mut RecordBuilder,
) {
    let collection_id = match info.code {
        "census_lds" => Some(LDS_CENSUS_COLLECTION.to_string()),
        "census" => builder
            .record()
            .infer_event_year()
            .map(|year| format!("census{year}")),
        _ => None,
    };
    let Some(collection_id) = collection_id else {
        return;
    };

    let collection = &mut builder.record_mut().collection_data;
    collection.insert(collection_keys::ID.to_string(), collection_id);

    let Some(reference) = info.ref_key.and_then(|key| data.record_value(key)) else {
        return;
    };
    let (registration, remainder) = match reference.split_once(' ') {
        Some((registration, remainder)) => (registration, remainder.trim()),
        None => (reference, ""),
    };
    let (district, page) = match remainder.split_once(' ') {
        Some((district, page)) => (district, page.trim()),
        None => (remainder, ""),
    };

    let mut insert = |key: &str, value: &str| {
        let value = value.trim().trim_end_matches('/');
        if !value.is_empty() {
            collection.insert(key.to_string(), value.to_string());
        }
    };
    insert(collection_keys::REGISTRATION_NUMBER, registration);
    insert(collection_keys::ENUMERATION_DISTRICT, district);
    if !page.is_empty() {
        collection.insert(collection_keys::PAGE.to_string(), page.to_string());
    }
}
