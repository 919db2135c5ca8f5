//! Data model for the record generalization pipeline.
//!
//! - [`raw`]: serde views of provider extraction payloads
//! - [`record`]: the canonical, provider-agnostic record
//! - [`record_type`]: record kind taxonomy, subtypes and roles
//! - [`values`]: immutable name, date and place value objects
//! - [`household`]: household table member summaries

pub mod household;
pub mod raw;
pub mod record;
pub mod record_type;
pub mod values;

pub use household::{HouseholdField, HouseholdMember};
pub use raw::{
    ExtractedRecord, FsExtractedData, FsHousehold, FsHouseholdMember, FsPersonName,
    FsReferenceData, FsSpouse, RecordData, ScotpExtractedData,
};
pub use record::{CanonicalRecord, Parents, Spouse, collection_keys};
pub use record_type::{RecordSubtype, RecordType, Role, SourceType};
pub use values::{
    DateQualifier, DateValue, Gender, MaritalStatus, NameValue, PlaceValue, extract_year_string,
};
