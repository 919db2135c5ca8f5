//! The canonical record produced by generalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::household::{HouseholdField, HouseholdMember};
use crate::record_type::{RecordSubtype, RecordType, Role, SourceType};
use crate::values::{DateValue, Gender, MaritalStatus, NameValue, PlaceValue};

/// Well-known keys used in [`CanonicalRecord::collection_data`].
pub mod collection_keys {
    pub const ID: &str = "id";
    pub const VOLUME: &str = "volume";
    pub const PAGE: &str = "page";
    pub const SCHEDULE: &str = "schedule";
    pub const PIECE: &str = "piece";
    pub const FOLIO: &str = "folio";
    pub const REGISTRATION_NUMBER: &str = "registrationNumber";
    pub const ENUMERATION_DISTRICT: &str = "enumerationDistrict";
    pub const FRAME_NUMBER: &str = "frameNumber";
    pub const PAGE_NUMBER: &str = "pageNumber";
}

/// A spouse named on the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spouse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<PlaceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

/// Father and mother named on the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<NameValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<NameValue>,
}

impl Parents {
    pub fn is_empty(&self) -> bool {
        self.father.is_none() && self.mother.is_none()
    }
}

/// Provider-agnostic representation of one extracted record.
///
/// Consumers must check [`CanonicalRecord::has_valid_data`] before using any
/// other field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_subtype: Option<RecordSubtype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_person_gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<NameValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    /// Registration quarter, 1 to 4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_quarter: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<PlaceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_place: Option<PlaceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_place: Option<PlaceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_place: Option<PlaceValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<Spouse>,
    #[serde(default, skip_serializing_if = "Parents::is_empty")]
    pub parents: Parents,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub household_array: Vec<HouseholdMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub household_array_fields: Vec<HouseholdField>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub collection_data: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_to_head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_at_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_at_death: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mothers_maiden_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_at_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_at_death: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_of_death: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_regiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testate_or_intestate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_confirmation_granted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_date: Option<String>,

    pub has_valid_data: bool,
}

impl CanonicalRecord {
    /// An empty record tagged with the provider it came from.
    pub fn for_provider(provider: &str) -> Self {
        Self {
            source_of_data: Some(provider.to_string()),
            ..Self::default()
        }
    }

    /// The event year: from the event date, else the first other dated event.
    pub fn infer_event_year(&self) -> Option<String> {
        self.event_date
            .as_ref()
            .and_then(DateValue::year)
            .or_else(|| {
                if self.record_type.is_some_and(|rt| rt.is_death()) {
                    self.death_date.as_ref().and_then(DateValue::year)
                } else {
                    None
                }
            })
    }

    /// The event date display string, else the event year.
    pub fn infer_event_date(&self) -> Option<String> {
        self.event_date
            .as_ref()
            .and_then(|date| date.display().map(str::to_string))
            .or_else(|| self.infer_event_year())
    }

    /// The household member marked as the record subject, if any.
    pub fn selected_household_member(&self) -> Option<&HouseholdMember> {
        self.household_array.iter().find(|member| member.is_selected)
    }
}
