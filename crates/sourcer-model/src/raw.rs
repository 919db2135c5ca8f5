//! Serde views of the payloads produced by provider extraction adapters.
//!
//! Every field is optional: adapters omit keys freely and the generalizers
//! presence-check everything they read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_success() -> bool {
    true
}

/// Provider-native field name to string value.
pub type RecordData = BTreeMap<String, String>;

/// Envelope used at the process boundary: provider code plus payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub provider: String,
    pub extracted_data: serde_json::Value,
}

/// A name sub-object (father, mother, spouse) on a FamilySearch page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsPersonName {
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// A spouse entry on a FamilySearch profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsSpouse {
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub marriage_date: Option<String>,
    pub marriage_date_original: Option<String>,
    pub marriage_place: Option<String>,
    pub marriage_place_original: Option<String>,
}

/// One row of a FamilySearch household table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsHouseholdMember {
    pub is_closed: bool,
    pub is_selected: bool,
    pub full_name: Option<String>,
    pub relationship: Option<String>,
    pub marital_status: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub birth_year: Option<String>,
    pub birth_date: Option<String>,
    pub occupation: Option<String>,
    pub birth_place: Option<String>,
    pub birth_place_original: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsHousehold {
    pub headings: Option<Vec<String>>,
    pub members: Option<Vec<FsHouseholdMember>>,
}

/// Source reference fields of a FamilySearch collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsReferenceData {
    pub source_volume: Option<String>,
    pub source_page_nbr: Option<String>,
    pub source_schedule_type: Option<String>,
    pub source_piece_folio: Option<String>,
}

/// Data extracted from a FamilySearch record, profile or book page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FsExtractedData {
    #[serde(default = "default_success")]
    pub success: bool,
    pub page_type: Option<String>,

    pub fact_type: Option<String>,
    pub related_person_fact_type: Option<String>,
    pub relationship_to_fact_person: Option<String>,
    pub related_person_full_name: Option<String>,
    pub related_person_gender: Option<String>,
    pub source_title_for_person: Option<String>,
    pub collection_title: Option<String>,

    pub gender: Option<String>,
    pub full_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,

    pub birth_date: Option<String>,
    pub birth_date_original: Option<String>,
    pub birth_year: Option<String>,
    pub birth_place: Option<String>,
    pub birth_place_original: Option<String>,

    pub death_date: Option<String>,
    pub death_date_original: Option<String>,
    pub death_year: Option<String>,
    pub death_place: Option<String>,
    pub death_place_original: Option<String>,

    pub event_date: Option<String>,
    pub event_date_original: Option<String>,
    pub event_year: Option<String>,
    pub event_place: Option<String>,
    pub event_place_original: Option<String>,
    pub event_city: Option<String>,
    pub event_county: Option<String>,
    pub event_state: Option<String>,
    pub event_country: Option<String>,
    pub residence: Option<String>,

    pub baptism_date: Option<String>,
    pub baptism_date_original: Option<String>,
    pub baptism_year: Option<String>,
    pub baptism_place: Option<String>,
    pub baptism_place_original: Option<String>,
    pub burial_date: Option<String>,
    pub burial_date_original: Option<String>,
    pub burial_year: Option<String>,
    pub burial_place: Option<String>,
    pub burial_place_original: Option<String>,

    pub registration_district: Option<String>,
    pub registration_quarter: Option<String>,
    pub age: Option<String>,

    pub father: Option<FsPersonName>,
    pub mother: Option<FsPersonName>,
    pub spouse_full_name: Option<String>,
    pub spouse_surname: Option<String>,
    pub spouse_given_name: Option<String>,
    pub spouse_prefix: Option<String>,
    pub spouse_suffix: Option<String>,
    pub spouse_age: Option<String>,
    pub related_person_spouse_full_name: Option<String>,
    pub related_person_spouse_surname: Option<String>,
    pub related_person_spouse_given_name: Option<String>,
    pub spouses: Option<Vec<FsSpouse>>,

    pub household: Option<FsHousehold>,
    pub record_data: Option<RecordData>,
    pub fs_collection_id: Option<String>,
    pub reference_data: Option<FsReferenceData>,
}

impl Default for FsExtractedData {
    fn default() -> Self {
        Self {
            success: true,
            page_type: None,
            fact_type: None,
            related_person_fact_type: None,
            relationship_to_fact_person: None,
            related_person_full_name: None,
            related_person_gender: None,
            source_title_for_person: None,
            collection_title: None,
            gender: None,
            full_name: None,
            given_name: None,
            surname: None,
            prefix: None,
            suffix: None,
            birth_date: None,
            birth_date_original: None,
            birth_year: None,
            birth_place: None,
            birth_place_original: None,
            death_date: None,
            death_date_original: None,
            death_year: None,
            death_place: None,
            death_place_original: None,
            event_date: None,
            event_date_original: None,
            event_year: None,
            event_place: None,
            event_place_original: None,
            event_city: None,
            event_county: None,
            event_state: None,
            event_country: None,
            residence: None,
            baptism_date: None,
            baptism_date_original: None,
            baptism_year: None,
            baptism_place: None,
            baptism_place_original: None,
            burial_date: None,
            burial_date_original: None,
            burial_year: None,
            burial_place: None,
            burial_place_original: None,
            registration_district: None,
            registration_quarter: None,
            age: None,
            father: None,
            mother: None,
            spouse_full_name: None,
            spouse_surname: None,
            spouse_given_name: None,
            spouse_prefix: None,
            spouse_suffix: None,
            spouse_age: None,
            related_person_spouse_full_name: None,
            related_person_spouse_surname: None,
            related_person_spouse_given_name: None,
            spouses: None,
            household: None,
            record_data: None,
            fs_collection_id: None,
            reference_data: None,
        }
    }
}

impl FsExtractedData {
    /// Look up a non-empty `recordData` value.
    pub fn record_value(&self, key: &str) -> Option<&str> {
        self.record_data
            .as_ref()
            .and_then(|data| data.get(key))
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// True if `recordData` has the key at all, even with an empty value.
    pub fn has_record_key(&self, key: &str) -> bool {
        self.record_data
            .as_ref()
            .is_some_and(|data| data.contains_key(key))
    }
}

/// Data extracted from a ScotlandsPeople search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScotpExtractedData {
    #[serde(default = "default_success")]
    pub success: bool,
    /// Provider record-type code, e.g. `stat_births` or `opr_marriages`.
    pub record_type: Option<String>,
    pub record_data: RecordData,
    pub search_criteria: RecordData,
}

impl Default for ScotpExtractedData {
    fn default() -> Self {
        Self {
            success: true,
            record_type: None,
            record_data: RecordData::new(),
            search_criteria: RecordData::new(),
        }
    }
}

impl ScotpExtractedData {
    /// Look up a non-empty `recordData` value.
    pub fn record_value(&self, key: &str) -> Option<&str> {
        self.record_data
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// First non-empty value among several alternative keys.
    pub fn first_record_value(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.record_value(key))
    }

    /// Look up a non-empty search criterion.
    pub fn search_value(&self, key: &str) -> Option<&str> {
        self.search_criteria
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_deserialize_to_defaults() {
        let data: FsExtractedData = serde_json::from_str(r#"{"pageType":"record"}"#).unwrap();
        assert!(data.success);
        assert_eq!(data.page_type.as_deref(), Some("record"));
        assert!(data.record_data.is_none());
    }

    #[test]
    fn record_value_ignores_blank_entries() {
        let data: ScotpExtractedData = serde_json::from_str(
            r#"{"recordType":"stat_births","recordData":{"Surname":"FRASER","Forename":" "}}"#,
        )
        .unwrap();
        assert_eq!(data.record_value("Surname"), Some("FRASER"));
        assert_eq!(data.record_value("Forename"), None);
        assert_eq!(
            data.first_record_value(&["Forenames", "Surname"]),
            Some("FRASER")
        );
    }
}
