//! Per-call record builder.
//!
//! A [`RecordBuilder`] owns the record under construction together with
//! collection identifiers discovered while mapping fields. Pending
//! identifiers are merged into `collection_data` only by [`RecordBuilder::finish`],
//! so nothing leaks between calls.

use std::collections::BTreeMap;

use sourcer_model::{CanonicalRecord, DateValue, NameValue, PlaceValue};
use sourcer_normalization::{non_empty, standardize_gender};

/// Build a date from an optional display string and an optional year.
///
/// A year alone yields a year-only date.
pub fn date_value(date: Option<&str>, year: Option<&str>) -> Option<DateValue> {
    match date.and_then(DateValue::from_date_string) {
        Some(value) => Some(match year {
            Some(year) => value.with_year(year),
            None => value,
        }),
        None => year.and_then(DateValue::from_year),
    }
}

/// Replace `slot` only when the new date carries something.
fn merge_date(slot: &mut Option<DateValue>, date: Option<&str>, year: Option<&str>) {
    let merged = match slot.take() {
        Some(existing) => {
            let with_date = match date.and_then(DateValue::from_date_string) {
                Some(value) => match existing.year_string() {
                    Some(old_year) => value.with_year(old_year),
                    None => value,
                },
                None => existing,
            };
            Some(match year {
                Some(year) => with_date.with_year(year),
                None => with_date,
            })
        }
        None => date_value(date, year),
    };
    *slot = merged;
}

#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: CanonicalRecord,
    pending_collection: BTreeMap<String, String>,
}

impl RecordBuilder {
    pub fn new(provider: &str) -> Self {
        Self {
            record: CanonicalRecord::for_provider(provider),
            pending_collection: BTreeMap::new(),
        }
    }

    pub fn record(&self) -> &CanonicalRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut CanonicalRecord {
        &mut self.record
    }

    pub fn set_gender(&mut self, raw: Option<&str>) {
        if let Some(gender) = raw.and_then(standardize_gender) {
            self.record.person_gender = Some(gender);
        }
    }

    pub fn set_name(&mut self, name: Option<NameValue>) {
        if let Some(name) = name.and_then(NameValue::non_empty) {
            self.record.name = Some(name);
        }
    }

    pub fn set_birth_date(&mut self, date: Option<&str>, year: Option<&str>) {
        merge_date(&mut self.record.birth_date, date, year);
    }

    pub fn set_death_date(&mut self, date: Option<&str>, year: Option<&str>) {
        merge_date(&mut self.record.death_date, date, year);
    }

    pub fn set_event_date(&mut self, date: Option<&str>, year: Option<&str>) {
        merge_date(&mut self.record.event_date, date, year);
    }

    pub fn set_birth_place(&mut self, place: Option<&str>) {
        if let Some(place) = place.and_then(PlaceValue::from_place_string) {
            self.record.birth_place = Some(place);
        }
    }

    pub fn set_death_place(&mut self, place: Option<&str>) {
        if let Some(place) = place.and_then(PlaceValue::from_place_string) {
            self.record.death_place = Some(place);
        }
    }

    pub fn set_event_place(&mut self, place: Option<PlaceValue>) {
        self.record.event_place = place.filter(|place| !place.is_empty());
    }

    /// Stash a collection identifier until the record is finished.
    pub fn add_pending_collection(&mut self, key: &str, value: &str) {
        if let Some(value) = non_empty(value) {
            self.pending_collection.insert(key.to_string(), value);
        }
    }

    pub fn pending_collection(&self) -> &BTreeMap<String, String> {
        &self.pending_collection
    }

    /// Merge pending collection data and mark the record valid.
    pub fn finish(mut self) -> CanonicalRecord {
        self.record
            .collection_data
            .append(&mut self.pending_collection);
        self.record.has_valid_data = true;
        self.record
    }

    /// Return the record as it stands, still marked invalid.
    pub fn into_incomplete(self) -> CanonicalRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_value_combines_string_and_year() {
        let date = date_value(Some("3 Mar 1851"), Some("1851")).unwrap();
        assert_eq!(date.date_string(), Some("3 Mar 1851"));
        assert_eq!(date.year_string(), Some("1851"));

        let year_only = date_value(None, Some("1851")).unwrap();
        assert_eq!(year_only.date_string(), None);
        assert_eq!(date_value(Some(" "), None), None);
    }

    #[test]
    fn later_year_keeps_earlier_date_string() {
        let mut builder = RecordBuilder::new("fs");
        builder.set_event_date(Some("6 Jun 1841"), None);
        builder.set_event_date(None, Some("1841"));
        let event = builder.record().event_date.clone().unwrap();
        assert_eq!(event.date_string(), Some("6 Jun 1841"));
        assert_eq!(event.year_string(), Some("1841"));
    }

    #[test]
    fn pending_collection_merges_on_finish() {
        let mut builder = RecordBuilder::new("scotp");
        builder
            .record_mut()
            .collection_data
            .insert("id".to_string(), "census1881".to_string());
        builder.add_pending_collection("frameNumber", "400");
        builder.add_pending_collection("pageNumber", "  ");
        assert_eq!(builder.pending_collection().len(), 1);

        let record = builder.finish();
        assert!(record.has_valid_data);
        assert_eq!(record.collection_data.len(), 2);
        assert_eq!(record.collection_data["frameNumber"], "400");
    }

    #[test]
    fn incomplete_record_stays_invalid() {
        let record = RecordBuilder::new("scotp").into_incomplete();
        assert!(!record.has_valid_data);
        assert_eq!(record.source_of_data.as_deref(), Some("scotp"));
    }
}
