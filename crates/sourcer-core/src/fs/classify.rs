//! FamilySearch record type classification.
//!
//! Classification runs an ordered chain of strategies and stops at the
//! first one that produces a record type. Fact-type entries may refine
//! their default kind through collection-title and record-data overrides,
//! checked in that order; the first matching override wins.

use sourcer_model::{FsExtractedData, Gender, RecordType, Role};
use sourcer_normalization::standardize_gender;
use tracing::debug;

/// Reclassify when any listed substring occurs in the source title.
struct TitleOverride {
    record_type: RecordType,
    matches: &'static [&'static str],
}

/// Reclassify when any listed key is present in `recordData`.
struct RecordDataOverride {
    record_type: RecordType,
    keys: &'static [&'static str],
}

struct FactTypeEntry {
    fact_type: &'static str,
    default: RecordType,
    title_overrides: &'static [TitleOverride],
    record_data_overrides: &'static [RecordDataOverride],
}

const fn entry(fact_type: &'static str, default: RecordType) -> FactTypeEntry {
    FactTypeEntry {
        fact_type,
        default,
        title_overrides: &[],
        record_data_overrides: &[],
    }
}

static FACT_TYPES: &[FactTypeEntry] = &[
    FactTypeEntry {
        fact_type: "Birth",
        default: RecordType::Birth,
        title_overrides: &[TitleOverride {
            record_type: RecordType::BirthRegistration,
            matches: &[
                "England and Wales Birth Registration Index",
                "New Zealand, Civil Records Indexes",
            ],
        }],
        record_data_overrides: &[
            RecordDataOverride {
                record_type: RecordType::BirthRegistration,
                keys: &["Registration Number"],
            },
            RecordDataOverride {
                record_type: RecordType::BirthRegistration,
                keys: &["Baptism Date", "Christening Date"],
            },
        ],
    },
    FactTypeEntry {
        fact_type: "Death",
        default: RecordType::Death,
        title_overrides: &[TitleOverride {
            record_type: RecordType::DeathRegistration,
            matches: &["England and Wales Death Registration Index"],
        }],
        record_data_overrides: &[],
    },
    entry("BirthRegistration", RecordType::BirthRegistration),
    entry("MarriageRegistration", RecordType::MarriageRegistration),
    entry("DeathRegistration", RecordType::DeathRegistration),
    FactTypeEntry {
        fact_type: "Marriage",
        default: RecordType::Marriage,
        title_overrides: &[TitleOverride {
            record_type: RecordType::MarriageRegistration,
            matches: &["England and Wales Marriage Registration Index"],
        }],
        record_data_overrides: &[],
    },
    entry("MarriageNotice", RecordType::Marriage),
    entry("MarriageLicense", RecordType::Marriage),
    entry("MarriageBanns", RecordType::Marriage),
    entry("Divorce", RecordType::Divorce),
    entry("Census", RecordType::Census),
    FactTypeEntry {
        fact_type: "Residence",
        default: RecordType::Residence,
        title_overrides: &[
            TitleOverride {
                record_type: RecordType::LandTax,
                matches: &["Land Tax"],
            },
            TitleOverride {
                record_type: RecordType::SchoolRecords,
                matches: &["School Records"],
            },
            TitleOverride {
                record_type: RecordType::Census,
                matches: &["Census"],
            },
        ],
        record_data_overrides: &[],
    },
    entry("EducationEnrollment", RecordType::SchoolRecords),
    entry("Baptism", RecordType::Baptism),
    entry("Christening", RecordType::Baptism),
    entry("Burial", RecordType::Burial),
    entry("Probate", RecordType::Probate),
    entry("Obituary", RecordType::Obituary),
    FactTypeEntry {
        fact_type: "Immigration",
        default: RecordType::Immigration,
        title_overrides: &[TitleOverride {
            record_type: RecordType::PassengerList,
            matches: &["Passenger List"],
        }],
        record_data_overrides: &[],
    },
    entry("Naturalization", RecordType::Naturalization),
    entry("MilitaryService", RecordType::Military),
    entry("MilitaryDraftRegistration", RecordType::Military),
    entry("VoterRegistration", RecordType::ElectoralRegister),
    entry("TaxAssessment", RecordType::Tax),
    entry("Pension", RecordType::Pension),
    entry("PassportApplication", RecordType::PassportApplication),
    FactTypeEntry {
        fact_type: "SocialProgramCorrespondence",
        default: RecordType::Birth,
        title_overrides: &[],
        record_data_overrides: &[RecordDataOverride {
            record_type: RecordType::Death,
            keys: &["Death Date"],
        }],
    },
];

/// `recordData["Source Record Type"]` values.
static SOURCE_RECORD_TYPES: &[FactTypeEntry] = &[entry("Marriages", RecordType::Marriage)];

/// Result of classifying a FamilySearch record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub record_type: RecordType,
    pub role: Option<Role>,
    /// Name of the person the role is relative to.
    pub role_subject_name: Option<String>,
    pub role_subject_gender: Option<Gender>,
}

fn lookup(table: &[FactTypeEntry], fact_type: &str, data: &FsExtractedData) -> Option<RecordType> {
    let entry = table.iter().find(|entry| entry.fact_type == fact_type)?;

    if let Some(title) = data.source_title_for_person.as_deref() {
        for rule in entry.title_overrides {
            if rule.matches.iter().any(|needle| title.contains(needle)) {
                return Some(rule.record_type);
            }
        }
    }
    for rule in entry.record_data_overrides {
        if rule.keys.iter().any(|key| data.has_record_key(key)) {
            return Some(rule.record_type);
        }
    }
    Some(entry.default)
}

fn by_related_fact_type(data: &FsExtractedData) -> Option<RecordType> {
    lookup(FACT_TYPES, data.related_person_fact_type.as_deref()?, data)
}

fn by_fact_type(data: &FsExtractedData) -> Option<RecordType> {
    lookup(FACT_TYPES, data.fact_type.as_deref()?, data)
}

fn by_source_record_type(data: &FsExtractedData) -> Option<RecordType> {
    lookup(
        SOURCE_RECORD_TYPES,
        data.record_value("Source Record Type")?,
        data,
    )
}

fn by_title(data: &FsExtractedData) -> Option<RecordType> {
    let title = data.source_title_for_person.as_deref()?;
    if title.contains("Census") {
        return Some(RecordType::Census);
    }
    if title.contains("Registration") {
        if title.contains("Birth") {
            return Some(RecordType::BirthRegistration);
        }
        if title.contains("Death") {
            return Some(RecordType::DeathRegistration);
        }
    }
    if title.contains("Marriage") && data.record_value("Marriage Date").is_some() {
        return Some(RecordType::Marriage);
    }
    if title.contains("Criminal Register") {
        return Some(RecordType::CriminalRegister);
    }
    if title.contains("Freemason Membership") {
        return Some(RecordType::FreemasonMembership);
    }
    None
}

type Strategy = fn(&FsExtractedData) -> Option<RecordType>;

/// Classification strategies in priority order.
static STRATEGIES: &[(&str, Strategy)] = &[
    ("related person fact type", by_related_fact_type),
    ("fact type", by_fact_type),
    ("source record type", by_source_record_type),
    ("source title", by_title),
];

/// Determine the record type alone.
pub fn classify_record_type(data: &FsExtractedData) -> RecordType {
    for (name, strategy) in STRATEGIES {
        if let Some(record_type) = strategy(data) {
            debug!(strategy = name, record_type = %record_type, "classified record");
            return record_type;
        }
    }
    RecordType::Unclassified
}

/// Determine record type and, for records about a relative, the role.
pub fn classify(data: &FsExtractedData) -> Classification {
    let mut classification = Classification {
        record_type: classify_record_type(data),
        role: None,
        role_subject_name: None,
        role_subject_gender: None,
    };

    if data.related_person_fact_type.is_some()
        && let Some(relationship) = data.relationship_to_fact_person.as_deref()
    {
        classification.role = match relationship {
            "Parent" => Some(Role::Parent),
            "Child" => Some(Role::Child),
            "Spouse" => Some(Role::Spouse),
            _ => None,
        };
        classification.role_subject_name = data
            .related_person_full_name
            .as_deref()
            .and_then(sourcer_normalization::non_empty);
        classification.role_subject_gender = data
            .related_person_gender
            .as_deref()
            .and_then(standardize_gender);
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcer_model::RecordData;

    fn with_fact(fact_type: &str, title: Option<&str>) -> FsExtractedData {
        FsExtractedData {
            fact_type: Some(fact_type.to_string()),
            source_title_for_person: title.map(str::to_string),
            ..FsExtractedData::default()
        }
    }

    fn record_data(keys: &[(&str, &str)]) -> Option<RecordData> {
        Some(
            keys.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn marriage_registration_title_override() {
        let data = with_fact(
            "Marriage",
            Some("England and Wales Marriage Registration Index, 1837-2005"),
        );
        assert_eq!(classify_record_type(&data), RecordType::MarriageRegistration);
        let plain = with_fact("Marriage", Some("Scotland Marriages, 1561-1910"));
        assert_eq!(classify_record_type(&plain), RecordType::Marriage);
    }

    #[test]
    fn death_registration_title_override() {
        let data = with_fact(
            "Death",
            Some("England and Wales Death Registration Index 1837-2007"),
        );
        assert_eq!(classify_record_type(&data), RecordType::DeathRegistration);
    }

    #[test]
    fn title_override_beats_record_data_override() {
        let mut data = with_fact("Residence", Some("England, Land Tax Records"));
        data.record_data = record_data(&[("Census Year", "1841")]);
        assert_eq!(classify_record_type(&data), RecordType::LandTax);

        let mut birth = with_fact("Birth", Some("Some Parish Register"));
        birth.record_data = record_data(&[("Registration Number", "")]);
        assert_eq!(classify_record_type(&birth), RecordType::BirthRegistration);
    }

    #[test]
    fn related_fact_type_takes_priority() {
        let data = FsExtractedData {
            fact_type: Some("Census".to_string()),
            related_person_fact_type: Some("Birth".to_string()),
            relationship_to_fact_person: Some("Parent".to_string()),
            related_person_full_name: Some("William Smith".to_string()),
            related_person_gender: Some("Male".to_string()),
            ..FsExtractedData::default()
        };
        let classification = classify(&data);
        assert_eq!(classification.record_type, RecordType::Birth);
        assert_eq!(classification.role, Some(Role::Parent));
        assert_eq!(
            classification.role_subject_name.as_deref(),
            Some("William Smith")
        );
        assert_eq!(classification.role_subject_gender, Some(Gender::Male));
    }

    #[test]
    fn unknown_fact_type_falls_through_to_title() {
        let data = with_fact("Unusual", Some("Kent, Criminal Register, 1800"));
        assert_eq!(classify_record_type(&data), RecordType::CriminalRegister);
    }

    #[test]
    fn source_record_type_table() {
        let data = FsExtractedData {
            record_data: record_data(&[("Source Record Type", "Marriages")]),
            ..FsExtractedData::default()
        };
        assert_eq!(classify_record_type(&data), RecordType::Marriage);
    }

    #[test]
    fn marriage_title_needs_marriage_date() {
        let mut data = FsExtractedData {
            source_title_for_person: Some("Ohio, County Marriages".to_string()),
            ..FsExtractedData::default()
        };
        assert_eq!(classify_record_type(&data), RecordType::Unclassified);
        data.record_data = record_data(&[("Marriage Date", "3 May 1860")]);
        assert_eq!(classify_record_type(&data), RecordType::Marriage);
    }

    #[test]
    fn registration_title_heuristics() {
        let data = FsExtractedData {
            source_title_for_person: Some("Civil Registration Birth Index".to_string()),
            ..FsExtractedData::default()
        };
        assert_eq!(classify_record_type(&data), RecordType::BirthRegistration);
    }
}
