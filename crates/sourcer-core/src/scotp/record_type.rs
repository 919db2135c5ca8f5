//! ScotlandsPeople record-type codes.
//!
//! Each provider code carries the canonical kind, the record keys that hold
//! gender, county and reference values, and the mapper that fills in the
//! rest of the record.

use sourcer_model::{RecordType, ScotpExtractedData};

use super::mappers::{self, ScotpMapper};

const COUNTY_SEARCH: Option<&str> = Some("County/city");
const GENDER: Option<&str> = Some("Gender");

/// Static description of one provider record-type code.
pub struct ScotpTypeInfo {
    pub code: &'static str,
    pub record_type: RecordType,
    /// Record key holding the subject's gender.
    pub gender_key: Option<&'static str>,
    /// Search criterion the user may have filled with a county.
    pub county_search_param: Option<&'static str>,
    /// Record key holding a county in the search result.
    pub county_record_key: Option<&'static str>,
    /// Record key holding the archive reference.
    pub ref_key: Option<&'static str>,
    pub mapper: ScotpMapper,
}

const fn info(
    code: &'static str,
    record_type: RecordType,
    gender_key: Option<&'static str>,
    county_search_param: Option<&'static str>,
    mapper: ScotpMapper,
) -> ScotpTypeInfo {
    ScotpTypeInfo {
        code,
        record_type,
        gender_key,
        county_search_param,
        county_record_key: None,
        ref_key: None,
        mapper,
    }
}

static TYPES: &[ScotpTypeInfo] = &[
    info(
        "stat_births",
        RecordType::BirthRegistration,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_births,
    ),
    info(
        "stat_marriages",
        RecordType::MarriageRegistration,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_marriages,
    ),
    info(
        "stat_deaths",
        RecordType::DeathRegistration,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_deaths,
    ),
    info(
        "stat_divorces",
        RecordType::Divorce,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_divorces,
    ),
    info(
        "stat_civilpartnerships",
        RecordType::MarriageRegistration,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_civil_partnerships,
    ),
    info(
        "stat_dissolutions",
        RecordType::Divorce,
        GENDER,
        COUNTY_SEARCH,
        mappers::stat_dissolutions,
    ),
    ScotpTypeInfo {
        code: "census",
        record_type: RecordType::Census,
        gender_key: GENDER,
        county_search_param: COUNTY_SEARCH,
        county_record_key: Some("County / City"),
        ref_key: Some("Ref"),
        mapper: mappers::census,
    },
    info(
        "census_lds",
        RecordType::Census,
        GENDER,
        None,
        mappers::census_lds,
    ),
    info(
        "opr_births",
        RecordType::BirthOrBaptism,
        GENDER,
        COUNTY_SEARCH,
        mappers::opr_births,
    ),
    info(
        "opr_deaths",
        RecordType::DeathOrBurial,
        GENDER,
        COUNTY_SEARCH,
        mappers::opr_deaths,
    ),
    info(
        "opr_marriages",
        RecordType::Marriage,
        GENDER,
        COUNTY_SEARCH,
        mappers::opr_marriages,
    ),
    info(
        "cr_baptisms",
        RecordType::Baptism,
        GENDER,
        COUNTY_SEARCH,
        mappers::cr_baptisms,
    ),
    info(
        "cr_burials",
        RecordType::Burial,
        GENDER,
        COUNTY_SEARCH,
        mappers::cr_burials,
    ),
    info(
        "cr_banns",
        RecordType::Marriage,
        GENDER,
        COUNTY_SEARCH,
        mappers::cr_banns,
    ),
    info(
        "cr_other",
        RecordType::Unclassified,
        GENDER,
        COUNTY_SEARCH,
        mappers::cr_other,
    ),
    info(
        "ch3_baptisms",
        RecordType::Baptism,
        GENDER,
        None,
        mappers::ch3_baptisms,
    ),
    info(
        "ch3_burials",
        RecordType::Burial,
        GENDER,
        None,
        mappers::ch3_burials,
    ),
    info(
        "ch3_banns",
        RecordType::Marriage,
        GENDER,
        None,
        mappers::ch3_banns,
    ),
    info(
        "ch3_other",
        RecordType::Unclassified,
        GENDER,
        None,
        mappers::ch3_other,
    ),
    info("coa", RecordType::Heraldry, None, None, mappers::coa),
    info("hie", RecordType::Emigration, None, None, mappers::hie),
    info(
        "military_tribunals",
        RecordType::Military,
        None,
        None,
        mappers::military_tribunals,
    ),
    info(
        "prison_records",
        RecordType::CriminalRegister,
        GENDER,
        None,
        mappers::prison_records,
    ),
    info(
        "soldiers_wills",
        RecordType::Will,
        None,
        None,
        mappers::soldiers_wills,
    ),
    info("wills", RecordType::Will, GENDER, None, mappers::wills),
    info("vr", RecordType::ValuationRoll, None, COUNTY_SEARCH, mappers::vr),
];

/// Look up a provider record-type code.
pub fn type_info(code: &str) -> Option<&'static ScotpTypeInfo> {
    let code = code.trim();
    TYPES.iter().find(|info| info.code == code)
}

/// All known provider codes, in table order.
pub fn known_codes() -> impl Iterator<Item = &'static str> {
    TYPES.iter().map(|info| info.code)
}

/// Canonical kind for a record, after per-record refinements.
///
/// Church burial entries sometimes record a death instead; other-church
/// baptism entries with only a birth date are births.
pub fn resolve_record_type(info: &ScotpTypeInfo, data: &ScotpExtractedData) -> RecordType {
    match info.code {
        "cr_burials" if data.record_value("Event").map(str::trim) == Some("Death") => {
            RecordType::Death
        }
        "ch3_baptisms"
            if data.record_value("Birth Date").is_some()
                && data.record_value("Baptism Date").is_none() =>
        {
            RecordType::Birth
        }
        _ => info.record_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> ScotpExtractedData {
        ScotpExtractedData {
            record_data: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..ScotpExtractedData::default()
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = known_codes().collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn unknown_code_has_no_info() {
        assert!(type_info("stat_adoptions").is_none());
        assert_eq!(
            type_info(" census ").map(|info| info.record_type),
            Some(RecordType::Census)
        );
    }

    #[test]
    fn burial_with_death_event_is_death() {
        let info = type_info("cr_burials").unwrap();
        assert_eq!(
            resolve_record_type(info, &data(&[("Event", "Death")])),
            RecordType::Death
        );
        assert_eq!(
            resolve_record_type(info, &data(&[("Event", "Burial")])),
            RecordType::Burial
        );
    }

    #[test]
    fn other_church_baptism_without_baptism_date_is_birth() {
        let info = type_info("ch3_baptisms").unwrap();
        assert_eq!(
            resolve_record_type(info, &data(&[("Birth Date", "3 MAY 1850")])),
            RecordType::Birth
        );
        assert_eq!(
            resolve_record_type(
                info,
                &data(&[("Birth Date", "3 MAY 1850"), ("Baptism Date", "9 MAY 1850")])
            ),
            RecordType::Baptism
        );
    }
}
