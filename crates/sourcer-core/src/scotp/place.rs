//! Place building for ScotlandsPeople records.
//!
//! Every place is in Scotland. The display string is built from the town,
//! the county and the country. Counties are resolved through the reference
//! tables, falling back to the county the user searched on.

use sourcer_model::{PlaceValue, ScotpExtractedData};
use sourcer_normalization::{join_place_parts, non_empty, standardize_place_name};
use sourcer_reference::ReferenceLookup;
use tracing::trace;

use super::record_type::ScotpTypeInfo;

pub const COUNTRY: &str = "Scotland";

const SEARCH_COUNTY_KEYS: &[&str] = &["County/city", "County/city/minor records"];
const RECORD_COUNTY_KEY: &str = "County / City";
const NON_SCOTTISH_PLACE: &str = "a non-Scottish court";
const COURT_TOWN_STOPS: &[&str] = &["Sheriff", "Commissary", "Court"];

/// Parse a year string for reference lookups.
pub fn parse_year(year: Option<&str>) -> Option<i32> {
    year.and_then(|year| year.trim().parse().ok())
}

fn cut_before<'a>(value: &'a str, marker: &str) -> &'a str {
    match value.find(marker) {
        Some(index) => &value[..index],
        None => value,
    }
}

/// `town, county, Scotland` with the county and country also set.
pub fn town_and_county(town: Option<&str>, county: Option<&str>) -> PlaceValue {
    let town = town.map(standardize_place_name);
    let county = county.and_then(non_empty);
    let mut place = PlaceValue::in_country(COUNTRY);
    if let Some(county) = county.as_deref() {
        place = place.with_county(county);
    }
    if let Some(place_string) = join_place_parts([town.as_deref(), county.as_deref(), Some(COUNTRY)])
    {
        place = place.with_place_string(&place_string);
    }
    place
}

/// A court place and the court name extracted with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtPlace {
    pub place: PlaceValue,
    pub court_name: Option<String>,
}

/// Resolves places for one record against the reference tables.
pub struct PlaceResolver<'a> {
    data: &'a ScotpExtractedData,
    info: &'a ScotpTypeInfo,
    lookup: &'a dyn ReferenceLookup,
}

impl<'a> PlaceResolver<'a> {
    pub fn new(
        data: &'a ScotpExtractedData,
        info: &'a ScotpTypeInfo,
        lookup: &'a dyn ReferenceLookup,
    ) -> Self {
        Self { data, info, lookup }
    }

    fn display_county(&self, name: &str) -> Option<String> {
        self.lookup
            .lookup_county(name)
            .map(|county| county.display_county)
    }

    fn display_or_standardized(&self, name: &str) -> String {
        self.display_county(name)
            .unwrap_or_else(|| standardize_place_name(name))
    }

    /// County the user searched on, ignoring `all`.
    fn county_from_search_criteria(&self) -> Option<String> {
        let county = SEARCH_COUNTY_KEYS
            .iter()
            .find_map(|key| self.data.search_value(key))?;
        if county.trim().eq_ignore_ascii_case("all") {
            return None;
        }
        Some(self.display_or_standardized(county))
    }

    /// County from the search, else from the record's own county column.
    fn county_from_search(&self) -> Option<&'a str> {
        let param = self.info.county_search_param?;
        let searched = self
            .data
            .search_value(param)
            .filter(|county| !county.trim().eq_ignore_ascii_case("all"));
        searched.or_else(|| {
            self.info
                .county_record_key
                .and_then(|key| self.data.record_value(key))
        })
    }

    /// Registration district number from the archive reference.
    ///
    /// `685/1 462` and `685/1/462` both yield `685/1`; `302/5` yields `302`.
    pub fn rd_number(&self) -> Option<String> {
        let from_ref = self.data.record_value("Ref").map(|reference| {
            let reference = reference.trim();
            let number = if reference.contains('/') {
                let space_parts: Vec<&str> = reference.split(' ').collect();
                let slash_parts: Vec<&str> = reference.split('/').collect();
                if space_parts.len() > 1 {
                    space_parts[0].to_string()
                } else if slash_parts.len() > 2 {
                    format!("{}/{}", slash_parts[0].trim(), slash_parts[1].trim())
                } else if slash_parts.len() == 2 {
                    slash_parts[0].trim().to_string()
                } else {
                    reference.to_string()
                }
            } else {
                reference.to_string()
            };
            number.trim_end_matches('/').to_string()
        });
        from_ref.and_then(|number| non_empty(&number)).or_else(|| {
            self.data
                .record_value("Parish Number")
                .filter(|number| number.contains('/'))
                .and_then(|number| non_empty(number.trim().trim_end_matches('/')))
        })
    }

    fn county_from_parishes(&self, town: &str, year: Option<i32>, number: Option<&str>) -> Option<String> {
        let parishes = self.lookup.lookup_parish(town, year);
        if let Some(number) = number {
            let matched = parishes
                .iter()
                .filter(|parish| parish.matches_number(number))
                .find_map(|parish| self.display_county(&parish.county));
            if matched.is_some() {
                return matched;
            }
        }
        match parishes.as_slice() {
            [only] => self.display_county(&only.county),
            _ => None,
        }
    }

    fn county_from_district(&self, rd_name: Option<&str>, year: Option<i32>) -> Option<String> {
        let rd_number = self.rd_number();
        if let Some(rd_number) = rd_number.as_deref() {
            let districts = self.lookup.lookup_district(rd_number, rd_name, year);
            if let Some(county) = districts
                .first()
                .and_then(|district| self.display_county(&district.county))
            {
                trace!(rd_number, county = %county, "county from registration district");
                return Some(county);
            }
        }
        self.county_from_search_criteria().or_else(|| {
            self.county_from_parishes(rd_name?, year, rd_number.as_deref())
        })
    }

    fn county_from_opr_parish(&self, parish: Option<&str>, year: Option<i32>) -> Option<String> {
        if let Some(searched) = self.county_from_search() {
            return Some(self.display_or_standardized(searched));
        }
        let number = self.data.record_value("Parish Number").map(str::trim);
        self.county_from_parishes(parish?, year, number)
    }

    fn county_from_parish_name(&self, town: &str, year: Option<i32>) -> Option<String> {
        self.lookup
            .lookup_parish(town, year)
            .first()
            .and_then(|parish| self.display_county(&parish.county))
            .or_else(|| self.county_from_search_criteria())
    }

    fn county_from_rc(&self, parish: &str, congregation: &str) -> Option<String> {
        self.lookup
            .lookup_rc_parish(parish, congregation)
            .first()
            .and_then(|entry| self.display_county(&entry.county))
            .or_else(|| self.county_from_search_criteria())
    }

    fn county_from_other(&self, parish: &str, congregation: &str) -> Option<String> {
        self.lookup
            .lookup_other_parish(parish, congregation)
            .first()
            .and_then(|entry| self.display_county(&entry.county))
            .or_else(|| self.county_from_search_criteria())
    }

    /// Statutory registers: the registration district is the town.
    pub fn statutory_district(&self, rd_name: Option<&str>, year: Option<&str>) -> PlaceValue {
        let county = self.county_from_district(rd_name, parse_year(year));
        town_and_county(rd_name, county.as_deref())
    }

    /// Census: the district plus the record's own county, shipping excepted.
    pub fn census_district(&self, rd_name: Option<&str>, county: Option<&str>) -> PlaceValue {
        let county = county
            .and_then(non_empty)
            .filter(|county| !county.to_lowercase().starts_with("shipping"))
            .map(|county| self.display_county(&county).unwrap_or(county));
        town_and_county(rd_name, county.as_deref())
    }

    /// Old parish registers: the parish is the town.
    pub fn opr_parish(&self, parish: Option<&str>, year: Option<&str>) -> PlaceValue {
        let county = self.county_from_opr_parish(parish, parse_year(year));
        town_and_county(parish, county.as_deref())
    }

    /// Catholic registers: `Parish, Congregation` or a bare congregation.
    pub fn rc_congregation(&self, raw: Option<&str>) -> PlaceValue {
        let raw = raw.map(standardize_place_name).unwrap_or_default();
        let (parish, congregation) = match raw.split_once(", ") {
            Some((parish, congregation)) => (parish.trim(), congregation),
            None => ("", raw.as_str()),
        };

        let county = self
            .data
            .record_value(RECORD_COUNTY_KEY)
            .and_then(non_empty)
            .or_else(|| self.county_from_rc(parish, congregation));
        town_and_county(Some(parish), county.as_deref()).with_street_address(congregation)
    }

    /// Other church registers: `PARISH - CONGREGATION` or a bare congregation.
    pub fn other_congregation(&self, raw: Option<&str>) -> PlaceValue {
        let raw = raw.map(standardize_place_name).unwrap_or_default();
        let (parish, congregation) = match raw.split_once(" - ") {
            Some((parish, congregation)) => (parish.trim(), congregation),
            None => ("", raw.as_str()),
        };

        let county = self
            .data
            .record_value(RECORD_COUNTY_KEY)
            .and_then(non_empty)
            .or_else(|| self.county_from_other(parish, congregation))
            .or_else(|| self.county_from_rc(parish, congregation));
        town_and_county(Some(parish), county.as_deref()).with_street_address(congregation)
    }

    /// Court records. The town is the court name up to `Sheriff`,
    /// `Commissary` or `Court`; a town that names a county is the county.
    pub fn court(&self, court: Option<&str>, year: Option<&str>) -> Option<CourtPlace> {
        let court = court.and_then(non_empty)?;
        if court.to_lowercase().starts_with("non-") {
            return PlaceValue::from_place_string(NON_SCOTTISH_PLACE).map(|place| CourtPlace {
                place,
                court_name: Some(court),
            });
        }

        let town = COURT_TOWN_STOPS
            .iter()
            .fold(court.as_str(), |town, stop| cut_before(town, stop))
            .trim();
        let court_name = match court.find("Wills") {
            Some(index) => &court[..index],
            None => cut_before(&court, "Inventories"),
        };

        let place = self.town_or_county(town, parse_year(year));
        Some(CourtPlace {
            place,
            court_name: non_empty(court_name),
        })
    }

    /// Prison records: the prison name is the town.
    pub fn prison(&self, prison: Option<&str>, year: Option<&str>) -> Option<PlaceValue> {
        let prison = prison.and_then(non_empty)?;
        Some(self.town_or_county(&prison, parse_year(year)))
    }

    fn town_or_county(&self, town: &str, year: Option<i32>) -> PlaceValue {
        if town.is_empty() {
            return town_and_county(None, None);
        }
        if self.lookup.lookup_county(town).is_some() {
            return town_and_county(None, Some(town));
        }
        let county = self.county_from_parish_name(town, year);
        town_and_county(Some(town), county.as_deref())
    }

    /// Highland emigration: residence plus the recorded county.
    pub fn residence_and_county(&self, residence: Option<&str>, county: Option<&str>) -> PlaceValue {
        let county = county
            .and_then(non_empty)
            .map(|county| self.display_county(&county).unwrap_or(county));
        town_and_county(residence, county.as_deref())
    }
}

/// LDS 1881 census: the census place verbatim plus the dwelling address.
pub fn lds_census_place(census_place: Option<&str>, address: Option<&str>) -> PlaceValue {
    let mut place = PlaceValue::in_country(COUNTRY);
    if let Some(census_place) = census_place {
        place = place.with_place_string(census_place);
    }
    if let Some(address) = address {
        let address = address.strip_prefix("Dwelling: ").unwrap_or(address);
        place = place.with_street_address(address);
    }
    place
}
