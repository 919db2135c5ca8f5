//! Reference entry types and the query contract used by place building.

use serde::{Deserialize, Serialize};

/// A registration district, valid between optional start and end years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictEntry {
    pub rd_no: String,
    pub name: String,
    pub county: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

/// A parish with the registration number it is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParishEntry {
    pub rd_no: String,
    pub name: String,
    pub county: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

/// A county spelling and the name to display for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyEntry {
    pub name: String,
    pub display_county: String,
}

/// A church congregation within a parish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongregationEntry {
    pub parish: String,
    pub congregation: String,
    pub county: String,
}

/// Returns true when `year` lies inside the optional range.
///
/// An unknown year matches every range.
pub(crate) fn year_in_range(year: Option<i32>, start: Option<i32>, end: Option<i32>) -> bool {
    let Some(year) = year else {
        return true;
    };
    start.is_none_or(|start| year >= start) && end.is_none_or(|end| year <= end)
}

impl DistrictEntry {
    pub fn is_valid_in(&self, year: Option<i32>) -> bool {
        year_in_range(year, self.start_year, self.end_year)
    }
}

impl ParishEntry {
    pub fn is_valid_in(&self, year: Option<i32>) -> bool {
        year_in_range(year, self.start_year, self.end_year)
    }

    /// Parish numbers are sometimes written with a trailing `/`.
    pub fn matches_number(&self, number: &str) -> bool {
        let number = number.trim();
        self.rd_no == number || self.rd_no.strip_suffix('/') == Some(number)
    }
}

/// Read-only gazetteer queries.
///
/// All lookups are case-insensitive on names. Implementations must be safe
/// to share across threads.
pub trait ReferenceLookup: Send + Sync {
    /// Districts with the given number, narrowed by name and year when known.
    fn lookup_district(&self, rd_no: &str, name: Option<&str>, year: Option<i32>)
    -> Vec<DistrictEntry>;

    /// Parishes with the given name that existed in the given year.
    fn lookup_parish(&self, name: &str, year: Option<i32>) -> Vec<ParishEntry>;

    /// Resolve a county spelling to its display entry.
    fn lookup_county(&self, name: &str) -> Option<CountyEntry>;

    /// Roman Catholic congregations, matched by parish and congregation.
    fn lookup_rc_parish(&self, parish: &str, congregation: &str) -> Vec<CongregationEntry>;

    /// Other-church congregations, matched by parish and congregation.
    fn lookup_other_parish(&self, parish: &str, congregation: &str) -> Vec<CongregationEntry>;
}
