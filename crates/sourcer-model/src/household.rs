//! Household table summaries (census-style records).

use serde::{Deserialize, Serialize};

use crate::values::{Gender, MaritalStatus};

/// An attribute that can appear in a household member summary.
///
/// Declaration order is the canonical column order used for
/// `householdArrayFields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HouseholdField {
    Name,
    Relationship,
    MaritalStatus,
    Gender,
    Age,
    BirthYear,
    BirthDate,
    Occupation,
    BirthPlace,
}

impl HouseholdField {
    pub const ALL: &'static [HouseholdField] = &[
        HouseholdField::Name,
        HouseholdField::Relationship,
        HouseholdField::MaritalStatus,
        HouseholdField::Gender,
        HouseholdField::Age,
        HouseholdField::BirthYear,
        HouseholdField::BirthDate,
        HouseholdField::Occupation,
        HouseholdField::BirthPlace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HouseholdField::Name => "name",
            HouseholdField::Relationship => "relationship",
            HouseholdField::MaritalStatus => "maritalStatus",
            HouseholdField::Gender => "gender",
            HouseholdField::Age => "age",
            HouseholdField::BirthYear => "birthYear",
            HouseholdField::BirthDate => "birthDate",
            HouseholdField::Occupation => "occupation",
            HouseholdField::BirthPlace => "birthPlace",
        }
    }
}

/// One row of a household table, holding only the populated attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    /// Closed (privacy-restricted) rows carry no other data.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    /// The member the record is about.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_selected: bool,
}

impl HouseholdMember {
    /// Returns true if the given attribute is populated on this member.
    pub fn has_field(&self, field: HouseholdField) -> bool {
        match field {
            HouseholdField::Name => self.name.is_some(),
            HouseholdField::Relationship => self.relationship.is_some(),
            HouseholdField::MaritalStatus => self.marital_status.is_some(),
            HouseholdField::Gender => self.gender.is_some(),
            HouseholdField::Age => self.age.is_some(),
            HouseholdField::BirthYear => self.birth_year.is_some(),
            HouseholdField::BirthDate => self.birth_date.is_some(),
            HouseholdField::Occupation => self.occupation.is_some(),
            HouseholdField::BirthPlace => self.birth_place.is_some(),
        }
    }
}
