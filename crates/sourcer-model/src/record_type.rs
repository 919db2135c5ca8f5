//! Record classification enumerations.
//!
//! Every provider record is mapped onto one value of the closed
//! [`RecordType`] taxonomy. Some kinds additionally carry a
//! [`RecordSubtype`], and records about a relative of the researched person
//! carry a [`Role`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the data came from on the provider's site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A user-maintained person profile (family tree page).
    Profile,
    /// An indexed historical record.
    Record,
    /// A book or other published source.
    Book,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Profile => "profile",
            SourceType::Record => "record",
            SourceType::Book => "book",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed taxonomy of record kinds.
///
/// `Unclassified` is a valid terminal value: the record was understood but
/// no more specific kind applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    Unclassified,
    Birth,
    BirthRegistration,
    Baptism,
    BirthOrBaptism,
    Death,
    DeathRegistration,
    Burial,
    DeathOrBurial,
    Marriage,
    MarriageRegistration,
    Divorce,
    Census,
    Residence,
    LandTax,
    SchoolRecords,
    Probate,
    Will,
    Obituary,
    Immigration,
    Emigration,
    PassengerList,
    Naturalization,
    Military,
    ElectoralRegister,
    Tax,
    Pension,
    PassportApplication,
    CriminalRegister,
    FreemasonMembership,
    Heraldry,
    ValuationRoll,
    Employment,
    Apprenticeship,
    Directory,
    Newspaper,
    Workhouse,
    Medical,
    Membership,
    SocialSecurity,
}

impl RecordType {
    /// Returns the canonical name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Unclassified => "Unclassified",
            RecordType::Birth => "Birth",
            RecordType::BirthRegistration => "BirthRegistration",
            RecordType::Baptism => "Baptism",
            RecordType::BirthOrBaptism => "BirthOrBaptism",
            RecordType::Death => "Death",
            RecordType::DeathRegistration => "DeathRegistration",
            RecordType::Burial => "Burial",
            RecordType::DeathOrBurial => "DeathOrBurial",
            RecordType::Marriage => "Marriage",
            RecordType::MarriageRegistration => "MarriageRegistration",
            RecordType::Divorce => "Divorce",
            RecordType::Census => "Census",
            RecordType::Residence => "Residence",
            RecordType::LandTax => "LandTax",
            RecordType::SchoolRecords => "SchoolRecords",
            RecordType::Probate => "Probate",
            RecordType::Will => "Will",
            RecordType::Obituary => "Obituary",
            RecordType::Immigration => "Immigration",
            RecordType::Emigration => "Emigration",
            RecordType::PassengerList => "PassengerList",
            RecordType::Naturalization => "Naturalization",
            RecordType::Military => "Military",
            RecordType::ElectoralRegister => "ElectoralRegister",
            RecordType::Tax => "Tax",
            RecordType::Pension => "Pension",
            RecordType::PassportApplication => "PassportApplication",
            RecordType::CriminalRegister => "CriminalRegister",
            RecordType::FreemasonMembership => "FreemasonMembership",
            RecordType::Heraldry => "Heraldry",
            RecordType::ValuationRoll => "ValuationRoll",
            RecordType::Employment => "Employment",
            RecordType::Apprenticeship => "Apprenticeship",
            RecordType::Directory => "Directory",
            RecordType::Newspaper => "Newspaper",
            RecordType::Workhouse => "Workhouse",
            RecordType::Medical => "Medical",
            RecordType::Membership => "Membership",
            RecordType::SocialSecurity => "SocialSecurity",
        }
    }

    /// All kinds in declaration order.
    pub const ALL: &'static [RecordType] = &[
        RecordType::Unclassified,
        RecordType::Birth,
        RecordType::BirthRegistration,
        RecordType::Baptism,
        RecordType::BirthOrBaptism,
        RecordType::Death,
        RecordType::DeathRegistration,
        RecordType::Burial,
        RecordType::DeathOrBurial,
        RecordType::Marriage,
        RecordType::MarriageRegistration,
        RecordType::Divorce,
        RecordType::Census,
        RecordType::Residence,
        RecordType::LandTax,
        RecordType::SchoolRecords,
        RecordType::Probate,
        RecordType::Will,
        RecordType::Obituary,
        RecordType::Immigration,
        RecordType::Emigration,
        RecordType::PassengerList,
        RecordType::Naturalization,
        RecordType::Military,
        RecordType::ElectoralRegister,
        RecordType::Tax,
        RecordType::Pension,
        RecordType::PassportApplication,
        RecordType::CriminalRegister,
        RecordType::FreemasonMembership,
        RecordType::Heraldry,
        RecordType::ValuationRoll,
        RecordType::Employment,
        RecordType::Apprenticeship,
        RecordType::Directory,
        RecordType::Newspaper,
        RecordType::Workhouse,
        RecordType::Medical,
        RecordType::Membership,
        RecordType::SocialSecurity,
    ];

    /// Returns true for kinds whose main event is a death.
    pub fn is_death(&self) -> bool {
        matches!(self, RecordType::Death | RecordType::DeathRegistration)
    }

    /// Returns true for kinds that support a [`RecordSubtype`].
    pub fn supports_subtype(&self) -> bool {
        matches!(
            self,
            RecordType::Probate | RecordType::Will | RecordType::Marriage
        )
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    /// Parse a record type name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RecordType::ALL
            .iter()
            .copied()
            .find(|rt| rt.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unknown record type: {s}"))
    }
}

/// Finer classification for kinds that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordSubtype {
    Probate,
    LettersOfAdministration,
    Testament,
    Inventory,
    AdditionalInventory,
    TrustDisposition,
    Other,
    /// Church marriage entries that cannot be told apart from banns.
    MarriageOrBanns,
}

impl RecordSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordSubtype::Probate => "Probate",
            RecordSubtype::LettersOfAdministration => "LettersOfAdministration",
            RecordSubtype::Testament => "Testament",
            RecordSubtype::Inventory => "Inventory",
            RecordSubtype::AdditionalInventory => "AdditionalInventory",
            RecordSubtype::TrustDisposition => "TrustDisposition",
            RecordSubtype::Other => "Other",
            RecordSubtype::MarriageOrBanns => "MarriageOrBanns",
        }
    }
}

impl fmt::Display for RecordSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whose record this is relative to the person being researched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Primary,
    Parent,
    Child,
    Spouse,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Primary => "Primary",
            Role::Parent => "Parent",
            Role::Child => "Child",
            Role::Spouse => "Spouse",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Primary" => Ok(Role::Primary),
            "Parent" => Ok(Role::Parent),
            "Child" => Ok(Role::Child),
            "Spouse" => Ok(Role::Spouse),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_round_trips_through_str() {
        for rt in RecordType::ALL {
            assert_eq!(rt.as_str().parse::<RecordType>().unwrap(), *rt);
        }
        assert_eq!(
            "birthregistration".parse::<RecordType>().unwrap(),
            RecordType::BirthRegistration
        );
        assert!("Wedding".parse::<RecordType>().is_err());
    }

    #[test]
    fn role_parses_only_known_relationships() {
        assert_eq!("Parent".parse::<Role>().unwrap(), Role::Parent);
        assert!("Cousin".parse::<Role>().is_err());
    }
}
