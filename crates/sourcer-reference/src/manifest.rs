use std::fmt;

use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "sourcer.reference-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub tables: Vec<ManifestTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTable {
    pub table: TableKind,
    pub path: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The reference tables a manifest can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Districts,
    Parishes,
    Counties,
    RcParishes,
    OtherParishes,
}

impl TableKind {
    pub const ALL: &'static [TableKind] = &[
        TableKind::Districts,
        TableKind::Parishes,
        TableKind::Counties,
        TableKind::RcParishes,
        TableKind::OtherParishes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Districts => "districts",
            TableKind::Parishes => "parishes",
            TableKind::Counties => "counties",
            TableKind::RcParishes => "rc_parishes",
            TableKind::OtherParishes => "other_parishes",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
