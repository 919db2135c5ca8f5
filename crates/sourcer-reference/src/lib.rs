#![deny(unsafe_code)]

pub mod error;
pub mod lookup;
pub mod manifest;
pub mod paths;
pub mod tables;

pub use crate::error::{ReferenceError, Result};
pub use crate::lookup::{CongregationEntry, CountyEntry, DistrictEntry, ParishEntry, ReferenceLookup};
pub use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, TableKind};
pub use crate::paths::{REFERENCE_ENV_VAR, default_reference_root};
pub use crate::tables::{LoadSummary, ReferenceTables};
