//! Record generalization for genealogy providers.
//!
//! Provider payloads are classified into a record type and mapped onto a
//! [`sourcer_model::CanonicalRecord`] through per-type dispatch tables.
//!
//! - [`fs`]: FamilySearch classification and mappers
//! - [`scotp`]: ScotlandsPeople record-type codes, places and mappers
//! - [`household`]: household table expansion and relative inference
//! - [`registry`]: provider lookup by code

#![deny(unsafe_code)]

pub mod builder;
pub mod error;
pub mod fs;
pub mod household;
pub mod registry;
pub mod scotp;

pub use builder::RecordBuilder;
pub use error::{GeneralizeError, Result};
pub use household::{HouseholdSummary, expand_household, infer_relatives};
pub use registry::{
    FsGeneralizer, GeneralizerRegistry, RecordGeneralizer, ScotpGeneralizer, build_registry,
};
