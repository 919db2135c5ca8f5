//! Provider generalizer trait and registry.
//!
//! Each provider registers a [`RecordGeneralizer`] under its provider code.
//! The registry deserializes the provider payload and hands it to the
//! provider's generalization routine.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sourcer_core::build_registry;
//! use sourcer_reference::ReferenceTables;
//!
//! let registry = build_registry(Arc::new(ReferenceTables::empty()));
//! let record = registry.generalize(&envelope)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use sourcer_model::{CanonicalRecord, ExtractedRecord, FsExtractedData, ScotpExtractedData};
use sourcer_reference::ReferenceLookup;
use tracing::debug;

use crate::error::{GeneralizeError, Result};
use crate::{fs, scotp};

/// Provider-specific conversion of an extracted payload.
pub trait RecordGeneralizer: Send + Sync {
    /// Provider code the generalizer handles (e.g. `fs`, `scotp`).
    fn provider_code(&self) -> &'static str;

    /// Human-readable provider name.
    fn description(&self) -> &'static str {
        "Record generalizer"
    }

    /// Provider record-type codes the generalizer dispatches on, if any.
    fn record_kinds(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Convert one payload into a canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`GeneralizeError::InvalidPayload`] if the payload does not
    /// have the provider's shape. Content problems never error; they leave
    /// the record invalid.
    fn generalize(&self, extracted: &serde_json::Value) -> Result<CanonicalRecord>;
}

fn parse_payload<T: DeserializeOwned>(
    provider: &'static str,
    extracted: &serde_json::Value,
) -> Result<T> {
    serde_json::from_value(extracted.clone())
        .map_err(|source| GeneralizeError::InvalidPayload { provider, source })
}

/// FamilySearch.
pub struct FsGeneralizer;

impl RecordGeneralizer for FsGeneralizer {
    fn provider_code(&self) -> &'static str {
        fs::PROVIDER
    }

    fn description(&self) -> &'static str {
        "FamilySearch"
    }

    fn generalize(&self, extracted: &serde_json::Value) -> Result<CanonicalRecord> {
        let data: FsExtractedData = parse_payload(fs::PROVIDER, extracted)?;
        Ok(fs::generalize(&data))
    }
}

/// ScotlandsPeople, resolving places against shared reference tables.
pub struct ScotpGeneralizer {
    lookup: Arc<dyn ReferenceLookup>,
}

impl ScotpGeneralizer {
    pub fn new(lookup: Arc<dyn ReferenceLookup>) -> Self {
        Self { lookup }
    }
}

impl RecordGeneralizer for ScotpGeneralizer {
    fn provider_code(&self) -> &'static str {
        scotp::PROVIDER
    }

    fn description(&self) -> &'static str {
        "ScotlandsPeople"
    }

    fn record_kinds(&self) -> Vec<&'static str> {
        scotp::known_codes().collect()
    }

    fn generalize(&self, extracted: &serde_json::Value) -> Result<CanonicalRecord> {
        let data: ScotpExtractedData = parse_payload(scotp::PROVIDER, extracted)?;
        Ok(scotp::generalize(&data, self.lookup.as_ref()))
    }
}

/// Registry of generalizers indexed by provider code.
#[derive(Default)]
pub struct GeneralizerRegistry {
    generalizers: HashMap<&'static str, Box<dyn RecordGeneralizer>>,
}

impl GeneralizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generalizer for its provider code, replacing any previous one.
    pub fn register(&mut self, generalizer: Box<dyn RecordGeneralizer>) {
        self.generalizers
            .insert(generalizer.provider_code(), generalizer);
    }

    /// Gets the generalizer for a provider code.
    ///
    /// # Errors
    ///
    /// Returns [`GeneralizeError::UnknownProvider`] if nothing is registered.
    pub fn get(&self, provider: &str) -> Result<&dyn RecordGeneralizer> {
        self.generalizers
            .get(provider.trim())
            .map(|g| g.as_ref())
            .ok_or_else(|| GeneralizeError::UnknownProvider {
                provider: provider.to_string(),
            })
    }

    /// Generalize one envelope through its provider.
    pub fn generalize(&self, record: &ExtractedRecord) -> Result<CanonicalRecord> {
        let generalizer = self.get(&record.provider)?;
        debug!(provider = generalizer.provider_code(), "generalizing record");
        generalizer.generalize(&record.extracted_data)
    }

    pub fn len(&self) -> usize {
        self.generalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generalizers.is_empty()
    }

    /// Registered providers as `(code, description)`, sorted by code.
    pub fn providers(&self) -> Vec<(&'static str, &'static str)> {
        let mut providers: Vec<_> = self
            .generalizers
            .values()
            .map(|g| (g.provider_code(), g.description()))
            .collect();
        providers.sort_unstable();
        providers
    }
}

/// Registry with every supported provider.
pub fn build_registry(lookup: Arc<dyn ReferenceLookup>) -> GeneralizerRegistry {
    let mut registry = GeneralizerRegistry::new();
    registry.register(Box::new(FsGeneralizer));
    registry.register(Box::new(ScotpGeneralizer::new(lookup)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcer_reference::ReferenceTables;

    fn registry() -> GeneralizerRegistry {
        build_registry(Arc::new(ReferenceTables::empty()))
    }

    #[test]
    fn lists_providers_in_order() {
        assert_eq!(
            registry().providers(),
            vec![("fs", "FamilySearch"), ("scotp", "ScotlandsPeople")]
        );
    }

    #[test]
    fn scotp_lists_its_record_kinds() {
        let registry = registry();
        let kinds = registry.get("scotp").unwrap().record_kinds();
        assert!(kinds.contains(&"stat_births"));
        assert!(kinds.contains(&"vr"));
        assert!(registry.get("fs").unwrap().record_kinds().is_empty());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let envelope = ExtractedRecord {
            provider: "ancestry".to_string(),
            extracted_data: serde_json::json!({}),
        };
        let err = registry().generalize(&envelope).unwrap_err();
        assert!(matches!(err, GeneralizeError::UnknownProvider { .. }));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let envelope = ExtractedRecord {
            provider: "scotp".to_string(),
            extracted_data: serde_json::json!({ "recordData": "not a map" }),
        };
        let err = registry().generalize(&envelope).unwrap_err();
        assert!(matches!(
            err,
            GeneralizeError::InvalidPayload {
                provider: "scotp",
                ..
            }
        ));
    }

    #[test]
    fn empty_payload_gives_invalid_record() {
        let envelope = ExtractedRecord {
            provider: "scotp".to_string(),
            extracted_data: serde_json::json!({}),
        };
        let record = registry().generalize(&envelope).unwrap();
        assert!(!record.has_valid_data);
    }
}
