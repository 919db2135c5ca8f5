use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use sourcer_core::{GeneralizeError, GeneralizerRegistry, build_registry};
use sourcer_model::{CanonicalRecord, ExtractedRecord, NameValue};
use sourcer_reference::{LoadSummary, ReferenceTables, default_reference_root};
use tracing::{debug, info, info_span, warn};

use crate::cli::GeneralizeArgs;
use crate::logging::redact_value;
use crate::summary::{apply_table_style, providers_table};
use crate::types::{GeneralizeResult, RecordOutcome};

/// Input envelopes and whether they arrived as a JSON array.
#[derive(Debug)]
pub struct Envelopes {
    pub records: Vec<ExtractedRecord>,
    pub is_batch: bool,
}

pub fn resolve_reference_dir(reference_dir: Option<&Path>) -> PathBuf {
    reference_dir.map_or_else(default_reference_root, Path::to_path_buf)
}

pub fn load_reference(reference_dir: &Path) -> Result<(ReferenceTables, LoadSummary)> {
    ReferenceTables::load(reference_dir)
        .with_context(|| format!("load reference data from {}", reference_dir.display()))
}

pub fn read_envelopes(path: &Path) -> Result<Envelopes> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse JSON in {}", path.display()))?;

    let is_batch = value.is_array();
    let records = if is_batch {
        serde_json::from_value::<Vec<ExtractedRecord>>(value)
    } else {
        serde_json::from_value::<ExtractedRecord>(value).map(|record| vec![record])
    }
    .with_context(|| format!("{} does not hold record envelopes", path.display()))?;

    Ok(Envelopes { records, is_batch })
}

fn subject_name(record: &CanonicalRecord) -> String {
    record
        .name
        .as_ref()
        .and_then(NameValue::full_name)
        .unwrap_or_default()
}

/// Generalize every envelope in order.
///
/// # Errors
///
/// Fails on the first envelope whose provider is unknown. A payload that
/// does not deserialize, like a record the provider cannot make sense of,
/// comes back invalid and the batch continues.
pub fn generalize_all(
    registry: &GeneralizerRegistry,
    envelopes: &[ExtractedRecord],
) -> Result<Vec<RecordOutcome>> {
    let mut outcomes = Vec::with_capacity(envelopes.len());
    for (offset, envelope) in envelopes.iter().enumerate() {
        let index = offset + 1;
        let record = match registry.generalize(envelope) {
            Ok(record) => record,
            Err(error @ GeneralizeError::InvalidPayload { .. }) => {
                let message = format!("{:#}", anyhow::Error::new(error));
                warn!(index, error = %message, "malformed payload, record left invalid");
                CanonicalRecord::for_provider(envelope.provider.trim())
            }
            Err(error) => return Err(error).with_context(|| format!("record {index}")),
        };

        let name = subject_name(&record);
        debug!(
            index,
            provider = %envelope.provider,
            name = redact_value(&name),
            valid = record.has_valid_data,
            "generalized record"
        );
        if !record.has_valid_data {
            warn!(index, provider = %envelope.provider, "record could not be generalized");
        }
        outcomes.push(RecordOutcome {
            index,
            provider: envelope.provider.clone(),
            record,
        });
    }
    Ok(outcomes)
}

pub fn render_records(outcomes: &[RecordOutcome], is_batch: bool, compact: bool) -> Result<String> {
    let records: Vec<&CanonicalRecord> = outcomes.iter().map(|outcome| &outcome.record).collect();
    let rendered = match (is_batch, records.as_slice(), compact) {
        (false, [single], true) => serde_json::to_string(single),
        (false, [single], false) => serde_json::to_string_pretty(single),
        (_, _, true) => serde_json::to_string(&records),
        (_, _, false) => serde_json::to_string_pretty(&records),
    };
    rendered.context("serialize canonical records")
}

pub fn run_generalize(
    args: &GeneralizeArgs,
    reference_dir: Option<&Path>,
) -> Result<GeneralizeResult> {
    let span = info_span!("generalize", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let envelopes = read_envelopes(&args.input)?;
    let (tables, _) = load_reference(&resolve_reference_dir(reference_dir))?;
    let registry = build_registry(Arc::new(tables));

    let outcomes = generalize_all(&registry, &envelopes.records)?;
    let mut rendered = render_records(&outcomes, envelopes.is_batch, args.compact)?;
    rendered.push('\n');

    match &args.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("write canonical records to stdout")?,
    }

    let result = GeneralizeResult {
        outcomes,
        output: args.output.clone(),
    };
    info!(
        records = result.outcomes.len(),
        invalid = result.invalid_count(),
        duration_ms = start.elapsed().as_millis(),
        "generalize complete"
    );
    Ok(result)
}

pub fn run_providers(reference_dir: Option<&Path>) -> Result<()> {
    let (tables, _) = load_reference(&resolve_reference_dir(reference_dir))?;
    let registry = build_registry(Arc::new(tables));

    let mut table = providers_table(&registry);
    apply_table_style(&mut table);
    println!("{table}");
    Ok(())
}

pub fn run_reference(reference_dir: Option<&Path>) -> Result<LoadSummary> {
    let (_, summary) = load_reference(&resolve_reference_dir(reference_dir))?;
    info!(
        reference_dir = %summary.reference_dir.display(),
        tables = summary.table_counts.len(),
        "reference data loaded"
    );
    Ok(summary)
}
