//! Integration tests for the generalize command.

use std::fs;

use sourcer_cli::cli::GeneralizeArgs;
use sourcer_cli::commands::{read_envelopes, run_generalize, run_reference};
use sourcer_reference::{TableKind, default_reference_root};
use tempfile::tempdir;

const BATCH: &str = r#"[
  {
    "provider": "fs",
    "extractedData": {
      "factType": "Census",
      "fullName": "Robert Burns",
      "eventYear": "1881",
      "eventPlace": "Mauchline, Ayrshire, Scotland"
    }
  },
  {
    "provider": "scotp",
    "extractedData": {
      "recordType": "stat_births",
      "recordData": {
        "Surname": "BURNS",
        "Forename": "JEAN",
        "Gender": "F",
        "Year": "1881",
        "RD Name": "GOVAN",
        "Ref": "644/10 123"
      }
    }
  },
  {
    "provider": "scotp",
    "extractedData": { "success": false }
  }
]"#;

fn args(input: std::path::PathBuf, output: std::path::PathBuf) -> GeneralizeArgs {
    GeneralizeArgs {
        input,
        output: Some(output),
        compact: false,
        fail_on_invalid: true,
    }
}

#[test]
fn batch_input_produces_array_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    let output = dir.path().join("canonical.json");
    fs::write(&input, BATCH).unwrap();

    let reference = default_reference_root();
    let result = run_generalize(&args(input, output.clone()), Some(&reference)).unwrap();

    assert_eq!(result.outcomes.len(), 3);
    assert_eq!(result.invalid_count(), 1);
    assert!(result.has_invalid());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let records = written.as_array().expect("array output");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["recordType"], "Census");
    assert_eq!(
        records[1]["eventPlace"]["placeString"],
        "Govan, Lanarkshire, Scotland"
    );
    assert_eq!(records[2]["hasValidData"], false);
}

#[test]
fn single_envelope_produces_single_record() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("record.json");
    let output = dir.path().join("canonical.json");
    fs::write(
        &input,
        r#"{ "provider": "fs", "extractedData": { "pageType": "book" } }"#,
    )
    .unwrap();

    let mut args = args(input, output.clone());
    args.compact = true;
    let reference = default_reference_root();
    run_generalize(&args, Some(&reference)).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "{\"sourceOfData\":\"fs\",\"sourceType\":\"book\",\"hasValidData\":true}\n"
    );
}

#[test]
fn unknown_provider_names_the_record() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    fs::write(
        &input,
        r#"[{ "provider": "fs", "extractedData": {} }, { "provider": "ancestry", "extractedData": {} }]"#,
    )
    .unwrap();

    let reference = default_reference_root();
    let error = run_generalize(
        &args(input, dir.path().join("out.json")),
        Some(&reference),
    )
    .unwrap_err();
    let message = format!("{error:#}");
    assert!(message.starts_with("record 2"), "{message}");
    assert!(message.contains("ancestry"), "{message}");
}

#[test]
fn malformed_payload_leaves_only_that_record_invalid() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    let output = dir.path().join("canonical.json");
    fs::write(
        &input,
        r#"[
  { "provider": "scotp", "extractedData": { "recordData": "not a map" } },
  { "provider": "fs", "extractedData": { "pageType": "book" } }
]"#,
    )
    .unwrap();

    let reference = default_reference_root();
    let result = run_generalize(&args(input, output.clone()), Some(&reference)).unwrap();
    assert_eq!(result.outcomes.len(), 2);
    assert_eq!(result.invalid_count(), 1);
    assert!(!result.outcomes[0].is_valid());
    assert!(result.outcomes[1].is_valid());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[0]["sourceOfData"], "scotp");
    assert_eq!(written[0]["hasValidData"], false);
}

#[test]
fn malformed_input_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    fs::write(&input, r#"{ "extractedData": {} }"#).unwrap();
    let error = read_envelopes(&input).unwrap_err();
    assert!(format!("{error:#}").contains("does not hold record envelopes"));
}

#[test]
fn reference_summary_counts_rows() {
    let reference = default_reference_root();
    let summary = run_reference(Some(&reference)).unwrap();
    assert_eq!(summary.table_counts.len(), TableKind::ALL.len());
    assert!(summary.table_counts[&TableKind::Counties] > 0);
}

#[test]
fn missing_reference_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let error = run_reference(Some(&dir.path().join("absent"))).unwrap_err();
    assert!(format!("{error:#}").contains("load reference data"));
}
