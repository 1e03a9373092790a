//! Process-plugin tests: a submission executable behaves exactly like the
//! same implementation graded in-process.
//!
//! The plugin binaries (`reference_solution`, `faulty_solution`) are built
//! from this crate, so `CARGO_BIN_EXE_*` points at them.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use coursegrade_harness::cases::purchase_table;
use coursegrade_harness::config::GradeConfig;
use coursegrade_harness::contract::{EntryPoint, SubmissionError, SubmissionV1};
use coursegrade_harness::loader::{LoadError, ProcessSubmission};
use coursegrade_harness::protocol::{Request, EXIT_PROTOCOL};
use coursegrade_harness::runner::run_with_config;
use coursegrade_harness::submissions::faulty::Faulty;
use coursegrade_harness::submissions::reference::Reference;
use coursegrade_kernel::proof::hash::{canonical_hash, HashDomain};

const REFERENCE_BIN: &str = env!("CARGO_BIN_EXE_reference_solution");
const FAULTY_BIN: &str = env!("CARGO_BIN_EXE_faulty_solution");

fn seeded() -> GradeConfig {
    GradeConfig {
        seed: Some(17),
        ..GradeConfig::default()
    }
}

#[test]
fn process_reference_matches_in_process_reference() {
    let plugin = ProcessSubmission::load(Path::new(REFERENCE_BIN)).unwrap();
    let out_of_process = run_with_config(&plugin, &seeded());
    let in_process = run_with_config(&Reference, &seeded());

    assert_eq!(out_of_process.ledger, in_process.ledger);
    assert_eq!(out_of_process.failures, in_process.failures);
    assert_eq!(out_of_process.passed(), 5);
}

#[test]
fn process_faulty_matches_in_process_faulty() {
    let plugin = ProcessSubmission::load(Path::new(FAULTY_BIN)).unwrap();
    let out_of_process = run_with_config(&plugin, &seeded());
    let in_process = run_with_config(&Faulty, &seeded());

    assert_eq!(out_of_process.render(), in_process.render());
    assert_eq!(out_of_process.failures, in_process.failures);
}

#[test]
fn child_panic_is_a_failed_call() {
    let plugin = ProcessSubmission::load(Path::new(FAULTY_BIN)).unwrap();
    let table = purchase_table();
    let err = plugin.merge_customer_info(&table, &table).unwrap_err();
    assert!(
        matches!(err, SubmissionError::Failed { entry_point: EntryPoint::MergeCustomerInfo, .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn loaded_plugin_reports_its_source_digest() {
    let bytes = std::fs::read(REFERENCE_BIN).unwrap();
    let plugin = ProcessSubmission::load(Path::new(REFERENCE_BIN)).unwrap();
    let report = run_with_config(&plugin, &seeded());
    assert_eq!(
        report.source_digest,
        Some(canonical_hash(HashDomain::SubmissionSource, &bytes))
    );
    assert_eq!(report.submission_id, plugin.submission_id());
}

#[test]
fn missing_submission_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProcessSubmission::load(&dir.path().join("solution")).unwrap_err();
    assert!(matches!(err, LoadError::Missing { .. }));
    assert!(err.to_string().contains("solution"));
}

#[test]
fn plugin_rejects_unknown_entry_point() {
    let output = Command::new(REFERENCE_BIN)
        .arg("drop_customers")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(i32::from(EXIT_PROTOCOL)));
    assert!(output.stdout.is_empty());
}

#[test]
fn plugin_answers_a_raw_request() {
    let request = Request::with_tables(EntryPoint::GetRepeatCustomers, &[&purchase_table()]);
    let mut child = Command::new(REFERENCE_BIN)
        .arg("get_repeat_customers")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(&serde_json::to_vec(&request.to_json()).unwrap())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"columns": ["CustomerID", "PurchaseCount"], "rows": [[401, 2]]})
    );
}
