// crates/toolsuite-gen/tests/drift.rs
// ============================================================================
// Module: Drift Check Tests
// Description: Volatile masking and registry drift classification.
// ============================================================================
//! ## Overview
//! Verifies that suites rendered at different times compare equal while real
//! content changes, missing files, and orphaned files are reported.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use toolsuite_core::FixedClock;
use toolsuite_core::SuiteAssembler;
use toolsuite_core::ToolDescriptor;
use toolsuite_core::ToolName;
use toolsuite_gen::DriftStatus;
use toolsuite_gen::MemorySuiteStore;
use toolsuite_gen::RenderOptions;
use toolsuite_gen::SuiteLifecycle;
use toolsuite_gen::SuiteStore;
use toolsuite_gen::ToolRegistry;
use toolsuite_gen::VolatileMask;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn assembler_at(seconds: i64) -> SuiteAssembler<FixedClock> {
    SuiteAssembler::new(FixedClock::from_unix_seconds(seconds).expect("fixed clock"))
}

fn name(value: &str) -> ToolName {
    ToolName::parse(value).expect("name")
}

fn get_property() -> ToolDescriptor {
    ToolDescriptor::new(name("get-property"), "property").with_required(["propertyId", "contractId"])
}

// ============================================================================
// SECTION: Masking
// ============================================================================

#[test]
fn mask_replaces_timestamp_line_and_identifiers() {
    let mask = VolatileMask::new().expect("mask");
    let content = " * Generated: 2023-11-14T22:13:20Z\n\"id\": \"test-id-1700000000000\"\n";
    assert_eq!(mask.apply(content), " * Generated: <timestamp>\n\"id\": \"test-id-<millis>\"\n");
}

#[test]
fn mask_leaves_other_generated_lines_alone() {
    let mask = VolatileMask::new().expect("mask");
    let content = " * Generated by: toolsuite test generation engine\n";
    assert_eq!(mask.apply(content), content);
}

#[test]
fn mask_only_touches_quoted_identifier_values() {
    let mask = VolatileMask::new().expect("mask");
    let content = "// Intent: look up test-id-42 first\n\"id\": \"test-id-1700000000000\"\n";
    assert_eq!(
        mask.apply(content),
        "// Intent: look up test-id-42 first\n\"id\": \"test-id-<millis>\"\n"
    );
    assert_eq!(
        mask.compare(Some("// see test-id-1\n"), "// see test-id-2\n"),
        DriftStatus::Drifted
    );
}

#[test]
fn compare_classifies_missing_and_changed_content() {
    let mask = VolatileMask::new().expect("mask");
    assert_eq!(mask.compare(None, "a"), DriftStatus::Missing);
    assert_eq!(mask.compare(Some("a"), "a"), DriftStatus::UpToDate);
    assert_eq!(mask.compare(Some("a"), "b"), DriftStatus::Drifted);
    assert!(DriftStatus::UpToDate.is_clean());
    assert!(!DriftStatus::Stale.is_clean());
}

// ============================================================================
// SECTION: Registry Checks
// ============================================================================

#[test]
fn suites_generated_earlier_are_up_to_date() {
    let mut writer =
        SuiteLifecycle::new(MemorySuiteStore::new(), assembler_at(1_700_000_000), RenderOptions::default());
    writer.generate(&get_property()).expect("generate");

    let checker =
        SuiteLifecycle::new(writer.into_store(), assembler_at(1_800_000_000), RenderOptions::default());
    let registry = ToolRegistry::new(vec![get_property()]).expect("registry");
    let results = checker.check(&registry, &VolatileMask::new().expect("mask")).expect("check");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, name("get-property"));
    assert_eq!(results[0].1, Ok(DriftStatus::UpToDate));
}

#[test]
fn check_reports_drifted_missing_and_stale_suites() {
    let mut store = MemorySuiteStore::new();
    store.write(&name("get-property"), "// hand edited\n").expect("write");
    store.write(&name("retired-tool"), "// orphan\n").expect("write");
    let lifecycle = SuiteLifecycle::new(store, assembler_at(1_700_000_000), RenderOptions::default());
    let registry = ToolRegistry::new(vec![
        get_property(),
        ToolDescriptor::new(name("list-properties"), "property"),
    ])
    .expect("registry");

    let results = lifecycle.check(&registry, &VolatileMask::new().expect("mask")).expect("check");

    let statuses: Vec<(String, DriftStatus)> = results
        .into_iter()
        .map(|(tool, status)| (tool.to_string(), status.expect("status")))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("get-property".to_string(), DriftStatus::Drifted),
            ("list-properties".to_string(), DriftStatus::Missing),
            ("retired-tool".to_string(), DriftStatus::Stale),
        ]
    );
}

#[test]
fn option_changes_are_detected_as_drift() {
    let mut writer =
        SuiteLifecycle::new(MemorySuiteStore::new(), assembler_at(1_700_000_000), RenderOptions::default());
    writer.generate(&get_property()).expect("generate");

    let options = RenderOptions {
        client_type: "OtherClient".to_string(),
        ..RenderOptions::default()
    };
    let checker = SuiteLifecycle::new(writer.into_store(), assembler_at(1_700_000_000), options);
    let registry = ToolRegistry::new(vec![get_property()]).expect("registry");
    let results = checker.check(&registry, &VolatileMask::new().expect("mask")).expect("check");
    assert_eq!(results[0].1, Ok(DriftStatus::Drifted));
}
