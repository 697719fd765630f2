// crates/toolsuite-core/tests/assembler.rs
// ============================================================================
// Module: Suite Assembler Tests
// Description: Suite shape, ordering, ids, and gated generator behavior.
// ============================================================================
//! ## Overview
//! Exercises [`SuiteAssembler`] against representative descriptors, including
//! the listing and high-risk scenarios that gate the edge and safety cases.

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

use serde_json::json;
use toolsuite_core::DescriptorError;
use toolsuite_core::EMPTY_CUSTOMER_SENTINEL;
use toolsuite_core::FixedClock;
use toolsuite_core::GENERATED_BY;
use toolsuite_core::OptionalParamPolicy;
use toolsuite_core::RiskLevel;
use toolsuite_core::SuiteAssembler;
use toolsuite_core::SuiteError;
use toolsuite_core::TestCategory;
use toolsuite_core::TestData;
use toolsuite_core::TestPriority;
use toolsuite_core::ToolDescriptor;
use toolsuite_core::ToolName;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const FIXED_SECONDS: i64 = 1_700_000_000;

fn assembler() -> SuiteAssembler<FixedClock> {
    SuiteAssembler::new(FixedClock::from_unix_seconds(FIXED_SECONDS).expect("fixed clock"))
}

fn list_zones() -> ToolDescriptor {
    ToolDescriptor::new(ToolName::parse("list-zones").expect("name"), "dns-management")
        .with_optional(["customer", "contractIds"])
}

fn delete_network_list() -> ToolDescriptor {
    ToolDescriptor::new(ToolName::parse("delete-network-list").expect("name"), "network-lists")
        .with_required(["networkListId"])
        .with_optional(["customer"])
        .with_risk(RiskLevel::High)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn list_tool_gets_edge_case_but_no_safety_case() {
    let suite = assembler().assemble(&list_zones()).expect("assemble");
    let categories: Vec<TestCategory> = suite.tests.iter().map(|case| case.category).collect();
    assert_eq!(
        categories,
        vec![
            TestCategory::HappyPath,
            TestCategory::ErrorHandling,
            TestCategory::EdgeCase,
            TestCategory::UxValidation,
        ]
    );
}

#[test]
fn high_risk_tool_gets_one_critical_safety_case() {
    let suite = assembler().assemble(&delete_network_list()).expect("assemble");
    assert_eq!(suite.tests.len(), 5);
    let safety: Vec<_> = suite.cases_in(TestCategory::Safety).collect();
    assert_eq!(safety.len(), 1);
    assert_eq!(safety[0].priority, TestPriority::Critical);
    assert_eq!(suite.tests.last().map(|case| case.category), Some(TestCategory::Safety));
}

#[test]
fn plain_low_risk_tool_gets_three_cases() {
    let tool = ToolDescriptor::new(ToolName::parse("get-property").expect("name"), "property")
        .with_required(["propertyId"])
        .with_risk(RiskLevel::Medium);
    let suite = assembler().assemble(&tool).expect("assemble");
    assert_eq!(suite.tests.len(), 3);
    assert_eq!(suite.count_in(TestCategory::EdgeCase), 0);
    assert_eq!(suite.count_in(TestCategory::Safety), 0);
}

#[test]
fn error_case_has_empty_test_data() {
    for tool in [list_zones(), delete_network_list()] {
        let suite = assembler().assemble(&tool).expect("assemble");
        let error = suite.cases_in(TestCategory::ErrorHandling).next().expect("error case");
        assert!(error.test_data.is_empty());
    }
}

#[test]
fn edge_case_uses_empty_customer_sentinel() {
    let suite = assembler().assemble(&list_zones()).expect("assemble");
    let edge = suite.cases_in(TestCategory::EdgeCase).next().expect("edge case");
    let mut expected = TestData::new();
    expected.insert("customer".to_string(), json!(EMPTY_CUSTOMER_SENTINEL));
    assert_eq!(edge.test_data, expected);
}

#[test]
fn ids_follow_tool_category_sequence() {
    let suite = assembler().assemble(&delete_network_list()).expect("assemble");
    let ids: Vec<&str> = suite.tests.iter().map(|case| case.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "delete-network-list-happy-path-1",
            "delete-network-list-error-handling-1",
            "delete-network-list-edge-case-1",
            "delete-network-list-ux-validation-1",
            "delete-network-list-safety-1",
        ]
    );
}

#[test]
fn suite_metadata_comes_from_descriptor_and_clock() {
    let suite = assembler().assemble(&list_zones()).expect("assemble");
    assert_eq!(suite.tool_name.as_str(), "list-zones");
    assert_eq!(suite.category, "dns-management");
    assert_eq!(suite.generated_at, "2023-11-14T22:13:20Z");
    assert_eq!(suite.generated_by, GENERATED_BY);
    assert_eq!(suite.description, "Generated tests for list-zones (dns-management)");
}

#[test]
fn assembling_twice_with_fixed_clock_is_identical() {
    let tool = delete_network_list();
    let first = assembler().assemble(&tool).expect("first");
    let second = assembler().assemble(&tool).expect("second");
    assert_eq!(first, second);
}

#[test]
fn happy_path_includes_all_optional_params_by_default() {
    let tool = list_zones().with_optional(["customer", "contractIds", "groupId", "limit"]);
    let suite = assembler().assemble(&tool).expect("assemble");
    let happy = suite.cases_in(TestCategory::HappyPath).next().expect("happy");
    let keys: Vec<&str> = happy.test_data.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["contractIds", "customer", "groupId", "limit"]);
}

#[test]
fn leading_policy_applies_to_every_data_bearing_generator() {
    let tool = delete_network_list().with_optional(["customer", "contractId", "network"]);
    let suite = assembler()
        .with_policy(OptionalParamPolicy::Leading(1))
        .assemble(&tool)
        .expect("assemble");
    for category in [TestCategory::HappyPath, TestCategory::UxValidation, TestCategory::Safety] {
        let case = suite.cases_in(category).next().expect("case");
        let keys: Vec<&str> = case.test_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["customer", "networkListId"], "category {category}");
    }
}

#[test]
fn user_intent_prefers_first_example_usage() {
    let tool = list_zones().with_examples(["Show me all my DNS zones", "List zones for acme"]);
    let suite = assembler().assemble(&tool).expect("assemble");
    assert!(suite.tests.iter().all(|case| case.user_intent == "Show me all my DNS zones"));
}

#[test]
fn user_intent_fallbacks_differ_between_happy_and_ux() {
    let suite = assembler().assemble(&list_zones()).expect("assemble");
    let happy = suite.cases_in(TestCategory::HappyPath).next().expect("happy");
    let ux = suite.cases_in(TestCategory::UxValidation).next().expect("ux");
    assert!(happy.user_intent.contains("successfully"));
    assert!(ux.user_intent.contains("naturally"));
}

#[test]
fn malformed_descriptor_fails_fast() {
    let tool = list_zones().with_required(["customer"]);
    let err = assembler().assemble(&tool).expect_err("duplicate param");
    assert_eq!(
        err,
        SuiteError::Descriptor(DescriptorError::DuplicateParameter {
            tool: "list-zones".to_string(),
            param: "customer".to_string(),
        })
    );
}

#[test]
fn descriptor_description_overrides_generated_summary() {
    let tool = list_zones().with_description("Lists every zone for a contract.");
    let suite = assembler().assemble(&tool).expect("assemble");
    assert_eq!(suite.description, "Lists every zone for a contract.");
}
