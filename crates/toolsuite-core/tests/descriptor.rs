// crates/toolsuite-core/tests/descriptor.rs
// ============================================================================
// Module: Tool Descriptor Tests
// Description: Wire format, name validation, and fail-fast descriptor checks.
// ============================================================================
//! ## Overview
//! Descriptors arrive from an external registry, so these tests pin the JSON
//! shape and make sure malformed entries are rejected with descriptive errors.

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
use toolsuite_core::MAX_TOOL_NAME_BYTES;
use toolsuite_core::RiskLevel;
use toolsuite_core::ToolDescriptor;
use toolsuite_core::ToolName;

#[test]
fn descriptor_parses_camel_case_wire_format() {
    let value = json!({
        "name": "delete-network-list",
        "category": "network-lists",
        "requiredParams": ["networkListId"],
        "optionalParams": ["customer"],
        "exampleUsage": ["Delete the blocklist"],
        "riskLevel": "high"
    });
    let tool: ToolDescriptor = serde_json::from_value(value).expect("descriptor");
    assert_eq!(tool.name.as_str(), "delete-network-list");
    assert_eq!(tool.required_params, vec!["networkListId".to_string()]);
    assert_eq!(tool.risk_level, RiskLevel::High);
    assert_eq!(tool.primary_example(), Some("Delete the blocklist"));
}

#[test]
fn optional_fields_default() {
    let value = json!({ "name": "list-zones", "category": "dns", "requiredParams": [] });
    let tool: ToolDescriptor = serde_json::from_value(value).expect("descriptor");
    assert!(tool.optional_params.is_empty());
    assert!(tool.example_usage.is_empty());
    assert_eq!(tool.risk_level, RiskLevel::Low);
}

#[test]
fn missing_required_params_is_rejected() {
    let value = json!({ "name": "list-zones", "category": "dns" });
    let err = serde_json::from_value::<ToolDescriptor>(value).expect_err("missing field");
    assert!(err.to_string().contains("requiredParams"));
}

#[test]
fn invalid_names_are_rejected_on_deserialize() {
    for name in ["", "List-Zones", "list--zones", "../etc", "list zones", "-list"] {
        let value = json!({ "name": name, "category": "dns", "requiredParams": [] });
        assert!(serde_json::from_value::<ToolDescriptor>(value).is_err(), "accepted `{name}`");
    }
}

#[test]
fn dotted_and_kebab_names_are_accepted() {
    for name in ["list-zones", "property.create", "agent.property.analysis", "edgeworker-v2"] {
        assert!(ToolName::parse(name).is_ok(), "rejected `{name}`");
    }
}

#[test]
fn overlong_names_are_rejected() {
    let name = "a".repeat(MAX_TOOL_NAME_BYTES + 1);
    assert!(matches!(ToolName::parse(name), Err(DescriptorError::InvalidName { .. })));
}

#[test]
fn validate_rejects_empty_category() {
    let tool = ToolDescriptor::new(ToolName::parse("list-zones").expect("name"), "  ");
    assert_eq!(
        tool.validate(),
        Err(DescriptorError::EmptyField {
            tool: "list-zones".to_string(),
            field: "category",
        })
    );
}

#[test]
fn validate_rejects_blank_parameters() {
    let tool = ToolDescriptor::new(ToolName::parse("list-zones").expect("name"), "dns")
        .with_optional(["customer", " "]);
    assert!(matches!(tool.validate(), Err(DescriptorError::BlankParameter { .. })));
}

#[test]
fn validate_rejects_duplicates_within_a_list() {
    let tool = ToolDescriptor::new(ToolName::parse("get-zone").expect("name"), "dns")
        .with_required(["zone", "zone"]);
    assert!(matches!(
        tool.validate(),
        Err(DescriptorError::DuplicateParameter { param, .. }) if param == "zone"
    ));
}

#[test]
fn tool_name_round_trips_as_plain_string() {
    let name = ToolName::parse("list-zones").expect("name");
    assert_eq!(serde_json::to_value(&name).expect("serialize"), json!("list-zones"));
}
