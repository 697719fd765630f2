// crates/toolsuite-gen/src/render.rs
// ============================================================================
// Module: Test File Renderer
// Description: Serializes assembled test suites into TypeScript test sources.
// Purpose: Emit deterministic describe/test files that drive an external test client.
// Dependencies: serde_json, toolsuite-core
// ============================================================================

//! ## Overview
//! [`render_suite`] turns a [`TestSuite`] into a Jest-style TypeScript file:
//! a header block, the test-client import, one top-level `describe` that
//! connects and disconnects the client, and one nested `describe` per test
//! category in first-appearance order.
//!
//! Each test invokes `client.callTool(name, testData)` and asserts only that
//! the response and its content are defined. Validation criteria are emitted
//! as line comments and are never executed.
//!
//! ### Security Posture
//! Descriptor text is untrusted. Identifiers and payloads are emitted as JSON
//! string literals, comment text is collapsed to a single line, and `*/` is
//! defused inside block comments so registry content cannot alter the file
//! structure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use thiserror::Error;
use toolsuite_core::TestCase;
use toolsuite_core::TestData;
use toolsuite_core::TestSuite;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default import path of the test-client module, relative to the output directory.
pub const DEFAULT_CLIENT_IMPORT: &str = "../../src/testing/test-client";

/// Default exported class name of the test client.
pub const DEFAULT_CLIENT_TYPE: &str = "TestClient";

/// Marker line prefix carrying the generation timestamp.
pub const GENERATED_AT_PREFIX: &str = " * Generated: ";

/// Indentation of statements inside a rendered `test` body.
const BODY_INDENT: &str = "      ";

// ============================================================================
// SECTION: Options and Errors
// ============================================================================

/// Errors raised while rendering a suite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Test data could not be serialized.
    #[error("json error: {0}")]
    Json(String),
}

/// Rendering options shared by every suite in a batch.
///
/// # Invariants
/// - `client_type` is a valid TypeScript identifier chosen by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Module path the test client is imported from.
    pub client_import: String,
    /// Exported class name of the test client.
    pub client_type: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            client_import: DEFAULT_CLIENT_IMPORT.to_string(),
            client_type: DEFAULT_CLIENT_TYPE.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Suite Rendering
// ============================================================================

/// Renders a suite into TypeScript test source.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if test data cannot be serialized.
pub fn render_suite(suite: &TestSuite, options: &RenderOptions) -> Result<String, RenderError> {
    let mut out = String::new();
    render_header(&mut out, suite);

    out.push_str("import { ");
    out.push_str(&options.client_type);
    out.push_str(" } from ");
    out.push_str(&string_literal(&options.client_import));
    out.push_str(";\n\n");

    out.push_str("describe(");
    out.push_str(&string_literal(suite.tool_name.as_str()));
    out.push_str(", () => {\n");
    let _ = writeln!(out, "  let client: {};\n", options.client_type);
    out.push_str("  beforeAll(async () => {\n");
    let _ = writeln!(out, "    client = new {}();", options.client_type);
    out.push_str("    await client.connect();\n");
    out.push_str("  });\n\n");
    out.push_str("  afterAll(async () => {\n");
    out.push_str("    await client.disconnect();\n");
    out.push_str("  });\n");

    for category in suite.categories() {
        out.push_str("\n  describe(");
        out.push_str(&string_literal(category.title()));
        out.push_str(", () => {\n");
        let mut first = true;
        for case in suite.cases_in(category) {
            if !first {
                out.push('\n');
            }
            first = false;
            render_case(&mut out, suite, case)?;
        }
        out.push_str("  });\n");
    }
    out.push_str("});\n");
    Ok(out)
}

/// Emits the fixed header block.
fn render_header(out: &mut String, suite: &TestSuite) {
    out.push_str("// This file is @generated by toolsuite. DO NOT EDIT.\n");
    out.push_str("/**\n");
    out.push_str(" * Test suite: ");
    out.push_str(&block_comment_text(suite.tool_name.as_str()));
    out.push('\n');
    out.push_str(" * Category: ");
    out.push_str(&block_comment_text(&suite.category));
    out.push('\n');
    out.push_str(GENERATED_AT_PREFIX);
    out.push_str(&block_comment_text(&suite.generated_at));
    out.push('\n');
    out.push_str(" * Generated by: ");
    out.push_str(&block_comment_text(&suite.generated_by));
    out.push('\n');
    out.push_str(" *\n");
    out.push_str(" * ");
    out.push_str(&block_comment_text(&suite.description));
    out.push('\n');
    out.push_str(" */\n\n");
}

/// Emits one `test` declaration.
fn render_case(out: &mut String, suite: &TestSuite, case: &TestCase) -> Result<(), RenderError> {
    out.push_str("    test(");
    out.push_str(&string_literal(&case.name));
    out.push_str(", async () => {\n");

    line_comment(out, &format!("{} (priority: {})", case.id, case.priority));
    line_comment(out, &case.description);
    line_comment(out, &format!("User intent: {}", case.user_intent));
    if !case.expected_workflow.is_empty() {
        line_comment(out, "Expected workflow:");
        for (index, step) in case.expected_workflow.iter().enumerate() {
            line_comment(out, &format!("  {}. {step}", index + 1));
        }
    }

    out.push_str(BODY_INDENT);
    out.push_str("const response = await client.callTool(");
    out.push_str(&string_literal(suite.tool_name.as_str()));
    out.push_str(", ");
    out.push_str(&test_data_literal(&case.test_data)?);
    out.push_str(");\n\n");

    out.push_str(BODY_INDENT);
    out.push_str("expect(response).toBeDefined();\n");
    out.push_str(BODY_INDENT);
    out.push_str("expect(response.content).toBeDefined();\n");

    if !case.validation_criteria.is_empty() {
        out.push('\n');
        line_comment(out, "Validation criteria:");
        for criterion in &case.validation_criteria {
            line_comment(out, &format!("- {criterion}"));
        }
    }
    out.push_str("    });\n");
    Ok(())
}

// ============================================================================
// SECTION: Literals and Comments
// ============================================================================

/// Renders test data as an object literal aligned with the test body.
fn test_data_literal(data: &TestData) -> Result<String, RenderError> {
    if data.is_empty() {
        return Ok("{}".to_string());
    }
    let json = serde_json::to_string_pretty(data).map_err(|err| RenderError::Json(err.to_string()))?;
    let mut rendered = String::new();
    for (index, line) in json.lines().enumerate() {
        if index > 0 {
            rendered.push('\n');
            rendered.push_str(BODY_INDENT);
        }
        rendered.push_str(line);
    }
    Ok(rendered)
}

/// Emits a single body-level line comment.
fn line_comment(out: &mut String, text: &str) {
    let text = comment_text(text);
    out.push_str(BODY_INDENT);
    if text.is_empty() {
        out.push_str("//\n");
    } else {
        out.push_str("// ");
        out.push_str(&text);
        out.push('\n');
    }
}

/// Collapses whitespace so comment text stays on one line.
///
/// Leading spaces are preserved for indented list items.
fn comment_text(value: &str) -> String {
    let indent = value.len() - value.trim_start_matches(' ').len();
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{}{collapsed}", " ".repeat(indent.min(4)))
}

/// Normalizes text for a block comment and defuses terminators.
fn block_comment_text(value: &str) -> String {
    comment_text(value).trim_start().replace("*/", "* /")
}

/// Renders a string as a TypeScript string literal.
///
/// Uses JSON encoding for correct escaping; falls back to a best-effort quoted
/// string on error.
fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "\\\"")))
}
