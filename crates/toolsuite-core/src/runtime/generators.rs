// crates/toolsuite-core/src/runtime/generators.rs
// ============================================================================
// Module: Test Case Generators
// Description: Template families mapping a tool descriptor to test cases.
// Purpose: Produce happy-path, error, edge, ux, and safety scenarios independently.
// Dependencies: crate::core, crate::runtime::synthesizer
// ============================================================================

//! ## Overview
//! Each generator is a pure mapping from a [`ToolDescriptor`] to zero or more
//! [`CaseDraft`] records. Generators share no state and do not depend on each
//! other; the assembler owns ordering and id assignment.
//!
//! Gating conditions live in named predicates ([`needs_edge_case`],
//! [`needs_safety_case`]) so they can be tested on their own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::clock::Clock;
use crate::core::descriptor::RiskLevel;
use crate::core::descriptor::ToolDescriptor;
use crate::core::suite::TestCase;
use crate::core::suite::TestCategory;
use crate::core::suite::TestData;
use crate::core::suite::TestPriority;
use crate::runtime::synthesizer::ParamSynthesizer;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Customer value signaling "no data" to the system under test.
pub const EMPTY_CUSTOMER_SENTINEL: &str = "test-empty";

/// Substring in a tool name that marks it as a listing tool.
const LIST_MARKER: &str = "list";

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Returns true when the tool gets an empty-result edge case.
#[must_use]
pub fn needs_edge_case(tool: &ToolDescriptor) -> bool {
    tool.name.as_str().contains(LIST_MARKER)
}

/// Returns true when the tool gets a safety case.
#[must_use]
pub fn needs_safety_case(tool: &ToolDescriptor) -> bool {
    tool.risk_level == RiskLevel::High
}

// ============================================================================
// SECTION: Case Drafts
// ============================================================================

/// Test case content before the assembler assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseDraft {
    /// Human-readable test name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Scenario family.
    pub category: TestCategory,
    /// Priority label.
    pub priority: TestPriority,
    /// Narrated user intent.
    pub user_intent: String,
    /// Narrative workflow steps.
    pub expected_workflow: Vec<String>,
    /// Checklist rendered as comments.
    pub validation_criteria: Vec<String>,
    /// Parameters passed to the tool under test.
    pub test_data: TestData,
}

impl CaseDraft {
    /// Finalizes the draft with its suite-unique id.
    #[must_use]
    pub fn into_case(self, id: String) -> TestCase {
        TestCase {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            priority: self.priority,
            user_intent: self.user_intent,
            expected_workflow: self.expected_workflow,
            validation_criteria: self.validation_criteria,
            test_data: self.test_data,
        }
    }
}

// ============================================================================
// SECTION: Generator Interface
// ============================================================================

/// A template family producing test cases for one category.
pub trait CaseGenerator<C: Clock> {
    /// Category every produced case belongs to.
    fn category(&self) -> TestCategory;

    /// Produces zero or more drafts for `tool`.
    fn generate(&self, tool: &ToolDescriptor, synth: &ParamSynthesizer<C>) -> Vec<CaseDraft>;
}

/// Returns the tool's first example usage or the supplied fallback.
fn intent_or(tool: &ToolDescriptor, fallback: impl FnOnce() -> String) -> String {
    tool.primary_example().map_or_else(fallback, str::to_string)
}

/// Converts borrowed step text into owned strings.
fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Nominal invocation with every synthesized parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct HappyPathGenerator;

impl<C: Clock> CaseGenerator<C> for HappyPathGenerator {
    fn category(&self) -> TestCategory {
        TestCategory::HappyPath
    }

    fn generate(&self, tool: &ToolDescriptor, synth: &ParamSynthesizer<C>) -> Vec<CaseDraft> {
        vec![CaseDraft {
            name: format!("should execute {} successfully", tool.name),
            description: format!(
                "Invokes {} ({}) with valid parameters and expects a well-formed response.",
                tool.name, tool.category
            ),
            category: TestCategory::HappyPath,
            priority: TestPriority::High,
            user_intent: intent_or(tool, || format!("Use {} successfully", tool.name)),
            expected_workflow: vec![
                "Client connects to the tool server".to_string(),
                format!("Client calls {} with valid parameters", tool.name),
                "Server returns a response with content".to_string(),
            ],
            validation_criteria: lines(&[
                "Response is returned without errors",
                "Response content is present and non-empty",
                "Response content matches the requested operation",
            ]),
            test_data: synth.test_data(tool),
        }]
    }
}

/// Invocation with no parameters to exercise missing-parameter handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandlingGenerator;

impl<C: Clock> CaseGenerator<C> for ErrorHandlingGenerator {
    fn category(&self) -> TestCategory {
        TestCategory::ErrorHandling
    }

    fn generate(&self, tool: &ToolDescriptor, _synth: &ParamSynthesizer<C>) -> Vec<CaseDraft> {
        let mut criteria = lines(&[
            "Missing parameters produce a descriptive error message",
            "Error response does not crash the server",
        ]);
        if !tool.required_params.is_empty() {
            criteria.push(format!(
                "Error names the required parameters: {}",
                tool.required_params.join(", ")
            ));
        }
        vec![CaseDraft {
            name: format!("should handle missing parameters for {}", tool.name),
            description: format!(
                "Invokes {} with no parameters and expects a graceful, actionable error.",
                tool.name
            ),
            category: TestCategory::ErrorHandling,
            priority: TestPriority::Medium,
            user_intent: intent_or(tool, || {
                format!("Use {} without providing required details", tool.name)
            }),
            expected_workflow: vec![
                format!("Client calls {} with an empty parameter set", tool.name),
                "Server validates the request".to_string(),
                "Server reports which parameters are missing".to_string(),
            ],
            validation_criteria: criteria,
            test_data: TestData::new(),
        }]
    }
}

/// Empty-result handling for listing tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeCaseGenerator;

impl<C: Clock> CaseGenerator<C> for EdgeCaseGenerator {
    fn category(&self) -> TestCategory {
        TestCategory::EdgeCase
    }

    fn generate(&self, tool: &ToolDescriptor, _synth: &ParamSynthesizer<C>) -> Vec<CaseDraft> {
        if !needs_edge_case(tool) {
            return Vec::new();
        }
        let mut test_data = TestData::new();
        test_data.insert("customer".to_string(), EMPTY_CUSTOMER_SENTINEL.into());
        vec![CaseDraft {
            name: format!("should handle empty results for {}", tool.name),
            description: format!(
                "Invokes {} for a customer with no data and expects an empty, well-formed listing.",
                tool.name
            ),
            category: TestCategory::EdgeCase,
            priority: TestPriority::Medium,
            user_intent: intent_or(tool, || {
                format!("List results with {} when nothing exists yet", tool.name)
            }),
            expected_workflow: vec![
                format!("Client calls {} for an account with no data", tool.name),
                "Server returns an empty result set".to_string(),
            ],
            validation_criteria: lines(&[
                "Empty results are reported clearly",
                "No error is raised for an empty listing",
                "Response suggests a next step when nothing is found",
            ]),
            test_data,
        }]
    }
}

/// Nominal invocation narrated as a natural-language request.
#[derive(Debug, Clone, Copy, Default)]
pub struct UxValidationGenerator;

impl<C: Clock> CaseGenerator<C> for UxValidationGenerator {
    fn category(&self) -> TestCategory {
        TestCategory::UxValidation
    }

    fn generate(&self, tool: &ToolDescriptor, synth: &ParamSynthesizer<C>) -> Vec<CaseDraft> {
        vec![CaseDraft {
            name: format!("should provide a clear experience for {}", tool.name),
            description: format!(
                "Checks that {} responds in a form a user can act on without extra context.",
                tool.name
            ),
            category: TestCategory::UxValidation,
            priority: TestPriority::Medium,
            user_intent: intent_or(tool, || format!("Use {} naturally", tool.name)),
            expected_workflow: vec![
                "User expresses intent in natural language".to_string(),
                format!("Assistant selects {} and fills in parameters", tool.name),
                "Assistant presents the result to the user".to_string(),
            ],
            validation_criteria: lines(&[
                "Response is human-readable",
                "Response highlights the key outcome first",
                "Identifiers in the response can be reused in follow-up calls",
            ]),
            test_data: synth.test_data(tool),
        }]
    }
}

/// Guard rails for destructive or production-affecting tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyGenerator;

impl<C: Clock> CaseGenerator<C> for SafetyGenerator {
    fn category(&self) -> TestCategory {
        TestCategory::Safety
    }

    fn generate(&self, tool: &ToolDescriptor, synth: &ParamSynthesizer<C>) -> Vec<CaseDraft> {
        if !needs_safety_case(tool) {
            return Vec::new();
        }
        vec![CaseDraft {
            name: format!("should enforce safety checks for {}", tool.name),
            description: format!(
                "Verifies {} is guarded against unintended destructive changes.",
                tool.name
            ),
            category: TestCategory::Safety,
            priority: TestPriority::Critical,
            user_intent: intent_or(tool, || {
                format!("Run {} without unintended side effects", tool.name)
            }),
            expected_workflow: vec![
                format!("Client calls {} against a non-production target", tool.name),
                "Server confirms the scope of the change".to_string(),
                "Server applies the change only to the requested resource".to_string(),
            ],
            validation_criteria: lines(&[
                "Destructive actions state their impact before applying",
                "Production resources are not modified by test data",
                "Response includes enough detail to audit the change",
            ]),
            test_data: synth.test_data(tool),
        }]
    }
}
