// crates/toolsuite-core/src/core/suite.rs
// ============================================================================
// Module: Test Suite Model
// Description: Test case and test suite records produced by synthesis.
// Purpose: Provide the canonical, serializable shapes consumed by renderers.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`TestSuite`] is the ordered output of the suite assembler for one tool.
//! Everything except `test_data` and the two timestamps is documentation that
//! renderers reproduce as comments; only the tool invocation and its baseline
//! structural assertions are executable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::descriptor::ToolName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Attribution stamped on every generated suite.
pub const GENERATED_BY: &str = "toolsuite test generation engine";

// ============================================================================
// SECTION: Test Categories
// ============================================================================

/// Scenario family a test case belongs to.
///
/// # Invariants
/// - Labels are stable; they appear in test case ids and rendered output.
/// - Declaration order matches the fixed generator order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestCategory {
    /// Nominal invocation with a full parameter set.
    HappyPath,
    /// Invocation without required parameters.
    ErrorHandling,
    /// Empty-result handling for listing tools.
    EdgeCase,
    /// Natural-language phrasing of the nominal case.
    UxValidation,
    /// Guard rails for high-risk tools.
    Safety,
}

impl TestCategory {
    /// Every category in fixed generator order.
    pub const ALL: [Self; 5] =
        [Self::HappyPath, Self::ErrorHandling, Self::EdgeCase, Self::UxValidation, Self::Safety];

    /// Returns the stable kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HappyPath => "happy-path",
            Self::ErrorHandling => "error-handling",
            Self::EdgeCase => "edge-case",
            Self::UxValidation => "ux-validation",
            Self::Safety => "safety",
        }
    }

    /// Returns the display title used for rendered test groups.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HappyPath => "Happy Path",
            Self::ErrorHandling => "Error Handling",
            Self::EdgeCase => "Edge Cases",
            Self::UxValidation => "UX Validation",
            Self::Safety => "Safety",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority carried through to rendered output.
///
/// Priority never alters case ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestPriority {
    /// Nice to have.
    Low,
    /// Default priority.
    Medium,
    /// Core behavior.
    High,
    /// Must never regress.
    Critical,
}

impl TestPriority {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// Parameter payload passed to the tool under test, keyed by parameter name.
pub type TestData = BTreeMap<String, Value>;

/// One synthesized test scenario.
///
/// # Invariants
/// - `id` is `{toolName}-{category}-{sequence}` and unique within its suite.
/// - `validation_criteria` are documentation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Suite-unique identifier.
    pub id: String,
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

// ============================================================================
// SECTION: Test Suite
// ============================================================================

/// Ordered collection of test cases for one tool.
///
/// # Invariants
/// - `tests` follow the fixed generator order: happy-path, error-handling, edge-case,
///   ux-validation, safety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    /// Tool the suite exercises.
    pub tool_name: ToolName,
    /// Tool category label.
    pub category: String,
    /// Suite description.
    pub description: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// Attribution string, always [`GENERATED_BY`].
    pub generated_by: String,
    /// Ordered test cases.
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Returns the distinct categories present, in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<TestCategory> {
        let mut seen = Vec::new();
        for case in &self.tests {
            if !seen.contains(&case.category) {
                seen.push(case.category);
            }
        }
        seen
    }

    /// Returns the cases belonging to a category, in suite order.
    pub fn cases_in(&self, category: TestCategory) -> impl Iterator<Item = &TestCase> {
        self.tests.iter().filter(move |case| case.category == category)
    }

    /// Counts cases belonging to a category.
    #[must_use]
    pub fn count_in(&self, category: TestCategory) -> usize {
        self.cases_in(category).count()
    }
}
