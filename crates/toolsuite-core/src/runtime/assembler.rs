// crates/toolsuite-core/src/runtime/assembler.rs
// ============================================================================
// Module: Test Suite Assembler
// Description: Runs the generator families in fixed order and wraps the result.
// Purpose: Build a complete, deterministic test suite for one tool descriptor.
// Dependencies: thiserror, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! The assembler validates a descriptor, runs every generator in the fixed
//! order (happy-path, error-handling, edge-case, ux-validation, safety),
//! assigns `{toolName}-{category}-{n}` ids and stamps suite metadata. It
//! performs no I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::clock::Clock;
use crate::core::descriptor::DescriptorError;
use crate::core::descriptor::ToolDescriptor;
use crate::core::suite::GENERATED_BY;
use crate::core::suite::TestCategory;
use crate::core::suite::TestSuite;
use crate::runtime::generators::CaseGenerator;
use crate::runtime::generators::EdgeCaseGenerator;
use crate::runtime::generators::ErrorHandlingGenerator;
use crate::runtime::generators::HappyPathGenerator;
use crate::runtime::generators::SafetyGenerator;
use crate::runtime::generators::UxValidationGenerator;
use crate::runtime::generators::needs_edge_case;
use crate::runtime::generators::needs_safety_case;
use crate::runtime::synthesizer::OptionalParamPolicy;
use crate::runtime::synthesizer::ParamSynthesizer;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while assembling a suite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiteError {
    /// Descriptor failed validation.
    #[error("configuration error: {0}")]
    Descriptor(#[from] DescriptorError),
    /// Clock reading could not be formatted.
    #[error("timestamp error: {0}")]
    Timestamp(String),
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Builds test suites from tool descriptors.
///
/// # Invariants
/// - For a fixed clock and descriptor, output is identical across calls.
#[derive(Debug, Clone)]
pub struct SuiteAssembler<C> {
    /// Parameter synthesizer shared by every generator.
    synth: ParamSynthesizer<C>,
}

impl<C: Clock> SuiteAssembler<C> {
    /// Creates an assembler using `clock` and the default optional-parameter policy.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            synth: ParamSynthesizer::new(clock),
        }
    }

    /// Replaces the optional parameter policy.
    #[must_use]
    pub fn with_policy(mut self, policy: OptionalParamPolicy) -> Self {
        self.synth = self.synth.with_policy(policy);
        self
    }

    /// Returns the synthesizer used by the generators.
    #[must_use]
    pub const fn synthesizer(&self) -> &ParamSynthesizer<C> {
        &self.synth
    }

    /// Assembles the suite for `tool`.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Descriptor`] when the descriptor is malformed and
    /// [`SuiteError::Timestamp`] when the clock reading cannot be formatted.
    pub fn assemble(&self, tool: &ToolDescriptor) -> Result<TestSuite, SuiteError> {
        tool.validate()?;
        let generators: [&dyn CaseGenerator<C>; 5] = [
            &HappyPathGenerator,
            &ErrorHandlingGenerator,
            &EdgeCaseGenerator,
            &UxValidationGenerator,
            &SafetyGenerator,
        ];
        let mut sequences: BTreeMap<TestCategory, usize> = BTreeMap::new();
        let mut tests = Vec::new();
        for generator in generators {
            let category = generator.category();
            for draft in generator.generate(tool, &self.synth) {
                let sequence = sequences.entry(category).or_insert(0);
                *sequence += 1;
                let id = format!("{}-{}-{}", tool.name, category, sequence);
                tests.push(draft.into_case(id));
            }
        }
        let generated_at = self
            .synth
            .clock()
            .rfc3339()
            .map_err(|err| SuiteError::Timestamp(err.to_string()))?;
        Ok(TestSuite {
            tool_name: tool.name.clone(),
            category: tool.category.clone(),
            description: suite_description(tool),
            generated_at,
            generated_by: GENERATED_BY.to_string(),
            tests,
        })
    }
}

/// Returns the suite description, falling back to a generated summary.
fn suite_description(tool: &ToolDescriptor) -> String {
    let description = tool.description.trim();
    if description.is_empty() {
        format!("Generated tests for {} ({})", tool.name, tool.category)
    } else {
        description.to_string()
    }
}

/// Returns the number of cases the assembler produces for `tool`.
///
/// One each for happy-path, error-handling and ux-validation, plus the gated edge and safety
/// cases.
#[must_use]
pub fn expected_case_count(tool: &ToolDescriptor) -> usize {
    3 + usize::from(needs_edge_case(tool))
        + usize::from(needs_safety_case(tool))
}
