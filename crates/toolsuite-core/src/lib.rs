// crates/toolsuite-core/src/lib.rs
// ============================================================================
// Module: Tool Suite Core
// Description: Template-driven test suite synthesis for externally exposed tools.
// Purpose: Map tool descriptors to ordered, renderable test suites.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! `toolsuite-core` holds the pure half of the test suite synthesizer. A
//! [`ToolDescriptor`] goes in, a [`TestSuite`] comes out; rendering and
//! persistence live in `toolsuite-gen`.
//!
//! ### Design Notes
//! - Suites are always rebuilt from scratch; nothing is patched incrementally.
//! - Generator order is fixed, so the same descriptor and clock always yield the same suite.
//! - Time is read only through [`Clock`], which keeps `generatedAt` and `test-id-*` values
//!   reproducible under test.
//!
//! ## Index
//! - Data model: [`ToolDescriptor`], [`ToolName`], [`RiskLevel`], [`TestCase`], [`TestSuite`]
//! - Synthesis: [`ParamSynthesizer`], [`OptionalParamPolicy`]
//! - Generators: [`CaseGenerator`] and the five template families
//! - Assembly: [`SuiteAssembler`], [`SuiteError`]

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::clock::Clock;
pub use crate::core::clock::FixedClock;
pub use crate::core::clock::SystemClock;
pub use crate::core::descriptor::DescriptorError;
pub use crate::core::descriptor::MAX_TOOL_NAME_BYTES;
pub use crate::core::descriptor::RiskLevel;
pub use crate::core::descriptor::ToolDescriptor;
pub use crate::core::descriptor::ToolName;
pub use crate::core::suite::GENERATED_BY;
pub use crate::core::suite::TestCase;
pub use crate::core::suite::TestCategory;
pub use crate::core::suite::TestData;
pub use crate::core::suite::TestPriority;
pub use crate::core::suite::TestSuite;
pub use crate::runtime::assembler::SuiteAssembler;
pub use crate::runtime::assembler::SuiteError;
pub use crate::runtime::assembler::expected_case_count;
pub use crate::runtime::generators::CaseDraft;
pub use crate::runtime::generators::CaseGenerator;
pub use crate::runtime::generators::EMPTY_CUSTOMER_SENTINEL;
pub use crate::runtime::generators::EdgeCaseGenerator;
pub use crate::runtime::generators::ErrorHandlingGenerator;
pub use crate::runtime::generators::HappyPathGenerator;
pub use crate::runtime::generators::SafetyGenerator;
pub use crate::runtime::generators::UxValidationGenerator;
pub use crate::runtime::generators::needs_edge_case;
pub use crate::runtime::generators::needs_safety_case;
pub use crate::runtime::synthesizer::OptionalParamPolicy;
pub use crate::runtime::synthesizer::ParamSynthesizer;
