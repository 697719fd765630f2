// crates/toolsuite-core/src/runtime/mod.rs
// ============================================================================
// Module: Tool Suite Runtime
// Description: Parameter synthesis, case generators, and suite assembly.
// Purpose: Turn tool descriptors into ordered test suites without I/O.
// Dependencies: crate::core
// ============================================================================

//! Pure synthesis pipeline: synthesizer, generators, assembler.

pub mod assembler;
pub mod generators;
pub mod synthesizer;
