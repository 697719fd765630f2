// crates/toolsuite-core/src/core/mod.rs
// ============================================================================
// Module: Tool Suite Data Model
// Description: Descriptors, suite records, and the time source.
// Purpose: Group the canonical data shapes shared by synthesis and rendering.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! Canonical data model for suite synthesis.

pub mod clock;
pub mod descriptor;
pub mod suite;
