// crates/toolsuite-gen/src/lib.rs
// ============================================================================
// Module: Tool Suite Generator
// Description: Rendering, persistence, and lifecycle management for test suites.
// Purpose: Turn assembled suites into generated test files that track the registry.
// Dependencies: regex, serde, serde_json, thiserror, toolsuite-core, tracing
// ============================================================================

//! ## Overview
//! `toolsuite-gen` is the effectful half of the synthesizer. It renders
//! [`toolsuite_core::TestSuite`] values to TypeScript test files, persists them
//! through a [`SuiteStore`], and applies add/modify/remove triggers with
//! [`SuiteLifecycle`].
//!
//! Registry and change-set inputs are untrusted JSON and are read with size
//! limits. [`VolatileMask`] supports drift checks that ignore timestamps.

pub mod drift;
pub mod lifecycle;
pub mod registry;
pub mod render;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use drift::DriftStatus;
pub use drift::VolatileMask;
pub use drift::check_suite;
pub use lifecycle::Applied;
pub use lifecycle::LifecycleError;
pub use lifecycle::LifecycleReport;
pub use lifecycle::SuiteLifecycle;
pub use lifecycle::SuiteState;
pub use lifecycle::ToolOutcome;
pub use lifecycle::Trigger;
pub use registry::ChangeSet;
pub use registry::MAX_REGISTRY_BYTES;
pub use registry::RECONCILE_CHANGE;
pub use registry::RegistryError;
pub use registry::RejectedEntry;
pub use registry::RemovedTool;
pub use registry::ToolModification;
pub use registry::ToolRegistry;
pub use render::DEFAULT_CLIENT_IMPORT;
pub use render::DEFAULT_CLIENT_TYPE;
pub use render::GENERATED_AT_PREFIX;
pub use render::RenderError;
pub use render::RenderOptions;
pub use render::render_suite;
pub use store::DEFAULT_EXTENSION;
pub use store::FileSuiteStore;
pub use store::MemorySuiteStore;
pub use store::RemoveOutcome;
pub use store::StoreError;
pub use store::SuiteStore;
