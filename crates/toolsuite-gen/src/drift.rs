// crates/toolsuite-gen/src/drift.rs
// ============================================================================
// Module: Suite Drift Detection
// Description: Compares stored suites with freshly rendered output.
// Purpose: Detect generated files that no longer match the registry.
// Dependencies: regex, toolsuite-core
// ============================================================================

//! ## Overview
//! Rendered suites are deterministic except for two volatile fields: the
//! header `Generated:` timestamp and `test-id-<millis>` parameter values.
//! [`VolatileMask`] blanks both so a stored file compares equal to a fresh
//! rendering of the same descriptor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use toolsuite_core::TestSuite;

use crate::lifecycle::LifecycleError;
use crate::render::GENERATED_AT_PREFIX;
use crate::render::RenderOptions;
use crate::render::render_suite;
use crate::store::SuiteStore;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Drift classification for a single tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftStatus {
    /// Stored suite matches the rendered suite.
    UpToDate,
    /// Tool is registered but has no stored suite.
    Missing,
    /// Stored suite differs from the rendered suite.
    Drifted,
    /// Stored suite has no registry entry.
    Stale,
}

impl DriftStatus {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpToDate => "up-to-date",
            Self::Missing => "missing",
            Self::Drifted => "drifted",
            Self::Stale => "stale",
        }
    }

    /// Returns true when no regeneration is needed.
    #[must_use]
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::UpToDate)
    }
}

// ============================================================================
// SECTION: Masking
// ============================================================================

/// Masks volatile fields in rendered suites.
#[derive(Debug, Clone)]
pub struct VolatileMask {
    /// Matches the header timestamp line.
    generated_at: Regex,
    /// Matches synthesized identifier values.
    test_id: Regex,
}

impl VolatileMask {
    /// Compiles the masking patterns.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let generated_at = Regex::new(&format!(r"(?m)^{}.*$", regex::escape(GENERATED_AT_PREFIX)))?;
        let test_id = Regex::new(r#""test-id-[0-9]+""#)?;
        Ok(Self {
            generated_at,
            test_id,
        })
    }

    /// Returns `content` with volatile fields replaced by placeholders.
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        let header = format!("{GENERATED_AT_PREFIX}<timestamp>");
        let masked = self.generated_at.replace_all(content, header.as_str());
        self.test_id.replace_all(&masked, "\"test-id-<millis>\"").into_owned()
    }

    /// Classifies stored content against freshly rendered content.
    #[must_use]
    pub fn compare(&self, stored: Option<&str>, rendered: &str) -> DriftStatus {
        match stored {
            None => DriftStatus::Missing,
            Some(stored) if self.apply(stored) == self.apply(rendered) => DriftStatus::UpToDate,
            Some(_) => DriftStatus::Drifted,
        }
    }
}

// ============================================================================
// SECTION: Suite Check
// ============================================================================

/// Classifies the stored file for `suite` against a fresh rendering.
///
/// # Errors
///
/// Returns [`LifecycleError`] when the suite cannot be rendered or the store cannot be read.
pub fn check_suite<S: SuiteStore>(
    store: &S,
    suite: &TestSuite,
    options: &RenderOptions,
    mask: &VolatileMask,
) -> Result<DriftStatus, LifecycleError> {
    let rendered = render_suite(suite, options)?;
    let stored = store.read(&suite.tool_name)?;
    Ok(mask.compare(stored.as_deref(), &rendered))
}
