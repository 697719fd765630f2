// crates/toolsuite-gen/src/lifecycle.rs
// ============================================================================
// Module: Suite Lifecycle Manager
// Description: Applies add/modify/remove triggers to generated test suites.
// Purpose: Keep one generated file per registered tool, continuing past per-tool failures.
// Dependencies: thiserror, tracing, toolsuite-core, crate::render, crate::store
// ============================================================================

//! ## Overview
//! Each tool's suite is either [`SuiteState::Absent`] or
//! [`SuiteState::Present`]. Triggers move it between the two:
//!
//! | Trigger  | Action                                   | Result state |
//! |----------|------------------------------------------|--------------|
//! | added    | assemble + render + write                | present      |
//! | modified | assemble + render + overwrite            | present      |
//! | removed  | delete; a missing file is not an error   | absent       |
//!
//! A [`ChangeSet`] is processed sequentially (added, then modified, then
//! removed). The manager holds its store mutably, so writes to a given tool
//! path are serialized. A failure for one tool is logged and recorded in the
//! [`LifecycleReport`]; remaining tools are still processed. Input entries
//! that never converted into descriptors are carried into the report as
//! rejections and count as failures.
//!
//! Writes never depend on the previous file's content: presence is checked
//! with [`SuiteStore::exists`], so an unreadable suite is still overwritten.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use toolsuite_core::Clock;
use toolsuite_core::SuiteAssembler;
use toolsuite_core::SuiteError;
use toolsuite_core::ToolDescriptor;
use toolsuite_core::ToolName;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::drift::DriftStatus;
use crate::drift::VolatileMask;
use crate::drift::check_suite;
use crate::registry::ChangeSet;
use crate::registry::RejectedEntry;
use crate::registry::ToolRegistry;
use crate::render::RenderError;
use crate::render::RenderOptions;
use crate::render::render_suite;
use crate::store::RemoveOutcome;
use crate::store::StoreError;
use crate::store::SuiteStore;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Per-tool failure during a lifecycle batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Descriptor was malformed or the suite could not be assembled.
    #[error("{0}")]
    Suite(#[from] SuiteError),
    /// Suite could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// Suite could not be persisted or removed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Presence of a tool's generated suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    /// No generated file exists.
    Absent,
    /// A generated file exists.
    Present,
}

/// Trigger that caused a lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// New tool detected.
    Added,
    /// Existing tool's analysis changed.
    Modified,
    /// Tool removed from the registry.
    Removed,
}

impl Trigger {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Successful lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Suite was written.
    Written {
        /// Number of test cases in the suite.
        tests: usize,
        /// Location of the written suite.
        location: String,
        /// State before the write.
        previous: SuiteState,
    },
    /// Suite was deleted.
    Removed,
    /// Suite was already absent.
    AlreadyAbsent,
}

/// Outcome of one lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Tool acted upon.
    pub tool: ToolName,
    /// Trigger that caused the action.
    pub trigger: Trigger,
    /// Action result.
    pub result: Result<Applied, LifecycleError>,
}

/// Ordered outcomes for a lifecycle batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Outcomes in processing order.
    pub outcomes: Vec<ToolOutcome>,
    /// Input entries that could not be converted into descriptors.
    pub rejected: Vec<RejectedEntry>,
}

impl LifecycleReport {
    /// Returns outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ToolOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    /// Returns true when every action succeeded and no entry was rejected.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rejected.is_empty() && self.failures().next().is_none()
    }

    /// Counts written suites.
    #[must_use]
    pub fn written(&self) -> usize {
        self.count(|applied| matches!(applied, Applied::Written { .. }))
    }

    /// Counts deleted suites, including already-absent ones.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count(|applied| matches!(applied, Applied::Removed | Applied::AlreadyAbsent))
    }

    /// Counts failed actions and rejected entries.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures().count() + self.rejected.len()
    }

    /// Counts successful outcomes matching `predicate`.
    fn count(&self, predicate: impl Fn(&Applied) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.as_ref().is_ok_and(&predicate))
            .count()
    }
}

// ============================================================================
// SECTION: Lifecycle Manager
// ============================================================================

/// Applies lifecycle triggers to a suite store.
#[derive(Debug)]
pub struct SuiteLifecycle<S, C> {
    /// Persistence backend.
    store: S,
    /// Suite assembler.
    assembler: SuiteAssembler<C>,
    /// Rendering options.
    options: RenderOptions,
}

impl<S: SuiteStore, C: Clock> SuiteLifecycle<S, C> {
    /// Creates a lifecycle manager.
    #[must_use]
    pub const fn new(store: S, assembler: SuiteAssembler<C>, options: RenderOptions) -> Self {
        Self {
            store,
            assembler,
            options,
        }
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the manager and returns the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the current state of a tool's suite.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when presence cannot be determined.
    pub fn state(&self, tool: &ToolName) -> Result<SuiteState, StoreError> {
        Ok(if self.store.exists(tool)? { SuiteState::Present } else { SuiteState::Absent })
    }

    /// Applies every trigger in `changes`, in order: added, modified, removed.
    pub fn apply(&mut self, changes: &ChangeSet) -> LifecycleReport {
        let mut report = LifecycleReport::default();
        for entry in &changes.rejected {
            error!(section = entry.section, tool = %entry.label(), error = %entry.reason, "descriptor rejected");
            report.rejected.push(entry.clone());
        }
        for tool in &changes.added {
            let result = self.generate(tool);
            report.outcomes.push(self.record(&tool.name, Trigger::Added, result));
        }
        for modification in &changes.modified {
            let current = &modification.current;
            if !modification.change.is_empty() {
                debug!(tool = %current.name, change = %modification.change, "tool modified");
            }
            let result = self.generate(current);
            let renamed = modification.previous.name != current.name;
            let written = result.is_ok();
            report.outcomes.push(self.record(&current.name, Trigger::Modified, result));
            if renamed && written {
                let previous = &modification.previous.name;
                let result = self.remove(previous);
                report.outcomes.push(self.record(previous, Trigger::Modified, result));
            }
        }
        for removed in &changes.removed {
            let result = self.remove(&removed.name);
            report.outcomes.push(self.record(&removed.name, Trigger::Removed, result));
        }
        info!(
            written = report.written(),
            removed = report.removed(),
            failed = report.failed(),
            "suite lifecycle batch complete"
        );
        report
    }

    /// Assembles, renders, and writes the suite for one tool.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when assembly, rendering, or persistence fails.
    pub fn generate(&mut self, tool: &ToolDescriptor) -> Result<Applied, LifecycleError> {
        info!(tool = %tool.name, category = %tool.category, risk = %tool.risk_level, "generating test suite");
        let previous = self.state(&tool.name)?;
        let suite = self.assembler.assemble(tool)?;
        let contents = render_suite(&suite, &self.options)?;
        self.store.write(&tool.name, &contents)?;
        let location = self.store.location(&tool.name);
        info!(tool = %tool.name, tests = suite.tests.len(), path = %location, "test suite written");
        Ok(Applied::Written {
            tests: suite.tests.len(),
            location,
            previous,
        })
    }

    /// Deletes the suite for one tool; a missing suite is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when an existing suite cannot be deleted.
    pub fn remove(&mut self, tool: &ToolName) -> Result<Applied, LifecycleError> {
        match self.store.remove(tool)? {
            RemoveOutcome::Removed => {
                info!(tool = %tool, path = %self.store.location(tool), "test suite removed");
                Ok(Applied::Removed)
            }
            RemoveOutcome::Absent => {
                info!(tool = %tool, "test suite already absent");
                Ok(Applied::AlreadyAbsent)
            }
        }
    }

    /// Compares stored suites with fresh renderings of every registered tool.
    ///
    /// Stored suites with no registry entry are reported as [`DriftStatus::Stale`]. Suites
    /// named by a rejected registry entry are not reported here.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Store`] when the store cannot be listed.
    pub fn check(
        &self,
        registry: &ToolRegistry,
        mask: &VolatileMask,
    ) -> Result<Vec<(ToolName, Result<DriftStatus, LifecycleError>)>, LifecycleError> {
        let mut results = Vec::new();
        for tool in registry.tools() {
            let status = self.drift_status(tool, mask);
            results.push((tool.name.clone(), status));
        }
        for name in self.store.list()? {
            if !registry.lists(name.as_str()) {
                results.push((name, Ok(DriftStatus::Stale)));
            }
        }
        Ok(results)
    }

    /// Classifies one registered tool.
    fn drift_status(
        &self,
        tool: &ToolDescriptor,
        mask: &VolatileMask,
    ) -> Result<DriftStatus, LifecycleError> {
        let suite = self.assembler.assemble(tool)?;
        check_suite(&self.store, &suite, &self.options, mask)
    }

    /// Wraps a result into an outcome record.
    fn record(
        &self,
        tool: &ToolName,
        trigger: Trigger,
        result: Result<Applied, LifecycleError>,
    ) -> ToolOutcome {
        if let Err(err) = &result {
            error!(tool = %tool, trigger = trigger.as_str(), location = %self.store.location(tool), error = %err, "suite lifecycle action failed");
        }
        ToolOutcome {
            tool: tool.clone(),
            trigger,
            result,
        }
    }
}
