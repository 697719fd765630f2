// crates/toolsuite-gen/src/registry.rs
// ============================================================================
// Module: Tool Registry Input
// Description: Bounded loading of tool registries and change sets.
// Purpose: Read externally produced descriptors and lifecycle triggers from JSON.
// Dependencies: serde, serde_json, thiserror, toolsuite-core
// ============================================================================

//! ## Overview
//! Two JSON inputs drive the lifecycle manager: a full [`ToolRegistry`]
//! (array of descriptors) and an incremental [`ChangeSet`] (`added`,
//! `modified`, `removed`). Both are produced by tooling outside this crate and
//! are treated as untrusted: reads are size limited and the top-level shape
//! must parse. Individual descriptors are converted one at a time; an entry
//! that does not convert is kept aside as a [`RejectedEntry`] naming the tool
//! where it can, and the remaining entries are still loaded.
//!
//! [`ChangeSet::reconcile`] derives a change set from a full registry and the
//! tools that currently have generated files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use toolsuite_core::ToolDescriptor;
use toolsuite_core::ToolName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum registry or change-set size accepted by the loaders.
pub const MAX_REGISTRY_BYTES: u64 = 4 * 1024 * 1024;

/// Change description attached to reconciled regenerations.
pub const RECONCILE_CHANGE: &str = "regenerated from registry";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading registry inputs.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// IO error while reading input files.
    #[error("io error: {0}")]
    Io(String),
    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(String),
    /// Input is well-formed JSON but violates registry rules.
    #[error("registry error: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Rejected Entries
// ============================================================================

/// Input entry that could not be converted into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Input section holding the entry (`registry`, `added`, `modified`, `removed`).
    pub section: &'static str,
    /// Zero-based position within the section.
    pub index: usize,
    /// Tool name, when the entry carries a string `name`.
    pub name: Option<String>,
    /// Conversion error.
    pub reason: String,
}

impl RejectedEntry {
    /// Returns the tool name, or the entry position when no name is available.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("entry #{}", self.index))
    }
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.section, self.label(), self.reason)
    }
}

/// Converts each entry independently, collecting failures into `rejected`.
fn convert_entries<T: DeserializeOwned>(
    section: &'static str,
    values: Vec<Value>,
    rejected: &mut Vec<RejectedEntry>,
) -> Vec<T> {
    let mut converted = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let name = entry_name(&value);
        match serde_json::from_value(value) {
            Ok(entry) => converted.push(entry),
            Err(err) => rejected.push(RejectedEntry {
                section,
                index,
                name,
                reason: err.to_string(),
            }),
        }
    }
    converted
}

/// Extracts the tool name from a descriptor or modification entry.
fn entry_name(value: &Value) -> Option<String> {
    let descriptor = value.get("current").unwrap_or(value);
    descriptor.get("name").and_then(Value::as_str).map(str::to_string)
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Full set of tool descriptors known to the registry.
///
/// # Invariants
/// - Tool names are unique.
/// - Tool order matches the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolRegistry {
    /// Registered descriptors.
    tools: Vec<ToolDescriptor>,
    /// Entries that did not convert into descriptors.
    rejected: Vec<RejectedEntry>,
}

impl ToolRegistry {
    /// Builds a registry from descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] when a tool name appears twice.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(RegistryError::Invalid(format!("duplicate tool `{}`", tool.name)));
            }
        }
        Ok(Self {
            tools,
            rejected: Vec::new(),
        })
    }

    /// Loads a registry from a JSON array of descriptors.
    ///
    /// Entries that do not convert are recorded in [`ToolRegistry::rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the file is unreadable, oversized, not a JSON array,
    /// or contains duplicate tool names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let bytes = read_input_bytes(path.as_ref())?;
        let values: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|err| RegistryError::Json(err.to_string()))?;
        let mut rejected = Vec::new();
        let tools = convert_entries("registry", values, &mut rejected);
        let mut registry = Self::new(tools)?;
        registry.rejected = rejected;
        Ok(registry)
    }

    /// Returns the registered descriptors.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Finds a descriptor by tool name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name.as_str() == name)
    }

    /// Returns entries that did not convert into descriptors.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Returns true when the registry lists `name`, either as a descriptor or a rejected entry.
    #[must_use]
    pub fn lists(&self, name: &str) -> bool {
        self.get(name).is_some()
            || self.rejected.iter().any(|entry| entry.name.as_deref() == Some(name))
    }
}

// ============================================================================
// SECTION: Change Sets
// ============================================================================

/// A tool whose analysis changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolModification {
    /// Descriptor before the change.
    pub previous: ToolDescriptor,
    /// Descriptor after the change.
    pub current: ToolDescriptor,
    /// Free-text description of the change.
    #[serde(default)]
    pub change: String,
}

/// A tool that left the registry.
///
/// Full descriptors are accepted on the wire; only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedTool {
    /// Tool name.
    pub name: ToolName,
}

/// Lifecycle triggers for one regeneration batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeSet {
    /// Newly detected tools.
    #[serde(default)]
    pub added: Vec<ToolDescriptor>,
    /// Tools whose analysis changed.
    #[serde(default)]
    pub modified: Vec<ToolModification>,
    /// Tools that were removed.
    #[serde(default)]
    pub removed: Vec<RemovedTool>,
    /// Entries that did not convert; reported as failures when applied.
    #[serde(skip)]
    pub rejected: Vec<RejectedEntry>,
}

/// Wire shape of a change set before per-entry conversion.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChangeSet {
    /// Raw `added` entries.
    #[serde(default)]
    added: Vec<Value>,
    /// Raw `modified` entries.
    #[serde(default)]
    modified: Vec<Value>,
    /// Raw `removed` entries.
    #[serde(default)]
    removed: Vec<Value>,
}

impl ChangeSet {
    /// Loads a change set from JSON.
    ///
    /// Entries that do not convert are recorded in [`ChangeSet::rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the file is unreadable, oversized, or not a change-set
    /// object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let bytes = read_input_bytes(path.as_ref())?;
        let raw: RawChangeSet =
            serde_json::from_slice(&bytes).map_err(|err| RegistryError::Json(err.to_string()))?;
        let mut rejected = Vec::new();
        let added = convert_entries("added", raw.added, &mut rejected);
        let modified = convert_entries("modified", raw.modified, &mut rejected);
        let removed = convert_entries("removed", raw.removed, &mut rejected);
        Ok(Self {
            added,
            modified,
            removed,
            rejected,
        })
    }

    /// Returns a change set that removes the named tools.
    #[must_use]
    pub fn removing(names: impl IntoIterator<Item = ToolName>) -> Self {
        Self {
            removed: names.into_iter().map(|name| RemovedTool { name }).collect(),
            ..Self::default()
        }
    }

    /// Derives the change set that brings `existing` suites in line with `registry`.
    ///
    /// Registered tools with a suite are regenerated, registered tools without one are added,
    /// and suites with no registry entry are removed. Suites named by a rejected registry
    /// entry are left in place, and the rejections carry over into the change set.
    #[must_use]
    pub fn reconcile(registry: &ToolRegistry, existing: &[ToolName]) -> Self {
        let existing: BTreeSet<&ToolName> = existing.iter().collect();
        let mut changes = Self {
            rejected: registry.rejected().to_vec(),
            ..Self::default()
        };
        for tool in registry.tools() {
            if existing.contains(&tool.name) {
                changes.modified.push(ToolModification {
                    previous: tool.clone(),
                    current: tool.clone(),
                    change: RECONCILE_CHANGE.to_string(),
                });
            } else {
                changes.added.push(tool.clone());
            }
        }
        for name in existing {
            if !registry.lists(name.as_str()) {
                changes.removed.push(RemovedTool {
                    name: name.clone(),
                });
            }
        }
        changes
    }

    /// Returns true when the change set has no triggers and no rejected entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
            && self.rejected.is_empty()
    }
}

// ============================================================================
// SECTION: Bounded Reads
// ============================================================================

/// Reads an input file with size limits to avoid memory exhaustion.
fn read_input_bytes(path: &Path) -> Result<Vec<u8>, RegistryError> {
    let file = fs::File::open(path)
        .map_err(|err| RegistryError::Io(format!("{}: {err}", path.display())))?;
    let metadata = file.metadata().map_err(|err| RegistryError::Io(err.to_string()))?;
    if metadata.len() > MAX_REGISTRY_BYTES {
        return Err(RegistryError::Invalid(format!(
            "input exceeds {MAX_REGISTRY_BYTES} bytes"
        )));
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_REGISTRY_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(|err| RegistryError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| {
        RegistryError::Invalid("input size exceeds addressable memory".to_string())
    })?;
    if size > MAX_REGISTRY_BYTES {
        return Err(RegistryError::Invalid(format!(
            "input exceeds {MAX_REGISTRY_BYTES} bytes"
        )));
    }
    Ok(bytes)
}
