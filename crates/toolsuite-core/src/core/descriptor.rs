// crates/toolsuite-core/src/core/descriptor.rs
// ============================================================================
// Module: Tool Descriptors
// Description: Static metadata describing externally exposed tools under test.
// Purpose: Provide validated, serializable tool descriptors for suite synthesis.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ToolDescriptor`] is supplied by an external registry or analysis step
//! and is the only input to suite synthesis. Descriptors are treated as
//! untrusted: names are validated at deserialization time and
//! [`ToolDescriptor::validate`] fails fast on malformed parameter lists so a
//! broken registry entry never yields a partial suite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum tool name length in bytes.
pub const MAX_TOOL_NAME_BYTES: usize = 128;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when a tool descriptor is malformed.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Tool name violates the naming rules.
    #[error("invalid tool name `{name}`: {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Rule that was violated.
        reason: &'static str,
    },
    /// A required descriptor field is empty.
    #[error("tool `{tool}` has an empty {field}")]
    EmptyField {
        /// Tool name.
        tool: String,
        /// Field label.
        field: &'static str,
    },
    /// A parameter name is empty or whitespace.
    #[error("tool `{tool}` declares a blank parameter name")]
    BlankParameter {
        /// Tool name.
        tool: String,
    },
    /// A parameter name is declared more than once.
    #[error("tool `{tool}` declares parameter `{param}` more than once")]
    DuplicateParameter {
        /// Tool name.
        tool: String,
        /// Duplicated parameter.
        param: String,
    },
}

// ============================================================================
// SECTION: Tool Name
// ============================================================================

/// Stable tool identifier used as the generated file key.
///
/// # Invariants
/// - Non-empty, at most [`MAX_TOOL_NAME_BYTES`] bytes.
/// - One or more lowercase ASCII alphanumeric segments joined by `-` or `.`.
/// - Always a single safe path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    /// Parses and validates a tool name.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidName`] when the name breaks the naming rules.
    pub fn parse(value: impl Into<String>) -> Result<Self, DescriptorError> {
        let value = value.into();
        if let Err(reason) = check_tool_name(&value) {
            return Err(DescriptorError::InvalidName {
                name: value,
                reason,
            });
        }
        Ok(Self(value))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ToolName {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ToolName> for String {
    fn from(value: ToolName) -> Self {
        value.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks tool naming rules, returning the violated rule on failure.
fn check_tool_name(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("name is empty");
    }
    if value.len() > MAX_TOOL_NAME_BYTES {
        return Err("name exceeds length limit");
    }
    for segment in value.split(['-', '.']) {
        if segment.is_empty() {
            return Err("name has an empty segment");
        }
        if !segment.bytes().all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit()) {
            return Err("segments must be lowercase ascii alphanumerics");
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Risk Level
// ============================================================================

/// Coarse risk classification of a tool.
///
/// # Invariants
/// - Only [`RiskLevel::High`] enables safety test generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Read-only or otherwise harmless operation.
    #[default]
    Low,
    /// Mutating operation with limited blast radius.
    Medium,
    /// Destructive or production-affecting operation.
    High,
}

impl RiskLevel {
    /// Returns the stable label for the risk level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Descriptor
// ============================================================================

/// Static metadata about a single externally exposed tool.
///
/// # Invariants
/// - `required_params` is mandatory on the wire; a missing list fails deserialization.
/// - After [`ToolDescriptor::validate`], parameter names are non-blank and unique across both
///   lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique tool identifier.
    pub name: ToolName,
    /// Free-text grouping label, informational only.
    pub category: String,
    /// Optional human-readable summary of the tool.
    #[serde(default)]
    pub description: String,
    /// Required parameter names, in declaration order.
    pub required_params: Vec<String>,
    /// Optional parameter names, in declaration order.
    #[serde(default)]
    pub optional_params: Vec<String>,
    /// Natural-language usage examples, used verbatim as user intent.
    #[serde(default)]
    pub example_usage: Vec<String>,
    /// Risk classification gating safety cases.
    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl ToolDescriptor {
    /// Creates a descriptor with no parameters, examples, or description.
    #[must_use]
    pub fn new(name: ToolName, category: impl Into<String>) -> Self {
        Self {
            name,
            category: category.into(),
            description: String::new(),
            required_params: Vec::new(),
            optional_params: Vec::new(),
            example_usage: Vec::new(),
            risk_level: RiskLevel::Low,
        }
    }

    /// Sets the required parameter list.
    #[must_use]
    pub fn with_required<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the optional parameter list.
    #[must_use]
    pub fn with_optional<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the example usage list.
    #[must_use]
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.example_usage = examples.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the risk level.
    #[must_use]
    pub const fn with_risk(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// Returns the first example usage, if any.
    #[must_use]
    pub fn primary_example(&self) -> Option<&str> {
        self.example_usage.first().map(String::as_str).filter(|example| !example.trim().is_empty())
    }

    /// Returns all parameter names, required first.
    pub fn all_params(&self) -> impl Iterator<Item = &str> {
        self.required_params.iter().chain(&self.optional_params).map(String::as_str)
    }

    /// Validates descriptor fields that serde cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when the category is empty or a parameter name is blank or
    /// duplicated.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.category.trim().is_empty() {
            return Err(DescriptorError::EmptyField {
                tool: self.name.to_string(),
                field: "category",
            });
        }
        let mut seen = BTreeSet::new();
        for param in self.all_params() {
            if param.trim().is_empty() {
                return Err(DescriptorError::BlankParameter {
                    tool: self.name.to_string(),
                });
            }
            if !seen.insert(param) {
                return Err(DescriptorError::DuplicateParameter {
                    tool: self.name.to_string(),
                    param: param.to_string(),
                });
            }
        }
        Ok(())
    }
}
