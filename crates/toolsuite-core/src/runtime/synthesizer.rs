// crates/toolsuite-core/src/runtime/synthesizer.rs
// ============================================================================
// Module: Parameter Value Synthesizer
// Description: Heuristic placeholder values for tool parameters.
// Purpose: Produce plausible test data from parameter names alone.
// Dependencies: serde, serde_json, crate::core
// ============================================================================

//! ## Overview
//! Parameters carry no declared types, so values are inferred from the name:
//! a fixed table of exact names first, then substring heuristics, then a
//! constant fallback. Synthesis never fails.
//!
//! Exact names are case-sensitive. Substring heuristics run against the
//! lowercase name so camelCase identifiers such as `orderId` and
//! `hostnameCount` resolve the same way as their lowercase forms.
//!
//! The `id` heuristic embeds the clock reading in milliseconds; it is the only
//! non-deterministic output and is pinned by supplying a fixed [`Clock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::core::clock::Clock;
use crate::core::descriptor::ToolDescriptor;
use crate::core::suite::TestData;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Value synthesized for `customer`.
pub const CUSTOMER_VALUE: &str = "testing";
/// Value synthesized for `propertyId`.
pub const PROPERTY_ID_VALUE: &str = "prp_123456";
/// Value synthesized for `network`.
pub const NETWORK_VALUE: &str = "staging";
/// Value synthesized for `limit`.
pub const LIMIT_VALUE: u64 = 10;
/// Value synthesized for `domain`.
pub const DOMAIN_VALUE: &str = "example.com";
/// Value synthesized for count-like parameters.
pub const COUNT_VALUE: u64 = 1;
/// Fallback value when no rule matches.
pub const DEFAULT_VALUE: &str = "test-value";
/// Prefix of synthesized identifier values.
pub const ID_PREFIX: &str = "test-id-";

// ============================================================================
// SECTION: Optional Parameter Policy
// ============================================================================

/// Rule for including optional parameters in non-empty test data.
///
/// # Invariants
/// - One policy applies uniformly to every generator that synthesizes test data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalParamPolicy {
    /// Include every optional parameter.
    #[default]
    All,
    /// Include only the first `n` optional parameters, in declaration order.
    Leading(usize),
}

impl OptionalParamPolicy {
    /// Returns how many of `available` optional parameters to include.
    #[must_use]
    pub fn take(self, available: usize) -> usize {
        match self {
            Self::All => available,
            Self::Leading(limit) => available.min(limit),
        }
    }
}

// ============================================================================
// SECTION: Synthesizer
// ============================================================================

/// Parameter value synthesizer bound to a clock and an optional-parameter policy.
#[derive(Debug, Clone)]
pub struct ParamSynthesizer<C> {
    /// Time source for identifier values.
    clock: C,
    /// Optional parameter inclusion rule.
    policy: OptionalParamPolicy,
}

impl<C: Clock> ParamSynthesizer<C> {
    /// Creates a synthesizer that includes every optional parameter.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            policy: OptionalParamPolicy::All,
        }
    }

    /// Replaces the optional parameter policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: OptionalParamPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active optional parameter policy.
    #[must_use]
    pub const fn policy(&self) -> OptionalParamPolicy {
        self.policy
    }

    /// Returns the clock backing this synthesizer.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Synthesizes a placeholder value for one parameter of `tool`.
    #[must_use]
    pub fn synthesize(&self, param: &str, tool: &ToolDescriptor) -> Value {
        if let Some(value) = exact_value(param) {
            return value;
        }
        let lowered = param.to_ascii_lowercase();
        if lowered.contains("name") {
            return Value::String(format!("test-{}", tool.name));
        }
        if lowered.contains("id") {
            return Value::String(format!("{ID_PREFIX}{}", self.clock.unix_millis()));
        }
        if lowered.contains("count") || lowered.contains("number") {
            return json!(COUNT_VALUE);
        }
        Value::String(DEFAULT_VALUE.to_string())
    }

    /// Builds test data for every required parameter plus the optional parameters selected by
    /// the policy.
    #[must_use]
    pub fn test_data(&self, tool: &ToolDescriptor) -> TestData {
        let optional = self.policy.take(tool.optional_params.len());
        tool.required_params
            .iter()
            .chain(tool.optional_params.iter().take(optional))
            .map(|param| (param.clone(), self.synthesize(param, tool)))
            .collect()
    }
}

/// Resolves the fixed exact-name table.
fn exact_value(param: &str) -> Option<Value> {
    match param {
        "customer" => Some(json!(CUSTOMER_VALUE)),
        "propertyId" => Some(json!(PROPERTY_ID_VALUE)),
        "network" => Some(json!(NETWORK_VALUE)),
        "limit" => Some(json!(LIMIT_VALUE)),
        "domain" => Some(json!(DOMAIN_VALUE)),
        _ => None,
    }
}
