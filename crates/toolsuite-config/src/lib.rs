// crates/toolsuite-config/src/lib.rs
// ============================================================================
// Module: Tool Suite Config
// Description: Loader and validation for `toolsuite.toml`.
// Purpose: Resolve output, synthesis, and registry settings with strict limits.
// Dependencies: serde, thiserror, toml, toolsuite-core
// ============================================================================

//! ## Overview
//! [`SuiteConfig::load`] resolves the config path (explicit argument, then
//! `TOOLSUITE_CONFIG`, then `toolsuite.toml` in the working directory), reads
//! it with size and path-length limits, parses TOML with unknown fields
//! rejected, and validates every value. A missing default file yields
//! [`SuiteConfig::default`]; a missing explicit or env-provided file is an
//! error.
//!
//! ```toml
//! [output]
//! dir = "__tests__/generated"
//! extension = ".test.ts"
//! client_import = "../../src/testing/test-client"
//! client_type = "TestClient"
//!
//! [synthesis]
//! optional_params = { leading = 2 }
//!
//! [registry]
//! path = "tool-registry.json"
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use toolsuite_core::OptionalParamPolicy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default config filename.
pub const DEFAULT_CONFIG_NAME: &str = "toolsuite.toml";
/// Environment variable override for config path.
pub const CONFIG_ENV_VAR: &str = "TOOLSUITE_CONFIG";
/// Default generated-tests directory.
pub const DEFAULT_OUTPUT_DIR: &str = "__tests__/generated";
/// Default registry path.
pub const DEFAULT_REGISTRY_PATH: &str = "tool-registry.json";
/// Default generated file extension.
const DEFAULT_EXTENSION: &str = ".test.ts";
/// Default test-client import path.
const DEFAULT_CLIENT_IMPORT: &str = "../../src/testing/test-client";
/// Default test-client class name.
const DEFAULT_CLIENT_TYPE: &str = "TestClient";
/// Maximum allowed config file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 512 * 1024;
/// Maximum total path length for config-related paths.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("config io error: {0}")]
    Io(String),
    /// Parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Top-level `toolsuite.toml` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Generated file settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Parameter synthesis settings.
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Registry input settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Directory generated suites are written to.
    pub dir: PathBuf,
    /// File extension appended to tool names, including the leading dot.
    pub extension: String,
    /// Module path the test client is imported from.
    pub client_import: String,
    /// Exported class name of the test client.
    pub client_type: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            client_import: DEFAULT_CLIENT_IMPORT.to_string(),
            client_type: DEFAULT_CLIENT_TYPE.to_string(),
        }
    }
}

/// `[synthesis]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SynthesisConfig {
    /// Optional parameter inclusion rule.
    pub optional_params: OptionalParamPolicy,
}

/// `[registry]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RegistryConfig {
    /// JSON registry of tool descriptors.
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REGISTRY_PATH),
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Where the config path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path passed by the caller.
    Explicit(PathBuf),
    /// Path read from [`CONFIG_ENV_VAR`].
    Environment(PathBuf),
    /// [`DEFAULT_CONFIG_NAME`] in the working directory.
    Default(PathBuf),
}

impl ConfigSource {
    /// Returns the resolved path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Environment(path) | Self::Default(path) => path,
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        Self::load_from(&source)
    }

    /// Loads configuration from an already resolved source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_from(source: &ConfigSource) -> Result<Self, ConfigError> {
        let resolved = source.path();
        validate_path(resolved)?;
        let bytes = match fs::read(resolved) {
            Ok(bytes) => bytes,
            Err(err)
                if err.kind() == ErrorKind::NotFound
                    && matches!(source, ConfigSource::Default(_)) =>
            {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(format!("{}: {err}", resolved.display()))),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is empty or malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output = &self.output;
        validate_store_path(&output.dir, "output.dir")?;
        if !output.extension.starts_with('.') || output.extension.len() < 2 {
            return Err(ConfigError::Invalid(
                "output.extension must start with '.' and name a suffix".to_string(),
            ));
        }
        if output.extension.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(
                "output.extension must not contain path separators".to_string(),
            ));
        }
        if output.client_import.trim().is_empty() {
            return Err(ConfigError::Invalid("output.client_import must not be empty".to_string()));
        }
        if !is_identifier(&output.client_type) {
            return Err(ConfigError::Invalid(format!(
                "output.client_type `{}` is not a valid identifier",
                output.client_type
            )));
        }
        validate_store_path(&self.registry.path, "registry.path")
    }
}

/// Resolves the config path from an explicit argument, the env override, or the default.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the env override exceeds path limits.
pub fn resolve_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = explicit {
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Some(env_path) = env_value.filter(|value| !value.trim().is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::Environment(PathBuf::from(env_path)));
    }
    Ok(ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates the config file path length and components.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path value.
fn validate_store_path(path: &Path, field: &str) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must not be empty")));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} component too long")));
        }
    }
    Ok(())
}

/// Returns true when `value` is an ASCII TypeScript identifier.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}
