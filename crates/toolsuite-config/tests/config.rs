// crates/toolsuite-config/tests/config.rs
// ============================================================================
// Module: Config Loader Tests
// Description: Path resolution, parsing, defaults, and validation of `toolsuite.toml`.
// ============================================================================
//! ## Overview
//! Covers the resolution order, fail-closed parsing, and value validation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use toolsuite_config::ConfigError;
use toolsuite_config::ConfigSource;
use toolsuite_config::DEFAULT_CONFIG_NAME;
use toolsuite_config::DEFAULT_OUTPUT_DIR;
use toolsuite_config::SuiteConfig;
use toolsuite_config::resolve_path;
use toolsuite_core::OptionalParamPolicy;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn invalid(content: &str) -> String {
    match SuiteConfig::from_toml_str(content) {
        Err(ConfigError::Invalid(message)) => message,
        other => panic!("expected invalid config, got {other:?}"),
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

#[test]
fn explicit_path_wins_over_environment() {
    let source = resolve_path(Some(Path::new("custom.toml")), Some("env.toml".to_string()))
        .expect("resolve");
    assert_eq!(source, ConfigSource::Explicit(PathBuf::from("custom.toml")));
}

#[test]
fn environment_path_wins_over_default() {
    let source = resolve_path(None, Some("env.toml".to_string())).expect("resolve");
    assert_eq!(source, ConfigSource::Environment(PathBuf::from("env.toml")));
}

#[test]
fn blank_environment_falls_back_to_default() {
    let source = resolve_path(None, Some("  ".to_string())).expect("resolve");
    assert_eq!(source, ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)));
}

#[test]
fn oversized_environment_path_is_rejected() {
    let result = resolve_path(None, Some("a".repeat(5000)));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn missing_default_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = ConfigSource::Default(dir.path().join(DEFAULT_CONFIG_NAME));
    let config = SuiteConfig::load_from(&source).expect("defaults");
    assert_eq!(config, SuiteConfig::default());
    assert_eq!(config.output.dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    assert_eq!(config.output.extension, ".test.ts");
    assert_eq!(config.synthesis.optional_params, OptionalParamPolicy::All);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    assert!(matches!(SuiteConfig::load(Some(missing.as_path())), Err(ConfigError::Io(_))));
}

#[test]
fn full_config_file_is_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("toolsuite.toml");
    fs::write(
        &path,
        r#"
[output]
dir = "out/generated"
extension = ".spec.ts"
client_import = "@acme/test-client"
client_type = "McpTestClient"

[synthesis]
optional_params = { leading = 2 }

[registry]
path = "registry/tools.json"
"#,
    )
    .expect("write config");

    let config = SuiteConfig::load(Some(path.as_path())).expect("load");
    assert_eq!(config.output.dir, PathBuf::from("out/generated"));
    assert_eq!(config.output.extension, ".spec.ts");
    assert_eq!(config.output.client_import, "@acme/test-client");
    assert_eq!(config.output.client_type, "McpTestClient");
    assert_eq!(config.synthesis.optional_params, OptionalParamPolicy::Leading(2));
    assert_eq!(config.registry.path, PathBuf::from("registry/tools.json"));
}

#[test]
fn partial_sections_keep_defaults() {
    let config = SuiteConfig::from_toml_str("[output]\nextension = \".test.js\"\n").expect("parse");
    assert_eq!(config.output.extension, ".test.js");
    assert_eq!(config.output.client_type, "TestClient");
    assert_eq!(config.registry.path, PathBuf::from("tool-registry.json"));
}

#[test]
fn optional_params_accepts_all() {
    let config =
        SuiteConfig::from_toml_str("[synthesis]\noptional_params = \"all\"\n").expect("parse");
    assert_eq!(config.synthesis.optional_params, OptionalParamPolicy::All);
}

#[test]
fn oversized_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("toolsuite.toml");
    fs::write(&path, format!("# {}\n", "x".repeat(600 * 1024))).expect("write config");
    assert!(matches!(SuiteConfig::load(Some(path.as_path())), Err(ConfigError::Invalid(_))));
}

#[test]
fn non_utf8_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("toolsuite.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00]).expect("write config");
    let err = SuiteConfig::load(Some(path.as_path())).expect_err("utf-8");
    assert_eq!(err, ConfigError::Invalid("config must be utf-8".to_string()));
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn unknown_fields_are_rejected() {
    let result = SuiteConfig::from_toml_str("[output]\nfolder = \"x\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
    let result = SuiteConfig::from_toml_str("[metrics]\nenabled = true\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn extension_must_start_with_dot() {
    let message = invalid("[output]\nextension = \"test.ts\"\n");
    assert!(message.contains("output.extension"));
    invalid("[output]\nextension = \".\"\n");
    invalid("[output]\nextension = \".a/b\"\n");
}

#[test]
fn empty_values_are_rejected() {
    assert!(invalid("[output]\ndir = \"\"\n").contains("output.dir"));
    assert!(invalid("[output]\nclient_import = \" \"\n").contains("output.client_import"));
    assert!(invalid("[registry]\npath = \"\"\n").contains("registry.path"));
}

#[test]
fn client_type_must_be_an_identifier() {
    assert!(invalid("[output]\nclient_type = \"Test Client\"\n").contains("client_type"));
    invalid("[output]\nclient_type = \"1Client\"\n");
    SuiteConfig::from_toml_str("[output]\nclient_type = \"$Client_2\"\n").expect("identifier");
}

#[test]
fn leading_zero_keeps_required_params_only() {
    let config = SuiteConfig::from_toml_str("[synthesis]\noptional_params = { leading = 0 }\n")
        .expect("parse");
    assert_eq!(config.synthesis.optional_params, OptionalParamPolicy::Leading(0));
}
