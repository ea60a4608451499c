// crates/verity-config/tests/config.rs
// ============================================================================
// Module: Configuration Tests
// Description: Validate config parsing, defaults, and fail-closed checks.
// Purpose: Ensure invalid configuration fails at startup, not per request.
// Dependencies: verity-config, tempfile
// ============================================================================

//! ## Overview
//! Conformance tests for config loading: defaults apply when no file is
//! present, explicit files parse with section defaults, and malformed
//! prefixes, URLs, unknown keys, and oversized files are rejected eagerly.

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
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use verity_config::ConfigError;
use verity_config::RegistryConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("verity.toml");
    fs::write(&path, contents).unwrap();
    (temp, path)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn defaults_apply_without_a_file() {
    let config = RegistryConfig::default();
    config.validate().unwrap();
    assert_eq!(config.issuer.org_prefix().unwrap().as_str(), "SWT");
    assert_eq!(config.store.path, PathBuf::from("verity.sqlite"));
    assert!(config.verify.portal_base().unwrap().as_str().starts_with("https://verify."));
}

#[test]
fn explicit_file_overrides_sections_with_defaults_for_the_rest() {
    let (_temp, path) = write_config(
        r#"
[store]
path = "/tmp/registry.sqlite"
sync_mode = "normal"

[issuer]
org_prefix = "ACME"
"#,
    );
    let config = RegistryConfig::load(Some(&path)).unwrap();
    assert_eq!(config.store.path, PathBuf::from("/tmp/registry.sqlite"));
    assert_eq!(config.store.busy_timeout_ms, 5_000);
    assert_eq!(config.issuer.org_prefix().unwrap().as_str(), "ACME");
    config.verify.portal_base().unwrap();
}

#[test]
fn bad_prefix_fails_closed() {
    let (_temp, path) = write_config("[issuer]\norg_prefix = \"swt\"\n");
    let error = RegistryConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ConfigError::InvalidPrefix(_)));
}

#[test]
fn bad_portal_url_fails_closed() {
    let (_temp, path) = write_config("[verify]\nportal_base_url = \"ftp://verify.example\"\n");
    let error = RegistryConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ConfigError::InvalidPortalUrl(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    let (_temp, path) = write_config("[store]\nflush_interval = 10\n");
    let error = RegistryConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.toml");
    let error = RegistryConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(error, ConfigError::Io(_)));
}

#[test]
fn store_config_round_trips_into_the_store_crate() {
    let (_temp, path) = write_config("[store]\npath = \"/tmp/x.sqlite\"\njournal_mode = \"delete\"\n");
    let config = RegistryConfig::load(Some(&path)).unwrap();
    let store_config = config.store.to_store_config();
    assert_eq!(store_config.path, PathBuf::from("/tmp/x.sqlite"));
    assert_eq!(store_config.journal_mode, verity_store_sqlite::JournalMode::Delete);
}
