// crates/verity-config/src/lib.rs
// ============================================================================
// Module: Verity Config Library
// Description: Configuration loading and validation for the Verity registry.
// Purpose: Expose strict, fail-closed configuration parsing.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Registry configuration comes from a TOML file with hard size and path
//! limits. Missing or invalid configuration fails closed at startup rather
//! than degrading per request: a registry that cannot name its store, its
//! organization prefix, or its verification portal must not issue documents.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::IssuerSection;
pub use config::RegistryConfig;
pub use config::StoreSection;
pub use config::VerifySection;
