// crates/verity-config/src/config.rs
// ============================================================================
// Module: Verity Configuration
// Description: Configuration loading and validation for the registry.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: verity-core, verity-store-sqlite, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits, resolved from an explicit path, the `VERITY_CONFIG` environment
//! variable, or the default filename in the working directory. Every loaded
//! value is validated eagerly: an unparsable portal URL or a malformed
//! organization prefix is a startup failure, never a per-request surprise.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use url::Url;
use verity_core::OrgPrefix;
use verity_store_sqlite::JournalMode;
use verity_store_sqlite::SqliteStoreConfig;
use verity_store_sqlite::SyncMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "verity.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "VERITY_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default store filename.
const DEFAULT_STORE_PATH: &str = "verity.sqlite";
/// Default busy timeout for the store (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default verification portal base URL.
const DEFAULT_PORTAL_BASE_URL: &str = "https://verify.saralworkstechnologies.info";
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors; all are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file exceeds the size limit.
    #[error("config file too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual file size in bytes.
        actual_bytes: usize,
    },
    /// Config file failed to parse.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Store path violates safety limits.
    #[error("config store path invalid: {0}")]
    InvalidStorePath(String),
    /// Organization prefix violates the printed contract.
    #[error("config issuer prefix invalid: {0}")]
    InvalidPrefix(String),
    /// Verification portal URL is unusable.
    #[error("config portal url invalid: {0}")]
    InvalidPortalUrl(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Verity registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Record store configuration.
    #[serde(default)]
    pub store: StoreSection,
    /// Code issuer configuration.
    #[serde(default)]
    pub issuer: IssuerSection,
    /// Verification portal configuration.
    #[serde(default)]
    pub verify: VerifySection,
}

/// Record store configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: JournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SyncMode,
}

impl StoreSection {
    /// Builds the store crate's config from this section.
    #[must_use]
    pub fn to_store_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
            sync_mode: self.sync_mode,
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: JournalMode::default(),
            sync_mode: SyncMode::default(),
        }
    }
}

/// Code issuer configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuerSection {
    /// Organization prefix printed at the front of staff codes.
    #[serde(default = "default_org_prefix")]
    pub org_prefix: String,
}

impl IssuerSection {
    /// Validates and returns the organization prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrefix`] when the prefix is not 2-5
    /// uppercase ASCII letters.
    pub fn org_prefix(&self) -> Result<OrgPrefix, ConfigError> {
        OrgPrefix::new(&self.org_prefix)
            .map_err(|err| ConfigError::InvalidPrefix(err.to_string()))
    }
}

impl Default for IssuerSection {
    fn default() -> Self {
        Self {
            org_prefix: default_org_prefix(),
        }
    }
}

/// Verification portal configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifySection {
    /// Base URL of the public verification portal.
    #[serde(default = "default_portal_base_url")]
    pub portal_base_url: String,
}

impl VerifySection {
    /// Validates and returns the portal base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPortalUrl`] when the URL does not
    /// parse or uses a scheme other than http(s).
    pub fn portal_base(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.portal_base_url.trim())
            .map_err(|err| ConfigError::InvalidPortalUrl(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidPortalUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        Ok(url)
    }
}

impl Default for VerifySection {
    fn default() -> Self {
        Self {
            portal_base_url: default_portal_base_url(),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default store path.
fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Returns the default organization prefix.
fn default_org_prefix() -> String {
    verity_core::DEFAULT_ORG_PREFIX.to_string()
}

/// Returns the default portal base URL.
fn default_portal_base_url() -> String {
    DEFAULT_PORTAL_BASE_URL.to_string()
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl RegistryConfig {
    /// Loads configuration from the given path, the environment override,
    /// the default filename, or built-in defaults, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a resolved file cannot be read or
    /// parsed, or when any section fails validation.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_config_path(explicit_path);
        let config = match resolved {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads and parses one specific config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, or
    /// unparsable.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let actual_bytes = usize::try_from(metadata.len())
            .map_err(|_| ConfigError::Io("config file size overflow".to_string()))?;
        if actual_bytes > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                max_bytes: MAX_CONFIG_FILE_SIZE,
                actual_bytes,
            });
        }
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        toml::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates every section eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first invalid section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_store_path(&self.store.path)?;
        self.issuer.org_prefix()?;
        self.verify.portal_base()?;
        Ok(())
    }
}

/// Resolves the config path from explicit, environment, or default sources.
fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    if let Ok(from_env) = env::var(CONFIG_ENV_VAR)
        && !from_env.trim().is_empty()
    {
        return Some(PathBuf::from(from_env));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    default.exists().then_some(default)
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), ConfigError> {
    let path_string = path.display().to_string();
    if path_string.is_empty() {
        return Err(ConfigError::InvalidStorePath("store path is empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::InvalidStorePath("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::InvalidStorePath(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    Ok(())
}
