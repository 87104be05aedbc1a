// crates/bookstore-config/src/config.rs
// ============================================================================
// Module: Bookstore Config Model
// Description: TOML-backed settings for database, fixture, and logging.
// Purpose: Resolve, read, parse, and validate the CLI configuration.
// Dependencies: bookstore-store-sqlite, serde, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! The config file is located in this order: an explicit path, then the
//! [`CONFIG_ENV_VAR`] environment variable, then [`DEFAULT_CONFIG_FILE`] in
//! the working directory. When none applies the defaults are used.
//!
//! Security posture: config files are untrusted input. Path length, file
//! size, and encoding are checked before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use bookstore_store_sqlite::SqliteStoreConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable that names the config file.
pub const CONFIG_ENV_VAR: &str = "BOOKSTORE_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "bookstore.toml";
/// Fixture path used when the config does not name one.
pub const DEFAULT_FIXTURE_PATH: &str = "fixtures/tests_data.json";
/// Log level used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Maximum config file size in bytes.
const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem failure.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML syntax or shape failure.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Semantically invalid config.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Top-level bookstore configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookstoreConfig {
    /// `SQLite` connection settings.
    #[serde(default)]
    pub database: SqliteStoreConfig,
    /// Seed fixture settings.
    #[serde(default)]
    pub fixture: FixtureConfig,
    /// Diagnostic logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the seed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Path to the fixture JSON file.
    #[serde(default = "default_fixture_path")]
    pub path: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            path: default_fixture_path(),
        }
    }
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level directive such as `warn` or `debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parses the configured level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the level is not recognised.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| {
            ConfigError::Invalid(format!(
                "logging.level must be one of trace, debug, info, warn, error, off (got '{}')",
                self.level
            ))
        })
    }
}

/// Returns the default fixture path.
fn default_fixture_path() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_PATH)
}

/// Returns the default log level.
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl BookstoreConfig {
    /// Loads config from `path`, the environment, or the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, malformed, or
    /// fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_value = std::env::var_os(CONFIG_ENV_VAR);
        match resolve_config_path(path, env_value.as_deref()) {
            Some(resolved) => Self::load_file(&resolved),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Loads and validates a specific config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, malformed, or
    /// fails validation.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        validate_config_path(path)?;
        let metadata = fs::metadata(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "config file exceeds size limit ({} > {MAX_CONFIG_FILE_BYTES} bytes)",
                metadata.len()
            )));
        }
        let bytes =
            fs::read(path).map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        let content = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates semantic constraints not expressible in the TOML shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first failing field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".to_string()));
        }
        if self.database.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.busy_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.fixture.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("fixture.path must not be empty".to_string()));
        }
        self.logging.level_filter()?;
        Ok(())
    }
}

/// Picks the config file to read, if any.
///
/// An explicit path wins, then a non-empty `env_value`, then
/// [`DEFAULT_CONFIG_FILE`] when it exists in the working directory.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<&OsStr>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    fallback.is_file().then(|| fallback.to_path_buf())
}

/// Enforces path length limits before touching the filesystem.
fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
