// crates/bookstore-config/src/lib.rs
// ============================================================================
// Module: Bookstore Config
// Description: Configuration model for the bookstore CLI.
// Purpose: Load `bookstore.toml` with strict guards and validate it.
// Dependencies: bookstore-store-sqlite, serde, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! [`BookstoreConfig`] gathers the database, fixture, and logging settings.
//! Loading is fail-closed: oversized, non-UTF-8, or unknown-key files are
//! rejected before any database work starts.

mod config;

pub use config::BookstoreConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_FILE;
pub use config::DEFAULT_FIXTURE_PATH;
pub use config::DEFAULT_LOG_LEVEL;
pub use config::FixtureConfig;
pub use config::LoggingConfig;
pub use config::resolve_config_path;
