// crates/bookstore-cli/src/logging.rs
// ============================================================================
// Module: CLI Diagnostic Logging
// Description: Installs the `tracing` subscriber for the bookstore binary.
// Purpose: Route diagnostics to stderr so stdout carries only report output.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! The filter directive comes from `RUST_LOG` when it is set and non-empty,
//! otherwise from the configured level. An unparsable directive falls back to
//! [`FALLBACK_DIRECTIVE`].

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding a filter directive override.
pub const LOG_ENV: &str = "RUST_LOG";
/// Directive used when the resolved one does not parse.
pub const FALLBACK_DIRECTIVE: &str = "warn";

/// Picks the filter directive from the environment or the config level.
#[must_use]
pub fn resolve_directive(env_value: Option<&str>, config_level: &str) -> String {
    env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config_level.trim())
        .to_string()
}

/// Builds the filter for a directive, falling back on parse failure.
#[must_use]
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init(config_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_value = std::env::var(LOG_ENV).ok();
    let filter = build_filter(&resolve_directive(env_value.as_deref(), config_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
}
