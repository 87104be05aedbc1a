// crates/bookstore-cli/src/tests/logging.rs
// ============================================================================
// Module: CLI Logging Tests
// Description: Unit tests for filter directive resolution.
// Purpose: Ensure `RUST_LOG` wins over config and bad directives fall back.
// ============================================================================

//! Filter directive resolution tests.

use crate::logging::build_filter;
use crate::logging::resolve_directive;

#[test]
fn env_directive_wins_when_set() {
    assert_eq!(resolve_directive(Some("bookstore=debug"), "warn"), "bookstore=debug");
}

#[test]
fn blank_env_directive_uses_config_level() {
    assert_eq!(resolve_directive(None, "info"), "info");
    assert_eq!(resolve_directive(Some("  "), " error "), "error");
}

#[test]
fn unparsable_directive_falls_back() {
    let filter = build_filter("bookstore=[[[");
    assert_eq!(filter.to_string(), "warn");
}
