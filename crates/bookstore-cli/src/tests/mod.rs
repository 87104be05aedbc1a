// crates/bookstore-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Library Unit Tests
// Description: Unit tests for crate-private CLI helpers.
// Purpose: Reach catalog internals that integration tests cannot see.
// ============================================================================

//! Unit tests for the bookstore CLI library.

mod logging;
