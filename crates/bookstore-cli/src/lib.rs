// crates/bookstore-cli/src/lib.rs
// ============================================================================
// Module: Bookstore CLI Library
// Description: Shared helpers for the `bookstore` binary.
// Purpose: Expose localization and logging setup to the binary and its tests.
// Dependencies: tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `bookstore` binary lives in `main.rs`. This library carries the pieces
//! that integration tests exercise directly: the [`i18n`] message catalog and
//! the [`logging`] filter resolution.

pub mod i18n;
pub mod logging;

#[cfg(test)]
mod tests;
