// crates/bookstore-core/src/core/mod.rs
// ============================================================================
// Module: Bookstore Core Types
// Description: Entities, identifiers, and value types for the catalog.
// Purpose: Group the pure data model used by stores and the CLI.
// Dependencies: bigdecimal, serde, time
// ============================================================================

//! ## Overview
//! Pure data types. Nothing in this module touches a database.

pub mod fixture;
pub mod identifiers;
pub mod model;
pub mod money;
pub mod report;
pub mod time;
