// crates/bookstore-store-sqlite/src/lib.rs
// ============================================================================
// Module: Bookstore SQLite Store
// Description: SQLite-backed implementation of the catalog store interface.
// Purpose: Host the schema, fixture loader, and sales report query.
// Dependencies: bookstore-core, rusqlite, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate provides [`SqliteCatalogStore`], the relational backend used by
//! the bookstore CLI. One store owns one `SQLite` connection for the whole run.

mod store;

pub use store::DEFAULT_BUSY_TIMEOUT_MS;
pub use store::IN_MEMORY_PATH;
pub use store::SqliteCatalogStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
