// crates/bookstore-core/src/lib.rs
// ============================================================================
// Module: Bookstore Core
// Description: Domain model and store interface for the bookstore sales report.
// Purpose: Share typed entities, fixture records, and report types across crates.
// Dependencies: bigdecimal, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! `bookstore-core` defines the five catalog entities (publishers, books,
//! shops, stock, sales), the typed fixture records used to seed them, and the
//! [`CatalogStore`] interface implemented by storage backends. The crate
//! performs no database access of its own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::fixture;
pub use crate::core::fixture::FixtureError;
pub use crate::core::fixture::FixtureRecord;
pub use crate::core::fixture::ModelKind;
pub use crate::core::identifiers::BookId;
pub use crate::core::identifiers::PublisherId;
pub use crate::core::identifiers::SaleId;
pub use crate::core::identifiers::ShopId;
pub use crate::core::identifiers::StockId;
pub use crate::core::model::Book;
pub use crate::core::model::MAX_NAME_CHARS;
pub use crate::core::model::Publisher;
pub use crate::core::model::Sale;
pub use crate::core::model::Shop;
pub use crate::core::model::Stock;
pub use crate::core::money::Price;
pub use crate::core::money::PriceError;
pub use crate::core::report::PublisherLookup;
pub use crate::core::report::SaleReportRow;
pub use crate::core::report::SalesReport;
pub use crate::core::time::SaleDate;
pub use crate::core::time::SaleDateError;
pub use crate::interfaces::CatalogStore;
pub use crate::interfaces::StoreError;
pub use crate::interfaces::TableCounts;
