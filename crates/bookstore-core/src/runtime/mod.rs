// crates/bookstore-core/src/runtime/mod.rs
// ============================================================================
// Module: Bookstore Report Runtime
// Description: Seed and query flows composed over a CatalogStore.
// Purpose: Keep the report sequencing independent of the storage backend.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Two flows drive every run:
//! - [`seed_catalog`] rebuilds the schema and loads a fixture.
//! - [`run_sales_report`] resolves a publisher and collects its sales.
//!
//! A missing publisher is reported as `Ok(None)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::fixture::FixtureRecord;
use crate::core::report::PublisherLookup;
use crate::core::report::SalesReport;
use crate::interfaces::CatalogStore;
use crate::interfaces::StoreError;
use crate::interfaces::TableCounts;

// ============================================================================
// SECTION: Flows
// ============================================================================

/// Drops and recreates the schema, then loads `records` in order.
///
/// # Errors
///
/// Returns [`StoreError`] when the reset or the load fails.
pub fn seed_catalog<S: CatalogStore + ?Sized>(
    store: &mut S,
    records: &[FixtureRecord],
) -> Result<TableCounts, StoreError> {
    store.reset_schema()?;
    store.load_fixture(records)
}

/// Resolves the publisher for `lookup` and lists its sales.
///
/// The sales filter always uses the resolved publisher's id, including when
/// the lookup matched by name.
///
/// # Errors
///
/// Returns [`StoreError`] on backend failure.
pub fn run_sales_report<S: CatalogStore + ?Sized>(
    store: &S,
    lookup: &PublisherLookup,
) -> Result<Option<SalesReport>, StoreError> {
    let Some(publisher) = store.find_publisher(lookup)? else {
        return Ok(None);
    };
    let sales = store.sales_for_publisher(publisher.id)?;
    Ok(Some(SalesReport {
        publisher,
        sales,
    }))
}
