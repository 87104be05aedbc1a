// crates/bookstore-core/src/interfaces/mod.rs
// ============================================================================
// Module: Bookstore Interfaces
// Description: Backend-agnostic catalog storage interface.
// Purpose: Define the contract the report runtime uses to reach a database.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! [`CatalogStore`] is the single seam between the report flow and a
//! relational backend. Implementations own their connection; callers pass the
//! store value explicitly to every operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::fixture::FixtureRecord;
use crate::core::fixture::ModelKind;
use crate::core::identifiers::PublisherId;
use crate::core::model::Publisher;
use crate::core::report::PublisherLookup;
use crate::core::report::SaleReportRow;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store I/O failure.
    #[error("store io error: {0}")]
    Io(String),
    /// Backend engine failure.
    #[error("store error: {0}")]
    Store(String),
    /// Foreign key or uniqueness constraint rejected a row.
    #[error("store integrity error: {0}")]
    Integrity(String),
    /// Stored data could not be decoded.
    #[error("store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Row Counts
// ============================================================================

/// Row counts per catalog table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    /// `publisher` rows.
    pub publishers: u64,
    /// `shop` rows.
    pub shops: u64,
    /// `book` rows.
    pub books: u64,
    /// `stock` rows.
    pub stocks: u64,
    /// `sale` rows.
    pub sales: u64,
}

impl TableCounts {
    /// Counts fixture records per model.
    #[must_use]
    pub fn from_records(records: &[FixtureRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.increment(record.kind());
        }
        counts
    }

    /// Adds one row to the given table's count.
    pub const fn increment(&mut self, kind: ModelKind) {
        match kind {
            ModelKind::Publisher => self.publishers += 1,
            ModelKind::Shop => self.shops += 1,
            ModelKind::Book => self.books += 1,
            ModelKind::Stock => self.stocks += 1,
            ModelKind::Sale => self.sales += 1,
        }
    }

    /// Returns the count for one table.
    #[must_use]
    pub const fn get(&self, kind: ModelKind) -> u64 {
        match kind {
            ModelKind::Publisher => self.publishers,
            ModelKind::Shop => self.shops,
            ModelKind::Book => self.books,
            ModelKind::Stock => self.stocks,
            ModelKind::Sale => self.sales,
        }
    }

    /// Total rows across all tables.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.publishers + self.shops + self.books + self.stocks + self.sales
    }
}

// ============================================================================
// SECTION: Catalog Store
// ============================================================================

/// Relational backend for the catalog.
pub trait CatalogStore {
    /// Drops and recreates every catalog table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the schema cannot be rebuilt.
    fn reset_schema(&mut self) -> Result<(), StoreError>;

    /// Inserts fixture records in the given order, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Integrity`] when a record violates a constraint;
    /// no rows from the batch remain in that case.
    fn load_fixture(&mut self, records: &[FixtureRecord]) -> Result<TableCounts, StoreError>;

    /// Counts rows per table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a count query fails.
    fn table_counts(&self) -> Result<TableCounts, StoreError>;

    /// Finds at most one publisher by id or exact name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure; a missing publisher is `Ok(None)`.
    fn find_publisher(&self, lookup: &PublisherLookup) -> Result<Option<Publisher>, StoreError>;

    /// Lists a publisher's sales ordered by sale date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on backend failure or undecodable rows.
    fn sales_for_publisher(
        &self,
        publisher_id: PublisherId,
    ) -> Result<Vec<SaleReportRow>, StoreError>;
}
