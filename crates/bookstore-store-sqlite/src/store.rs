// crates/bookstore-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Catalog Store
// Description: CatalogStore backed by a single SQLite connection.
// Purpose: Rebuild the catalog schema, seed it, and answer the sales report.
// Dependencies: bookstore-core, rusqlite, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! The store rebuilds its five tables on every run and loads fixtures inside
//! one transaction. Foreign keys are enforced by `SQLite`
//! (`PRAGMA foreign_keys = ON`), so a record whose parent has not been
//! inserted yet aborts the whole load and leaves the tables empty.
//!
//! Prices are stored as decimal TEXT and sale dates as INTEGER unix
//! microseconds, which keeps `ORDER BY date_sale` chronological.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use bookstore_core::CatalogStore;
use bookstore_core::FixtureRecord;
use bookstore_core::ModelKind;
use bookstore_core::Price;
use bookstore_core::Publisher;
use bookstore_core::PublisherId;
use bookstore_core::PublisherLookup;
use bookstore_core::SaleDate;
use bookstore_core::SaleId;
use bookstore_core::SaleReportRow;
use bookstore_core::StoreError;
use bookstore_core::TableCounts;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Path value that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";
/// Default database file name.
const DEFAULT_DATABASE_PATH: &str = "bookstore.db";
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Drops every catalog table, children first.
const DROP_SCHEMA_SQL: &str = "DROP TABLE IF EXISTS sale;
DROP TABLE IF EXISTS stock;
DROP TABLE IF EXISTS book;
DROP TABLE IF EXISTS shop;
DROP TABLE IF EXISTS publisher;";

/// Creates every catalog table, parents first.
const CREATE_SCHEMA_SQL: &str = "CREATE TABLE publisher (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE CHECK (length(name) <= 60)
);
CREATE TABLE shop (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE CHECK (length(name) <= 60)
);
CREATE TABLE book (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL UNIQUE CHECK (length(title) <= 60),
    id_publisher INTEGER NOT NULL REFERENCES publisher(id)
);
CREATE TABLE stock (
    id INTEGER PRIMARY KEY,
    id_book INTEGER NOT NULL REFERENCES book(id),
    id_shop INTEGER NOT NULL REFERENCES shop(id),
    count INTEGER NOT NULL CHECK (count >= 0)
);
CREATE TABLE sale (
    id INTEGER PRIMARY KEY,
    price TEXT NOT NULL,
    date_sale INTEGER NOT NULL,
    id_stock INTEGER NOT NULL REFERENCES stock(id),
    count INTEGER NOT NULL CHECK (count >= 0)
);
CREATE INDEX idx_book_publisher ON book (id_publisher);
CREATE INDEX idx_stock_book ON stock (id_book);
CREATE INDEX idx_stock_shop ON stock (id_shop);
CREATE INDEX idx_sale_stock ON sale (id_stock);
CREATE INDEX idx_sale_date ON sale (date_sale, id);";

/// Sales for one publisher, oldest first.
const SALES_FOR_PUBLISHER_SQL: &str = "SELECT sale.id, book.title, shop.name, sale.price, \
                                       sale.date_sale, sale.count
     FROM sale
     JOIN stock ON sale.id_stock = stock.id
     JOIN shop ON stock.id_shop = shop.id
     JOIN book ON stock.id_book = book.id
     JOIN publisher ON book.id_publisher = publisher.id
     WHERE publisher.id = ?1
     ORDER BY sale.date_sale ASC, sale.id ASC";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
    /// In-memory journal.
    Memory,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
            Self::Memory => "memory",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` catalog store.
///
/// # Invariants
/// - `path` is a file path or [`IN_MEMORY_PATH`].
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Returns a config for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::Memory,
            sync_mode: SqliteSyncMode::Full,
        }
    }

    /// Returns true when the config selects an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default database path.
fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Constraint violation (foreign key, uniqueness, check).
    #[error("sqlite store integrity error: {0}")]
    Integrity(String),
    /// Invalid store data or configuration.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Integrity(message) => Self::Integrity(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps engine errors, separating constraint violations.
fn db_error(err: &rusqlite::Error) -> SqliteStoreError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        SqliteStoreError::Integrity(err.to_string())
    } else {
        SqliteStoreError::Db(err.to_string())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed catalog store.
///
/// # Invariants
/// - Foreign keys are enforced on the owned connection.
/// - Fixture loads are atomic.
pub struct SqliteCatalogStore {
    /// Connection used for every operation of the run.
    connection: Connection,
}

impl SqliteCatalogStore {
    /// Opens a catalog store.
    ///
    /// The schema is not touched; call [`CatalogStore::reset_schema`] before
    /// loading.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid or the database
    /// cannot be opened.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let connection = if config.is_in_memory() {
            Connection::open_in_memory().map_err(|err| db_error(&err))?
        } else {
            validate_store_path(&config.path)?;
            ensure_parent_dir(&config.path)?;
            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
            Connection::open_with_flags(&config.path, flags).map_err(|err| db_error(&err))?
        };
        apply_pragmas(&connection, config)?;
        debug!(path = %config.path.display(), "opened sqlite catalog store");
        Ok(Self {
            connection,
        })
    }

    /// Opens a private in-memory catalog store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        Self::open(&SqliteStoreConfig::in_memory())
    }

    /// Drops and recreates every catalog table.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the DDL fails.
    pub fn rebuild_schema(&mut self) -> Result<(), SqliteStoreError> {
        let tx = self.connection.transaction().map_err(|err| db_error(&err))?;
        tx.execute_batch(DROP_SCHEMA_SQL).map_err(|err| db_error(&err))?;
        tx.execute_batch(CREATE_SCHEMA_SQL).map_err(|err| db_error(&err))?;
        tx.commit().map_err(|err| db_error(&err))?;
        debug!("catalog schema rebuilt");
        Ok(())
    }

    /// Inserts records in order inside one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Integrity`] naming the first record that
    /// violates a constraint; the transaction is rolled back.
    pub fn insert_records(
        &mut self,
        records: &[FixtureRecord],
    ) -> Result<TableCounts, SqliteStoreError> {
        let tx = self.connection.transaction().map_err(|err| db_error(&err))?;
        let mut counts = TableCounts::default();
        {
            let mut publisher_stmt = tx
                .prepare("INSERT INTO publisher (id, name) VALUES (?1, ?2)")
                .map_err(|err| db_error(&err))?;
            let mut shop_stmt = tx
                .prepare("INSERT INTO shop (id, name) VALUES (?1, ?2)")
                .map_err(|err| db_error(&err))?;
            let mut book_stmt = tx
                .prepare("INSERT INTO book (id, title, id_publisher) VALUES (?1, ?2, ?3)")
                .map_err(|err| db_error(&err))?;
            let mut stock_stmt = tx
                .prepare("INSERT INTO stock (id, id_book, id_shop, count) VALUES (?1, ?2, ?3, ?4)")
                .map_err(|err| db_error(&err))?;
            let mut sale_stmt = tx
                .prepare(
                    "INSERT INTO sale (id, price, date_sale, id_stock, count) VALUES (?1, ?2, ?3, \
                     ?4, ?5)",
                )
                .map_err(|err| db_error(&err))?;
            for (index, record) in records.iter().enumerate() {
                let result = match record {
                    FixtureRecord::Publisher(row) => {
                        publisher_stmt.execute(params![row.id.get(), row.name])
                    }
                    FixtureRecord::Shop(row) => shop_stmt.execute(params![row.id.get(), row.name]),
                    FixtureRecord::Book(row) => {
                        book_stmt.execute(params![row.id.get(), row.title, row.publisher_id.get()])
                    }
                    FixtureRecord::Stock(row) => stock_stmt.execute(params![
                        row.id.get(),
                        row.book_id.get(),
                        row.shop_id.get(),
                        i64::from(row.count)
                    ]),
                    FixtureRecord::Sale(row) => sale_stmt.execute(params![
                        row.id.get(),
                        row.price.to_string(),
                        row.date_sale.unix_micros(),
                        row.stock_id.get(),
                        i64::from(row.count)
                    ]),
                };
                result.map_err(|err| record_error(index, record, &err))?;
                counts.increment(record.kind());
            }
        }
        tx.commit().map_err(|err| db_error(&err))?;
        info!(
            publishers = counts.publishers,
            shops = counts.shops,
            books = counts.books,
            stocks = counts.stocks,
            sales = counts.sales,
            "fixture loaded"
        );
        Ok(counts)
    }

    /// Counts rows in every catalog table.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when a count query fails.
    pub fn count_rows(&self) -> Result<TableCounts, SqliteStoreError> {
        let mut counts = TableCounts::default();
        for kind in ModelKind::ALL {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.as_str());
            let raw: i64 =
                self.connection.query_row(&sql, [], |row| row.get(0)).map_err(|err| db_error(&err))?;
            let value = u64::try_from(raw)
                .map_err(|_| SqliteStoreError::Invalid(format!("negative row count for {kind}")))?;
            match kind {
                ModelKind::Publisher => counts.publishers = value,
                ModelKind::Shop => counts.shops = value,
                ModelKind::Book => counts.books = value,
                ModelKind::Stock => counts.stocks = value,
                ModelKind::Sale => counts.sales = value,
            }
        }
        Ok(counts)
    }

    /// Finds a publisher by id or exact name.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails.
    pub fn lookup_publisher(
        &self,
        lookup: &PublisherLookup,
    ) -> Result<Option<Publisher>, SqliteStoreError> {
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<Publisher> {
            Ok(Publisher {
                id: PublisherId::new(row.get(0)?),
                name: row.get(1)?,
            })
        };
        let publisher = match lookup {
            PublisherLookup::Id(id) => self
                .connection
                .query_row("SELECT id, name FROM publisher WHERE id = ?1", params![id.get()], map_row)
                .optional(),
            PublisherLookup::Name(name) => self
                .connection
                .query_row(
                    "SELECT id, name FROM publisher WHERE name = ?1 ORDER BY id LIMIT 1",
                    params![name],
                    map_row,
                )
                .optional(),
        }
        .map_err(|err| db_error(&err))?;
        debug!(%lookup, found = publisher.is_some(), "publisher lookup");
        Ok(publisher)
    }

    /// Lists a publisher's sales ordered by sale date, then sale id.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails or a stored value
    /// cannot be decoded.
    pub fn query_sales(
        &self,
        publisher_id: PublisherId,
    ) -> Result<Vec<SaleReportRow>, SqliteStoreError> {
        let mut stmt =
            self.connection.prepare(SALES_FOR_PUBLISHER_SQL).map_err(|err| db_error(&err))?;
        let rows = stmt
            .query_map(params![publisher_id.get()], |row| {
                let sale_id: i64 = row.get(0)?;
                let book_title: String = row.get(1)?;
                let shop_name: String = row.get(2)?;
                let price: String = row.get(3)?;
                let date_sale: i64 = row.get(4)?;
                let count: i64 = row.get(5)?;
                Ok((sale_id, book_title, shop_name, price, date_sale, count))
            })
            .map_err(|err| db_error(&err))?;
        let mut results = Vec::new();
        for row in rows {
            let (sale_id, book_title, shop_name, price, date_sale, count) =
                row.map_err(|err| db_error(&err))?;
            let price = Price::parse(&price)
                .map_err(|err| SqliteStoreError::Invalid(format!("sale {sale_id}: {err}")))?;
            let date_sale = SaleDate::from_unix_micros(date_sale)
                .map_err(|err| SqliteStoreError::Invalid(format!("sale {sale_id}: {err}")))?;
            let count = u32::try_from(count).map_err(|_| {
                SqliteStoreError::Invalid(format!("sale {sale_id}: count out of range: {count}"))
            })?;
            results.push(SaleReportRow {
                sale_id: SaleId::new(sale_id),
                book_title,
                shop_name,
                price,
                date_sale,
                count,
            });
        }
        debug!(publisher_id = publisher_id.get(), sales = results.len(), "sales report queried");
        Ok(results)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn reset_schema(&mut self) -> Result<(), StoreError> {
        self.rebuild_schema().map_err(StoreError::from)
    }

    fn load_fixture(&mut self, records: &[FixtureRecord]) -> Result<TableCounts, StoreError> {
        self.insert_records(records).map_err(StoreError::from)
    }

    fn table_counts(&self) -> Result<TableCounts, StoreError> {
        self.count_rows().map_err(StoreError::from)
    }

    fn find_publisher(&self, lookup: &PublisherLookup) -> Result<Option<Publisher>, StoreError> {
        self.lookup_publisher(lookup).map_err(StoreError::from)
    }

    fn sales_for_publisher(
        &self,
        publisher_id: PublisherId,
    ) -> Result<Vec<SaleReportRow>, StoreError> {
        self.query_sales(publisher_id).map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Attaches the failing record to an insert error.
fn record_error(index: usize, record: &FixtureRecord, err: &rusqlite::Error) -> SqliteStoreError {
    let context = format!("record {index} ({} pk={})", record.kind(), record.pk());
    match db_error(err) {
        SqliteStoreError::Integrity(message) => {
            SqliteStoreError::Integrity(format!("{context}: {message}"))
        }
        SqliteStoreError::Db(message) => SqliteStoreError::Db(format!("{context}: {message}")),
        other => other,
    }
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Applies connection pragmas.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection.execute_batch("PRAGMA foreign_keys = ON;").map_err(|err| db_error(&err))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| db_error(&err))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| db_error(&err))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| db_error(&err))?;
    Ok(())
}
