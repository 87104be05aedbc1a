// crates/bookstore-core/src/core/fixture.rs
// ============================================================================
// Module: Bookstore Fixtures
// Description: Typed parsing of the JSON seed file.
// Purpose: Validate every seed record before any row reaches the database.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A fixture is a JSON array of `{ "model", "pk", "fields" }` records. Each
//! record is decoded into a [`FixtureRecord`] variant whose field struct is
//! checked for unknown keys, missing columns, and overlong names.
//!
//! ## Invariants
//! - Records keep file order; nothing here reorders them for foreign keys.
//! - Errors carry the zero-based index of the offending record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::BookId;
use crate::core::identifiers::PublisherId;
use crate::core::identifiers::SaleId;
use crate::core::identifiers::ShopId;
use crate::core::identifiers::StockId;
use crate::core::model::Book;
use crate::core::model::MAX_NAME_CHARS;
use crate::core::model::Publisher;
use crate::core::model::Sale;
use crate::core::model::Shop;
use crate::core::model::Stock;
use crate::core::money::Price;
use crate::core::time::SaleDate;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum fixture file size accepted by [`read_fixture_file`].
pub const MAX_FIXTURE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fixture loading errors.
///
/// # Invariants
/// - Messages never embed the whole fixture payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// Fixture file could not be read.
    #[error("fixture io error at {path}: {message}")]
    Io {
        /// Fixture path.
        path: String,
        /// I/O error message.
        message: String,
    },
    /// Fixture file exceeds [`MAX_FIXTURE_BYTES`].
    #[error("fixture file exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual file size in bytes.
        actual_bytes: usize,
    },
    /// Fixture file is not UTF-8.
    #[error("fixture file must be utf-8")]
    NotUtf8,
    /// Fixture is not a JSON array of records.
    #[error("fixture json is malformed: {0}")]
    Json(String),
    /// Record names a model outside the five known tables.
    #[error("fixture record {index}: unknown model `{model}`")]
    UnknownModel {
        /// Zero-based record index.
        index: usize,
        /// Model tag found in the record.
        model: String,
    },
    /// Record fields do not match the model's columns.
    #[error("fixture record {index} ({model} pk={pk}): {message}")]
    InvalidFields {
        /// Zero-based record index.
        index: usize,
        /// Record model.
        model: ModelKind,
        /// Record primary key.
        pk: i64,
        /// Decode failure description.
        message: String,
    },
    /// A name or title column exceeds [`MAX_NAME_CHARS`].
    #[error("fixture record {index} ({model} pk={pk}): {field} exceeds {max} characters")]
    TooLong {
        /// Zero-based record index.
        index: usize,
        /// Record model.
        model: ModelKind,
        /// Record primary key.
        pk: i64,
        /// Column name.
        field: &'static str,
        /// Maximum allowed characters.
        max: usize,
    },
}

// ============================================================================
// SECTION: Model Tags
// ============================================================================

/// Catalog table named by a fixture record's `model` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// `publisher` table.
    Publisher,
    /// `shop` table.
    Shop,
    /// `book` table.
    Book,
    /// `stock` table.
    Stock,
    /// `sale` table.
    Sale,
}

impl ModelKind {
    /// Every model in foreign-key order (parents first).
    pub const ALL: [Self; 5] = [Self::Publisher, Self::Shop, Self::Book, Self::Stock, Self::Sale];

    /// Returns the fixture tag, which is also the table name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publisher => "publisher",
            Self::Shop => "shop",
            Self::Book => "book",
            Self::Stock => "stock",
            Self::Sale => "sale",
        }
    }

    /// Resolves a fixture tag to its model, if known.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// One typed seed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureRecord {
    /// Publisher row.
    Publisher(Publisher),
    /// Shop row.
    Shop(Shop),
    /// Book row.
    Book(Book),
    /// Stock row.
    Stock(Stock),
    /// Sale row.
    Sale(Sale),
}

impl FixtureRecord {
    /// Returns the table this record belongs to.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::Publisher(_) => ModelKind::Publisher,
            Self::Shop(_) => ModelKind::Shop,
            Self::Book(_) => ModelKind::Book,
            Self::Stock(_) => ModelKind::Stock,
            Self::Sale(_) => ModelKind::Sale,
        }
    }

    /// Returns the record's primary key.
    #[must_use]
    pub const fn pk(&self) -> i64 {
        match self {
            Self::Publisher(row) => row.id.get(),
            Self::Shop(row) => row.id.get(),
            Self::Book(row) => row.id.get(),
            Self::Stock(row) => row.id.get(),
            Self::Sale(row) => row.id.get(),
        }
    }
}

/// Untyped record envelope as it appears in the file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    /// Model tag.
    model: String,
    /// Primary key.
    pk: i64,
    /// Column values.
    fields: Value,
}

/// `publisher` columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PublisherFields {
    /// Publisher name.
    name: String,
}

/// `shop` columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShopFields {
    /// Shop name.
    name: String,
}

/// `book` columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BookFields {
    /// Book title.
    title: String,
    /// Owning publisher.
    #[serde(alias = "publisher_id")]
    id_publisher: i64,
}

/// `stock` columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StockFields {
    /// Stocked book.
    #[serde(alias = "book_id")]
    id_book: i64,
    /// Holding shop.
    #[serde(alias = "shop_id")]
    id_shop: i64,
    /// Copies on hand.
    count: u32,
}

/// `sale` columns.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SaleFields {
    /// Sale price.
    price: Price,
    /// Sale timestamp.
    date_sale: SaleDate,
    /// Source stock row.
    #[serde(alias = "stock_id")]
    id_stock: i64,
    /// Copies sold.
    count: u32,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses fixture JSON into typed records, preserving file order.
///
/// # Errors
///
/// Returns [`FixtureError`] for malformed JSON, unknown models, or invalid fields.
pub fn parse_fixture(input: &str) -> Result<Vec<FixtureRecord>, FixtureError> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(input).map_err(|err| FixtureError::Json(err.to_string()))?;
    raw.into_iter().enumerate().map(|(index, record)| decode_record(index, record)).collect()
}

/// Reads and parses a fixture file.
///
/// # Errors
///
/// Returns [`FixtureError`] when the file is unreadable, too large, not UTF-8,
/// or fails [`parse_fixture`].
pub fn read_fixture_file(path: &Path) -> Result<Vec<FixtureRecord>, FixtureError> {
    let io_error = |err: std::io::Error| FixtureError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    let declared = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if declared > MAX_FIXTURE_BYTES {
        return Err(FixtureError::TooLarge {
            max_bytes: MAX_FIXTURE_BYTES,
            actual_bytes: declared,
        });
    }
    let bytes = fs::read(path).map_err(io_error)?;
    if bytes.len() > MAX_FIXTURE_BYTES {
        return Err(FixtureError::TooLarge {
            max_bytes: MAX_FIXTURE_BYTES,
            actual_bytes: bytes.len(),
        });
    }
    let text = String::from_utf8(bytes).map_err(|_| FixtureError::NotUtf8)?;
    parse_fixture(&text)
}

/// Decodes one envelope into its typed record.
fn decode_record(index: usize, raw: RawRecord) -> Result<FixtureRecord, FixtureError> {
    let Some(model) = ModelKind::from_tag(&raw.model) else {
        return Err(FixtureError::UnknownModel {
            index,
            model: raw.model,
        });
    };
    let pk = raw.pk;
    let fields = raw.fields;
    let record = match model {
        ModelKind::Publisher => {
            let fields: PublisherFields = decode_fields(index, model, pk, fields)?;
            check_name_length(index, model, pk, "name", &fields.name)?;
            FixtureRecord::Publisher(Publisher {
                id: PublisherId::new(pk),
                name: fields.name,
            })
        }
        ModelKind::Shop => {
            let fields: ShopFields = decode_fields(index, model, pk, fields)?;
            check_name_length(index, model, pk, "name", &fields.name)?;
            FixtureRecord::Shop(Shop {
                id: ShopId::new(pk),
                name: fields.name,
            })
        }
        ModelKind::Book => {
            let fields: BookFields = decode_fields(index, model, pk, fields)?;
            check_name_length(index, model, pk, "title", &fields.title)?;
            FixtureRecord::Book(Book {
                id: BookId::new(pk),
                title: fields.title,
                publisher_id: PublisherId::new(fields.id_publisher),
            })
        }
        ModelKind::Stock => {
            let fields: StockFields = decode_fields(index, model, pk, fields)?;
            FixtureRecord::Stock(Stock {
                id: StockId::new(pk),
                book_id: BookId::new(fields.id_book),
                shop_id: ShopId::new(fields.id_shop),
                count: fields.count,
            })
        }
        ModelKind::Sale => {
            let fields: SaleFields = decode_fields(index, model, pk, fields)?;
            FixtureRecord::Sale(Sale {
                id: SaleId::new(pk),
                price: fields.price,
                date_sale: fields.date_sale,
                stock_id: StockId::new(fields.id_stock),
                count: fields.count,
            })
        }
    };
    Ok(record)
}

/// Decodes a `fields` object into the model's column struct.
fn decode_fields<T: for<'de> Deserialize<'de>>(
    index: usize,
    model: ModelKind,
    pk: i64,
    fields: Value,
) -> Result<T, FixtureError> {
    serde_json::from_value(fields).map_err(|err| FixtureError::InvalidFields {
        index,
        model,
        pk,
        message: err.to_string(),
    })
}

/// Rejects names longer than [`MAX_NAME_CHARS`].
fn check_name_length(
    index: usize,
    model: ModelKind,
    pk: i64,
    field: &'static str,
    value: &str,
) -> Result<(), FixtureError> {
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(FixtureError::TooLong {
            index,
            model,
            pk,
            field,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}
