// crates/bookstore-core/src/core/report.rs
// ============================================================================
// Module: Bookstore Sales Report Types
// Description: Publisher lookup keys and sales report rows.
// Purpose: Carry the query input and flat join projection between layers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A report starts from a user token. [`PublisherLookup::parse`] reads the
//! token as an integer id when it can and as an exact name otherwise. Once a
//! publisher is resolved, the report rows are always filtered by that
//! publisher's id, whichever branch found it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PublisherId;
use crate::core::identifiers::SaleId;
use crate::core::model::Publisher;
use crate::core::money::Price;
use crate::core::time::SaleDate;

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// How to find a publisher from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum PublisherLookup {
    /// Match the primary key.
    Id(PublisherId),
    /// Match the name exactly.
    Name(String),
}

impl PublisherLookup {
    /// Interprets a raw input token.
    ///
    /// Surrounding whitespace is ignored. Tokens that parse as an integer are
    /// ids; everything else, including the empty string, is a name.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        token.parse::<i64>().map_or_else(
            |_| Self::Name(token.to_string()),
            |raw| Self::Id(PublisherId::new(raw)),
        )
    }
}

impl fmt::Display for PublisherLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name='{name}'"),
        }
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// One sale joined to its book and shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReportRow {
    /// Sale primary key.
    pub sale_id: SaleId,
    /// Title of the sold book.
    pub book_title: String,
    /// Shop the sale happened in.
    pub shop_name: String,
    /// Sale price.
    pub price: Price,
    /// Sale timestamp.
    pub date_sale: SaleDate,
    /// Copies sold.
    pub count: u32,
}

impl SaleReportRow {
    /// Renders `<book title> | <shop name> | <price> | <date>`.
    #[must_use]
    pub fn render_line(&self) -> String {
        format!("{} | {} | {} | {}", self.book_title, self.shop_name, self.price, self.date_sale)
    }
}

/// All sales for one publisher, oldest first.
///
/// # Invariants
/// - Every row belongs to a book published by `publisher`.
/// - Rows are sorted non-decreasing by `date_sale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    /// Resolved publisher.
    pub publisher: Publisher,
    /// Report rows.
    pub sales: Vec<SaleReportRow>,
}

impl SalesReport {
    /// Number of sales in the report.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.sales.len()
    }

    /// Rendered report lines, one per sale.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.sales.iter().map(SaleReportRow::render_line).collect()
    }
}
