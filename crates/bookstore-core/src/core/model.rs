// crates/bookstore-core/src/core/model.rs
// ============================================================================
// Module: Bookstore Entities
// Description: Row types for publishers, books, shops, stock, and sales.
// Purpose: Mirror the five catalog tables with typed foreign keys.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Entities map 1:1 to catalog tables. Foreign keys use the identifier type of
//! the referenced table:
//!
//! ```text
//! Publisher <- Book <- Stock -> Shop
//!                        ^
//!                       Sale
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BookId;
use crate::core::identifiers::PublisherId;
use crate::core::identifiers::SaleId;
use crate::core::identifiers::ShopId;
use crate::core::identifiers::StockId;
use crate::core::money::Price;
use crate::core::time::SaleDate;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length, in characters, of publisher names, book titles, and shop names.
pub const MAX_NAME_CHARS: usize = 60;

// ============================================================================
// SECTION: Entities
// ============================================================================

/// Book publisher.
///
/// # Invariants
/// - `name` is unique across publishers and at most [`MAX_NAME_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Primary key.
    pub id: PublisherId,
    /// Publisher name.
    pub name: String,
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.name, self.id)
    }
}

/// Book title owned by a publisher.
///
/// # Invariants
/// - `title` is unique across books and at most [`MAX_NAME_CHARS`] characters.
/// - `publisher_id` references an existing [`Publisher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Primary key.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Owning publisher.
    pub publisher_id: PublisherId,
}

/// Retail shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Primary key.
    pub id: ShopId,
    /// Shop name, unique across shops.
    pub name: String,
}

impl fmt::Display for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Copies of a book held by a shop.
///
/// # Invariants
/// - `book_id` and `shop_id` reference existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Primary key.
    pub id: StockId,
    /// Stocked book.
    pub book_id: BookId,
    /// Shop holding the stock.
    pub shop_id: ShopId,
    /// Number of copies on hand.
    pub count: u32,
}

/// Sale of stocked copies at a price and date.
///
/// # Invariants
/// - `stock_id` references an existing [`Stock`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Primary key.
    pub id: SaleId,
    /// Sale price.
    pub price: Price,
    /// Sale timestamp (UTC).
    pub date_sale: SaleDate,
    /// Stock row the copies were sold from.
    pub stock_id: StockId,
    /// Number of copies sold.
    pub count: u32,
}
