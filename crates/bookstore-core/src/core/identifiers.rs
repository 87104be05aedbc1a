// crates/bookstore-core/src/core/identifiers.rs
// ============================================================================
// Module: Bookstore Identifiers
// Description: Primary key newtypes for the catalog entities.
// Purpose: Keep foreign keys from being mixed up across tables.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each table gets its own identifier type. Identifiers wrap the raw `SQLite`
//! integer key and serialize transparently as JSON numbers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Declares an integer primary key newtype.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from a raw key value.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Publisher primary key.
    PublisherId
);

entity_id!(
    /// Book primary key.
    BookId
);

entity_id!(
    /// Shop primary key.
    ShopId
);

entity_id!(
    /// Stock primary key.
    StockId
);

entity_id!(
    /// Sale primary key.
    SaleId
);
