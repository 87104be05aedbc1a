// crates/bookstore-core/tests/value_properties.rs
// ============================================================================
// Module: Value Property Tests
// Description: Property-based checks for lookup tokens and sale dates.
// Purpose: Pin branch selection and date ordering over generated inputs.
// ============================================================================

//! Property-based tests for lookup parsing and sale date ordering.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use bookstore_core::PublisherId;
use bookstore_core::PublisherLookup;
use bookstore_core::SaleDate;
use proptest::prelude::*;

/// Unix microseconds from 1970 through 2099.
const MAX_MICROS: i64 = 4_102_444_800_000_000;

proptest! {
    #[test]
    fn integer_tokens_always_select_id(raw in any::<i64>(), pad in "[ \t]{0,3}") {
        let token = format!("{pad}{raw}{pad}");
        prop_assert_eq!(PublisherLookup::parse(&token), PublisherLookup::Id(PublisherId::new(raw)));
    }

    #[test]
    fn tokens_with_letters_select_trimmed_name(name in "[A-Za-z][A-Za-z0-9 '.-]{0,20}[A-Za-z0-9]") {
        let token = format!("  {name}\n");
        prop_assert_eq!(PublisherLookup::parse(&token), PublisherLookup::Name(name));
    }

    #[test]
    fn sale_dates_order_like_micros(a in 0 .. MAX_MICROS, b in 0 .. MAX_MICROS) {
        let left = SaleDate::from_unix_micros(a).unwrap();
        let right = SaleDate::from_unix_micros(b).unwrap();
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    #[test]
    fn rendered_sale_dates_parse_back(micros in 0 .. MAX_MICROS) {
        let date = SaleDate::from_unix_micros(micros).unwrap();
        let reparsed = SaleDate::parse(&date.to_string()).unwrap();
        prop_assert_eq!(reparsed.unix_micros(), micros);
    }
}
