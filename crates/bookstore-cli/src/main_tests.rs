// crates/bookstore-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for token input, rendering, and overrides.
// Purpose: Pin report text, JSON shape, and locale resolution without a binary.
// Dependencies: bookstore-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the helpers behind `bookstore report` and `bookstore seed`:
//! bounded stdin token reads, report and count rendering, the JSON document
//! shape, config overrides, and locale selection.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Cursor;
use std::path::PathBuf;

use bookstore_core::fixture::parse_fixture;
use bookstore_core::runtime::seed_catalog;
use serde_json::json;

use super::BookstoreConfig;
use super::CatalogArgs;
use super::LangArg;
use super::Locale;
use super::MAX_TOKEN_BYTES;
use super::PublisherLookup;
use super::ReportOutput;
use super::SqliteCatalogStore;
use super::TableCounts;
use super::apply_overrides;
use super::read_token;
use super::render_counts;
use super::render_report_text;
use super::resolve_locale;
use super::run_sales_report;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const FIXTURE: &str = r#"[
    {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
    {"model": "book", "pk": 1, "fields": {"title": "X", "id_publisher": 1}},
    {"model": "shop", "pk": 1, "fields": {"name": "ShopA"}},
    {"model": "stock", "pk": 1, "fields": {"id_book": 1, "id_shop": 1, "count": 5}},
    {"model": "sale", "pk": 1, "fields": {"price": 9.99, "date_sale": "2023-01-01", "id_stock": 1, "count": 1}}
]"#;

fn seeded_store() -> (SqliteCatalogStore, TableCounts) {
    let mut store = SqliteCatalogStore::open_in_memory().unwrap();
    let records = parse_fixture(FIXTURE).unwrap();
    let counts = seed_catalog(&mut store, &records).unwrap();
    (store, counts)
}

// ============================================================================
// SECTION: Token Input
// ============================================================================

#[test]
fn read_token_strips_line_endings_only() {
    let mut input = Cursor::new(" Acme Books \r\nignored\n");
    assert_eq!(read_token(&mut input).unwrap(), " Acme Books ");
}

#[test]
fn read_token_at_eof_is_empty() {
    let mut input = Cursor::new("");
    assert_eq!(read_token(&mut input).unwrap(), "");
    assert_eq!(PublisherLookup::parse(""), PublisherLookup::Name(String::new()));
}

#[test]
fn read_token_is_bounded() {
    let oversized = "a".repeat(10_000);
    let mut input = Cursor::new(oversized);
    let token = read_token(&mut input).unwrap();
    assert_eq!(token.len(), usize::try_from(MAX_TOKEN_BYTES).unwrap());
}

#[test]
fn read_token_cap_inside_multibyte_char_is_not_found() {
    let prefix = "a".repeat(usize::try_from(MAX_TOKEN_BYTES).unwrap() - 1);
    let mut input = Cursor::new(format!("{prefix}é\n"));
    let token = read_token(&mut input).unwrap();
    assert_eq!(token, prefix);

    let (store, _) = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse(&token)).unwrap();
    assert_eq!(render_report_text(report.as_ref()), vec!["Publisher not found"]);
}

#[test]
fn read_token_rejects_invalid_utf8() {
    let mut input = Cursor::new(vec![b'a', 0xFF, b'b', b'\n']);
    let err = read_token(&mut input).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn report_text_lists_rows_then_summary() {
    let (store, _) = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse("1")).unwrap();
    assert_eq!(
        render_report_text(report.as_ref()),
        vec!["X | ShopA | 9.99 | 2023-01-01", "Found 1 sales for publisher Acme"]
    );
}

#[test]
fn report_text_for_missing_publisher_is_not_found() {
    let (store, _) = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse("2")).unwrap();
    assert_eq!(render_report_text(report.as_ref()), vec!["Publisher not found"]);
}

#[test]
fn report_json_shape_matches_contract() {
    let (store, _) = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse("Acme")).unwrap();
    let value = serde_json::to_value(ReportOutput::new(report.as_ref())).unwrap();
    assert_eq!(value["publisher"], json!({"id": 1, "name": "Acme"}));
    assert_eq!(value["count"], json!(1));
    let sale = &value["sales"][0];
    assert_eq!(sale["book_title"], json!("X"));
    assert_eq!(sale["shop_name"], json!("ShopA"));
    assert_eq!(sale["price"], json!("9.99"));
    assert_eq!(sale["sale_id"], json!(1));
}

#[test]
fn report_json_for_missing_publisher_is_null() {
    let value = serde_json::to_value(ReportOutput::new(None)).unwrap();
    assert_eq!(value, json!({"publisher": null, "sales": [], "count": 0}));
}

#[test]
fn counts_render_in_schema_order() {
    let (_, counts) = seeded_store();
    assert_eq!(
        render_counts(&counts),
        vec!["publisher: 1", "shop: 1", "book: 1", "stock: 1", "sale: 1"]
    );
}

// ============================================================================
// SECTION: Config and Locale
// ============================================================================

#[test]
fn overrides_replace_config_paths() {
    let mut config = BookstoreConfig::default();
    let args = CatalogArgs {
        config: None,
        database: Some(PathBuf::from(":memory:")),
        fixture: Some(PathBuf::from("other.json")),
    };
    apply_overrides(&mut config, &args);
    assert!(config.database.is_in_memory());
    assert_eq!(config.fixture.path, PathBuf::from("other.json"));
}

#[test]
fn overrides_leave_unset_paths_alone() {
    let mut config = BookstoreConfig::default();
    apply_overrides(&mut config, &CatalogArgs::default());
    assert_eq!(config, BookstoreConfig::default());
}

#[test]
fn locale_flag_wins_over_environment() {
    assert_eq!(resolve_locale(Some(LangArg::Ru), Some("en")).unwrap(), Locale::Ru);
    assert_eq!(resolve_locale(None, Some("ru_RU.UTF-8")).unwrap(), Locale::Ru);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn invalid_locale_environment_is_rejected() {
    let err = resolve_locale(None, Some("klingon")).unwrap_err();
    assert!(err.to_string().contains("BOOKSTORE_LANG"), "{err}");
}
