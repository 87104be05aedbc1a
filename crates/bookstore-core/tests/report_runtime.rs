// crates/bookstore-core/tests/report_runtime.rs
// ============================================================================
// Module: Report Runtime Tests
// Description: Exercise seed and report flows against an in-memory store.
// Purpose: Pin lookup parsing and the resolved-id filter independent of SQL.
// ============================================================================

//! ## Overview
//! Uses a vector-backed [`CatalogStore`] to check that:
//! - token parsing chooses the id or name branch
//! - name lookups still filter sales by the resolved publisher id
//! - a missing publisher is `Ok(None)`

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
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use bookstore_core::CatalogStore;
use bookstore_core::FixtureRecord;
use bookstore_core::Publisher;
use bookstore_core::PublisherId;
use bookstore_core::PublisherLookup;
use bookstore_core::SaleReportRow;
use bookstore_core::StoreError;
use bookstore_core::TableCounts;
use bookstore_core::fixture::parse_fixture;
use bookstore_core::runtime::run_sales_report;
use bookstore_core::runtime::seed_catalog;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Vector-backed store that resolves joins in memory.
#[derive(Default)]
struct MemoryStore {
    records: Vec<FixtureRecord>,
    resets: usize,
}

impl CatalogStore for MemoryStore {
    fn reset_schema(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.resets += 1;
        Ok(())
    }

    fn load_fixture(&mut self, records: &[FixtureRecord]) -> Result<TableCounts, StoreError> {
        self.records.extend_from_slice(records);
        Ok(TableCounts::from_records(records))
    }

    fn table_counts(&self) -> Result<TableCounts, StoreError> {
        Ok(TableCounts::from_records(&self.records))
    }

    fn find_publisher(&self, lookup: &PublisherLookup) -> Result<Option<Publisher>, StoreError> {
        Ok(self.records.iter().find_map(|record| match record {
            FixtureRecord::Publisher(publisher) => {
                let matches = match lookup {
                    PublisherLookup::Id(id) => publisher.id == *id,
                    PublisherLookup::Name(name) => &publisher.name == name,
                };
                matches.then(|| publisher.clone())
            }
            _ => None,
        }))
    }

    fn sales_for_publisher(
        &self,
        publisher_id: PublisherId,
    ) -> Result<Vec<SaleReportRow>, StoreError> {
        let mut rows = Vec::new();
        for record in &self.records {
            let FixtureRecord::Sale(sale) = record else {
                continue;
            };
            let stock = self.records.iter().find_map(|r| match r {
                FixtureRecord::Stock(stock) if stock.id == sale.stock_id => Some(stock),
                _ => None,
            });
            let Some(stock) = stock else {
                return Err(StoreError::Integrity(format!("missing stock {}", sale.stock_id)));
            };
            let book = self.records.iter().find_map(|r| match r {
                FixtureRecord::Book(book) if book.id == stock.book_id => Some(book),
                _ => None,
            });
            let shop = self.records.iter().find_map(|r| match r {
                FixtureRecord::Shop(shop) if shop.id == stock.shop_id => Some(shop),
                _ => None,
            });
            let (Some(book), Some(shop)) = (book, shop) else {
                return Err(StoreError::Integrity("dangling stock".to_string()));
            };
            if book.publisher_id != publisher_id {
                continue;
            }
            rows.push(SaleReportRow {
                sale_id: sale.id,
                book_title: book.title.clone(),
                shop_name: shop.name.clone(),
                price: sale.price.clone(),
                date_sale: sale.date_sale,
                count: sale.count,
            });
        }
        rows.sort_by_key(|row| (row.date_sale, row.sale_id));
        Ok(rows)
    }
}

const FIXTURE: &str = r#"[
    {"model": "publisher", "pk": 1, "fields": {"name": "Acme"}},
    {"model": "publisher", "pk": 2, "fields": {"name": "42"}},
    {"model": "publisher", "pk": 42, "fields": {"name": "Numbers Inc"}},
    {"model": "shop", "pk": 1, "fields": {"name": "ShopA"}},
    {"model": "book", "pk": 1, "fields": {"title": "X", "id_publisher": 1}},
    {"model": "book", "pk": 2, "fields": {"title": "Y", "id_publisher": 2}},
    {"model": "stock", "pk": 1, "fields": {"id_book": 1, "id_shop": 1, "count": 5}},
    {"model": "stock", "pk": 2, "fields": {"id_book": 2, "id_shop": 1, "count": 5}},
    {"model": "sale", "pk": 1, "fields": {"price": 9.99, "date_sale": "2023-02-01", "id_stock": 1, "count": 1}},
    {"model": "sale", "pk": 2, "fields": {"price": 5, "date_sale": "2023-01-01", "id_stock": 1, "count": 1}},
    {"model": "sale", "pk": 3, "fields": {"price": 7, "date_sale": "2023-01-15", "id_stock": 2, "count": 1}}
]"#;

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::default();
    let records = parse_fixture(FIXTURE).unwrap();
    let counts = seed_catalog(&mut store, &records).unwrap();
    assert_eq!(counts, store.table_counts().unwrap());
    store
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn lookup_parse_prefers_integers() {
    assert_eq!(PublisherLookup::parse("1"), PublisherLookup::Id(PublisherId::new(1)));
    assert_eq!(PublisherLookup::parse(" 17 \n"), PublisherLookup::Id(PublisherId::new(17)));
    assert_eq!(PublisherLookup::parse("Acme"), PublisherLookup::Name("Acme".to_string()));
    assert_eq!(PublisherLookup::parse("1.5"), PublisherLookup::Name("1.5".to_string()));
    assert_eq!(PublisherLookup::parse(""), PublisherLookup::Name(String::new()));
}

#[test]
fn seeding_resets_before_loading() {
    let mut store = seeded_store();
    let records = parse_fixture(FIXTURE).unwrap();
    seed_catalog(&mut store, &records).unwrap();
    assert_eq!(store.resets, 2);
    assert_eq!(store.table_counts().unwrap().total(), 11);
}

#[test]
fn report_by_id_is_sorted_by_date() {
    let store = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse("1")).unwrap().unwrap();
    assert_eq!(report.publisher.name, "Acme");
    assert_eq!(report.count(), 2);
    assert_eq!(report.lines(), vec!["X | ShopA | 5 | 2023-01-01", "X | ShopA | 9.99 | 2023-02-01"]);
}

#[test]
fn report_by_name_filters_on_resolved_id() {
    let store = seeded_store();
    let by_name = run_sales_report(&store, &PublisherLookup::parse("Acme")).unwrap().unwrap();
    let by_id = run_sales_report(&store, &PublisherLookup::parse("1")).unwrap().unwrap();
    assert_eq!(by_name, by_id);
}

#[test]
fn numeric_tokens_never_fall_back_to_names() {
    let store = seeded_store();
    let report = run_sales_report(&store, &PublisherLookup::parse("42")).unwrap().unwrap();
    assert_eq!(report.publisher.id, PublisherId::new(42));
    assert_eq!(report.count(), 0);
}

#[test]
fn missing_publisher_is_none() {
    let store = seeded_store();
    assert!(run_sales_report(&store, &PublisherLookup::parse("2000")).unwrap().is_none());
    assert!(run_sales_report(&store, &PublisherLookup::parse("Nobody")).unwrap().is_none());
}
