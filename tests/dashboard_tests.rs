// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallyboard::core::project::FlatMarkup;
use tallyboard::dashboard::{DashboardCache, build_snapshot};
use tallyboard::db;
use tallyboard::models::{CreditCard, Profile, Record, RecordKind, Wish};
use tallyboard::store::{
    DataProvider, Invalidated, RecordBatch, SampleStore, SqliteStore, StoreTable,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[derive(Default)]
struct CountingProvider {
    records: Vec<Record>,
    cards: Vec<CreditCard>,
    wishes: Vec<Wish>,
    record_fetches: Cell<usize>,
    card_fetches: Cell<usize>,
    wish_fetches: Cell<usize>,
    profile_fetches: Cell<usize>,
}

impl DataProvider for CountingProvider {
    fn fetch_records(&self, start: NaiveDate, end: NaiveDate) -> Result<RecordBatch> {
        self.record_fetches.set(self.record_fetches.get() + 1);
        let records = self
            .records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        Ok(RecordBatch {
            records,
            skipped: Vec::new(),
        })
    }

    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>> {
        self.card_fetches.set(self.card_fetches.get() + 1);
        Ok(self.cards.clone())
    }

    fn fetch_wishes(&self) -> Result<Vec<Wish>> {
        self.wish_fetches.set(self.wish_fetches.get() + 1);
        Ok(self.wishes.clone())
    }

    fn fetch_profile(&self) -> Result<Profile> {
        self.profile_fetches.set(self.profile_fetches.get() + 1);
        Ok(Profile::default())
    }
}

fn income(id: i64, amount: &str, date: NaiveDate) -> Record {
    Record {
        id,
        date,
        kind: RecordKind::Income,
        title: format!("r{}", id),
        amount: amount.parse().unwrap(),
        category: None,
        payment_method: None,
        detail: None,
    }
}

#[test]
fn snapshot_reads_are_cached_until_invalidated() {
    let provider = CountingProvider {
        records: vec![income(1, "100", d(2025, 8, 10))],
        ..CountingProvider::default()
    };
    let valuation = FlatMarkup::default();
    let mut cache = DashboardCache::new(&provider, 2025, 8, d(2025, 8, 15), &valuation);

    cache.snapshot().unwrap();
    // One fetch each for the selected month, the previous month, and the year
    assert_eq!(provider.record_fetches.get(), 3);
    assert_eq!(provider.card_fetches.get(), 1);
    assert_eq!(provider.wish_fetches.get(), 1);
    assert_eq!(provider.profile_fetches.get(), 1);

    // A second read recomputes from cached data without refetching
    cache.snapshot().unwrap();
    assert_eq!(provider.record_fetches.get(), 3);
    assert_eq!(provider.card_fetches.get(), 1);
}

#[test]
fn invalidation_is_per_table() {
    let provider = CountingProvider::default();
    let valuation = FlatMarkup::default();
    let mut cache = DashboardCache::new(&provider, 2025, 8, d(2025, 8, 15), &valuation);
    cache.snapshot().unwrap();

    cache.invalidate(Invalidated {
        table: StoreTable::Wishes,
    });
    cache.snapshot().unwrap();
    assert_eq!(provider.wish_fetches.get(), 2);
    assert_eq!(provider.record_fetches.get(), 3);
    assert_eq!(provider.card_fetches.get(), 1);

    cache.invalidate(Invalidated {
        table: StoreTable::Transactions,
    });
    cache.snapshot().unwrap();
    assert_eq!(provider.record_fetches.get(), 6);
    assert_eq!(provider.wish_fetches.get(), 2);
}

#[test]
fn repeated_invalidations_are_idempotent() {
    let provider = CountingProvider::default();
    let valuation = FlatMarkup::default();
    let mut cache = DashboardCache::new(&provider, 2025, 8, d(2025, 8, 15), &valuation);
    cache.snapshot().unwrap();

    for _ in 0..5 {
        cache.invalidate(Invalidated {
            table: StoreTable::CreditCards,
        });
    }
    cache.snapshot().unwrap();
    assert_eq!(provider.card_fetches.get(), 2);
}

#[test]
fn end_to_end_month_over_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, type, title, amount, category, payment_method) VALUES
            ('2025-08-01','income','Salary Credit','4200','Salary',NULL),
            ('2025-08-05','expense','Groceries','150','Food','Cash'),
            ('2025-08-07','expense','Dining','80','Food','Credit Card');
        INSERT INTO credit_cards(name, last_four, credit_limit, current_balance)
        VALUES ('Chase Sapphire','4532','5000','80');
        "#,
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    let valuation = FlatMarkup::default();
    let snap = build_snapshot(&store, 2025, 8, d(2025, 8, 15), &valuation).unwrap();

    assert_eq!(snap.month, "2025-08");
    assert_eq!(snap.totals.income, Decimal::from(4200));
    assert_eq!(snap.totals.expenses, Decimal::from(230));
    assert_eq!(snap.totals.credit_card_usage, Decimal::from(80));
    assert_eq!(snap.totals.balance, Decimal::from(3970));

    // No prior-month activity: the common zero-previous case
    assert_eq!(snap.trend.income, "+100%");
    assert_eq!(snap.trend.expenses, "+100%");

    // Both Food expenses fold into a single slice
    assert_eq!(snap.breakdown.len(), 1);
    assert_eq!(snap.breakdown[0].category, "Food");
    assert_eq!(snap.breakdown[0].amount, Decimal::from(230));

    // August bucket of the year series carries the month's flows
    assert_eq!(snap.year_series[7].income, Decimal::from(4200));
    assert_eq!(snap.year_series[7].expense, Decimal::from(230));

    assert_eq!(snap.records.len(), 3);
    assert!(snap.skipped.is_empty());
}

#[test]
fn month_over_month_trend_over_sqlite() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, type, title, amount) VALUES
            ('2025-07-15','income','Salary','100'),
            ('2025-08-15','income','Salary','110');
        "#,
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    let valuation = FlatMarkup::default();
    let snap = build_snapshot(&store, 2025, 8, d(2025, 8, 20), &valuation).unwrap();
    assert_eq!(snap.trend.income, "+10.0%");
    assert_eq!(snap.previous_totals.income, Decimal::from(100));
}

#[test]
fn skipped_rows_surface_once_in_the_snapshot() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    // The bad row falls inside both the month fetch and the year fetch
    conn.execute_batch(
        r#"
        INSERT INTO transactions(id, date, type, title, amount) VALUES
            (1,'2025-08-10','income','good','100'),
            (2,'2025-08-11','income','bad','nope');
        "#,
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    let valuation = FlatMarkup::default();
    let snap = build_snapshot(&store, 2025, 8, d(2025, 8, 15), &valuation).unwrap();
    assert_eq!(snap.skipped.len(), 1);
    assert_eq!(snap.skipped[0].record_id, 2);
    assert_eq!(snap.totals.income, Decimal::from(100));
}

#[test]
fn sample_store_renders_a_full_dashboard() {
    let anchor = d(2025, 8, 15);
    let store = SampleStore::new(anchor);
    let valuation = FlatMarkup::default();
    let snap = build_snapshot(&store, 2025, 8, anchor, &valuation).unwrap();

    assert_eq!(snap.profile.display_name, "John Doe");
    assert_eq!(snap.totals.income, Decimal::from(4200));
    assert_eq!(snap.totals.credit_card_usage, Decimal::from(4050));
    assert_eq!(snap.emis.len(), 1);
    assert_eq!(snap.emis[0].total_months, 12);
    assert_eq!(snap.investments.len(), 1);
    assert_eq!(snap.investments[0].current_value, Decimal::from(2100));
    assert_eq!(snap.wishes.len(), 3);
    assert_eq!(snap.breakdown.len(), 4);
}
