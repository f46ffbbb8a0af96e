// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallyboard::core::series::{MONTH_LABELS, year_series};
use tallyboard::models::{Record, RecordKind};

fn rec(id: i64, kind: RecordKind, amount: &str, y: i32, m: u32, d: u32) -> Record {
    Record {
        id,
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        kind,
        title: format!("r{}", id),
        amount: amount.parse().unwrap(),
        category: None,
        payment_method: None,
        detail: None,
    }
}

#[test]
fn always_produces_twelve_months_jan_to_dec() {
    let series = year_series(&[], 2025);
    assert_eq!(series.len(), 12);
    let labels: Vec<&str> = series.iter().map(|p| p.month).collect();
    assert_eq!(labels, MONTH_LABELS.to_vec());
    assert!(series.iter().all(|p| p.income.is_zero() && p.expense.is_zero()));
}

#[test]
fn buckets_records_by_calendar_month() {
    let records = vec![
        rec(1, RecordKind::Income, "1000", 2025, 1, 15),
        rec(2, RecordKind::Income, "500", 2025, 1, 20),
        rec(3, RecordKind::Expense, "75", 2025, 3, 2),
        rec(4, RecordKind::Income, "200", 2025, 12, 31),
    ];
    let series = year_series(&records, 2025);
    assert_eq!(series[0].income, Decimal::from(1500));
    assert_eq!(series[2].expense, Decimal::from(75));
    assert_eq!(series[11].income, Decimal::from(200));
}

#[test]
fn bucket_totals_preserve_in_year_sums() {
    let records = vec![
        rec(1, RecordKind::Income, "100.10", 2025, 2, 1),
        rec(2, RecordKind::Income, "200.20", 2025, 7, 9),
        rec(3, RecordKind::Expense, "50.05", 2025, 7, 10),
        rec(4, RecordKind::Expense, "10.95", 2025, 11, 28),
    ];
    let series = year_series(&records, 2025);
    let income: Decimal = series.iter().map(|p| p.income).sum();
    let expense: Decimal = series.iter().map(|p| p.expense).sum();
    assert_eq!(income.to_string(), "300.30");
    assert_eq!(expense.to_string(), "61.00");
}

#[test]
fn records_outside_the_year_are_ignored() {
    let records = vec![
        rec(1, RecordKind::Income, "100", 2024, 12, 31),
        rec(2, RecordKind::Income, "100", 2026, 1, 1),
        rec(3, RecordKind::Income, "100", 2025, 6, 15),
    ];
    let series = year_series(&records, 2025);
    let income: Decimal = series.iter().map(|p| p.income).sum();
    assert_eq!(income, Decimal::from(100));
}

#[test]
fn input_order_does_not_matter() {
    let a = vec![
        rec(1, RecordKind::Income, "100", 2025, 5, 1),
        rec(2, RecordKind::Expense, "40", 2025, 2, 1),
    ];
    let b = vec![a[1].clone(), a[0].clone()];
    let sa = year_series(&a, 2025);
    let sb = year_series(&b, 2025);
    for (x, y) in sa.iter().zip(sb.iter()) {
        assert_eq!(x.income, y.income);
        assert_eq!(x.expense, y.expense);
    }
}

#[test]
fn emi_and_investment_records_do_not_enter_the_series() {
    let records = vec![
        rec(1, RecordKind::Emi, "500", 2025, 4, 5),
        rec(2, RecordKind::Investment, "2000", 2025, 4, 5),
    ];
    let series = year_series(&records, 2025);
    assert!(series.iter().all(|p| p.income.is_zero() && p.expense.is_zero()));
}
