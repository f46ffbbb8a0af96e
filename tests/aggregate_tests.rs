// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallyboard::core::aggregate::period_totals;
use tallyboard::core::trend::{percent_change, trend};
use tallyboard::models::{CreditCard, PaymentMethod, Record, RecordKind};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, n).unwrap()
}

fn rec(id: i64, kind: RecordKind, amount: &str, method: Option<PaymentMethod>) -> Record {
    Record {
        id,
        date: day(10),
        kind,
        title: format!("r{}", id),
        amount: amount.parse().unwrap(),
        category: None,
        payment_method: method,
        detail: None,
    }
}

fn card(balance: &str) -> CreditCard {
    CreditCard {
        id: 1,
        name: "Card".into(),
        last_four: "1234".into(),
        network: None,
        credit_limit: Decimal::from(10000),
        current_balance: balance.parse().unwrap(),
        color_theme: None,
        due_day: None,
    }
}

#[test]
fn balance_is_income_minus_outflows_without_cards() {
    let records = vec![
        rec(1, RecordKind::Income, "1000", None),
        rec(2, RecordKind::Expense, "200", Some(PaymentMethod::Cash)),
        rec(3, RecordKind::Expense, "50", Some(PaymentMethod::Upi)),
        rec(4, RecordKind::Investment, "300", None),
        rec(5, RecordKind::Emi, "100", None),
    ];
    let t = period_totals(&records, &[]);
    assert_eq!(t.income, Decimal::from(1000));
    assert_eq!(t.expenses, Decimal::from(250));
    assert_eq!(t.credit_card_usage, Decimal::ZERO);
    // income - expenses - investment - emi
    assert_eq!(t.balance, Decimal::from(350));
}

#[test]
fn card_paid_spending_is_counted_once() {
    // Identical months, except one expense flips from cash to credit card
    // while the card balance grows by the same amount.
    let cash = vec![
        rec(1, RecordKind::Income, "1000", None),
        rec(2, RecordKind::Expense, "80", Some(PaymentMethod::Cash)),
    ];
    let carded = vec![
        rec(1, RecordKind::Income, "1000", None),
        rec(2, RecordKind::Expense, "80", Some(PaymentMethod::CreditCard)),
    ];
    let a = period_totals(&cash, &[card("0")]);
    let b = period_totals(&carded, &[card("80")]);

    assert_eq!(a.balance, b.balance);
    assert_eq!(a.expenses, b.expenses);
    assert_eq!(a.credit_card_usage, Decimal::ZERO);
    assert_eq!(b.credit_card_usage, Decimal::from(80));
}

#[test]
fn dashboard_month_scenario() {
    let records = vec![
        rec(1, RecordKind::Income, "4200", None),
        rec(2, RecordKind::Expense, "150", Some(PaymentMethod::Cash)),
        rec(3, RecordKind::Expense, "80", Some(PaymentMethod::CreditCard)),
    ];
    let t = period_totals(&records, &[card("80")]);
    assert_eq!(t.income, Decimal::from(4200));
    assert_eq!(t.expenses, Decimal::from(230));
    assert_eq!(t.credit_card_usage, Decimal::from(80));
    // 4200 - 150 - 80: card-paid 80 only enters via the card balance
    assert_eq!(t.balance, Decimal::from(3970));
}

#[test]
fn percent_change_zero_previous_laws() {
    assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), "0%");
    assert_eq!(percent_change(Decimal::from(5), Decimal::ZERO), "+100%");
    assert_eq!(percent_change(Decimal::from(99999), Decimal::ZERO), "+100%");
}

#[test]
fn percent_change_is_signed_with_one_decimal() {
    assert_eq!(percent_change(Decimal::from(110), Decimal::from(100)), "+10.0%");
    assert_eq!(percent_change(Decimal::from(90), Decimal::from(100)), "-10.0%");
    assert_eq!(percent_change(Decimal::from(100), Decimal::from(100)), "+0.0%");
}

#[test]
fn trend_compares_period_totals_fieldwise() {
    let current = period_totals(
        &[
            rec(1, RecordKind::Income, "110", None),
            rec(2, RecordKind::Expense, "50", None),
        ],
        &[],
    );
    let previous = period_totals(
        &[
            rec(3, RecordKind::Income, "100", None),
            rec(4, RecordKind::Expense, "100", None),
        ],
        &[],
    );
    let t = trend(&current, &previous);
    assert_eq!(t.income, "+10.0%");
    assert_eq!(t.expenses, "-50.0%");
}
