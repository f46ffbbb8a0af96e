// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallyboard::core::amortization::{
    monthly_payment, months_elapsed, months_paid, remaining_months,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn zero_rate_divides_principal_evenly() {
    let p = monthly_payment(Decimal::from(120000), Decimal::ZERO, 12).unwrap();
    assert_eq!(p, Decimal::from(10000));
}

#[test]
fn zero_rate_rounds_to_currency() {
    let p = monthly_payment(Decimal::from(1000), Decimal::ZERO, 3).unwrap();
    assert_eq!(p.to_string(), "333.33");
}

#[test]
fn standard_amortization_formula() {
    // 100000 at 12% over 12 months is the textbook 8884.88 installment
    let p = monthly_payment(Decimal::from(100000), Decimal::from(12), 12).unwrap();
    assert_eq!(p.to_string(), "8884.88");
}

#[test]
fn rejects_out_of_domain_parameters() {
    assert!(monthly_payment(Decimal::ZERO, Decimal::from(10), 12).is_err());
    assert!(monthly_payment(Decimal::from(-5), Decimal::from(10), 12).is_err());
    assert!(monthly_payment(Decimal::from(1000), Decimal::from(10), 0).is_err());
    assert!(monthly_payment(Decimal::from(1000), Decimal::from(-1), 12).is_err());
}

#[test]
fn counts_whole_months_between_dates() {
    let start = d(2025, 1, 10);
    // Billing day not yet reached this month
    assert_eq!(months_elapsed(start, 5, d(2025, 3, 1)), 2);
    // Due day passed, so this cycle counts as paid
    assert_eq!(months_elapsed(start, 5, d(2025, 3, 5)), 3);
}

#[test]
fn elapsed_is_never_negative_before_start() {
    let start = d(2025, 6, 1);
    assert_eq!(months_elapsed(start, 1, d(2025, 3, 20)), 0);
}

#[test]
fn paid_is_clamped_to_tenure() {
    let start = d(2020, 1, 1);
    // Years past the end of the loan
    let paid = months_paid(start, 1, d(2030, 6, 15), 12);
    assert_eq!(paid, 12);
    assert_eq!(remaining_months(12, paid), 0);
}

#[test]
fn remaining_tracks_paid_within_tenure() {
    let start = d(2025, 1, 1);
    let paid = months_paid(start, 5, d(2025, 8, 5), 12);
    assert_eq!(paid, 8);
    assert_eq!(remaining_months(12, paid), 4);
}
