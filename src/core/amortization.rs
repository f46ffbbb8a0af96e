// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::CoreError;

/// Currency rounding: two decimals, half away from zero.
pub fn round_currency(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Equated monthly installment for a loan.
///
/// Zero-rate loans divide the principal evenly; otherwise the standard
/// amortization formula `P * r * (1+r)^n / ((1+r)^n - 1)` applies with
/// `r` the monthly rate.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> Result<Decimal, CoreError> {
    if principal <= Decimal::ZERO || tenure_months == 0 || annual_rate_percent < Decimal::ZERO {
        return Err(CoreError::InvalidLoanParameters {
            principal,
            tenure_months,
        });
    }
    if annual_rate_percent.is_zero() {
        return Ok(round_currency(principal / Decimal::from(tenure_months)));
    }
    let r = annual_rate_percent / Decimal::from(1200);
    let factor = compound(Decimal::ONE + r, tenure_months);
    let payment = principal * r * factor / (factor - Decimal::ONE);
    Ok(round_currency(payment))
}

fn compound(base: Decimal, exp: u32) -> Decimal {
    let mut acc = Decimal::ONE;
    for _ in 0..exp {
        acc *= base;
    }
    acc
}

/// Whole months between `start` and `as_of`, counting the current billing
/// cycle as paid once its due day has passed. Never negative.
pub fn months_elapsed(start: NaiveDate, billing_day: u32, as_of: NaiveDate) -> u32 {
    let mut months = (as_of.year() - start.year()) * 12
        + (as_of.month() as i32 - start.month() as i32);
    if as_of.day() >= billing_day {
        months += 1;
    }
    months.max(0) as u32
}

/// Months elapsed, clamped to the loan tenure.
pub fn months_paid(start: NaiveDate, billing_day: u32, as_of: NaiveDate, tenure_months: u32) -> u32 {
    months_elapsed(start, billing_day, as_of).min(tenure_months)
}

pub fn remaining_months(tenure_months: u32, paid: u32) -> u32 {
    tenure_months.saturating_sub(paid)
}
