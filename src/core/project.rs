// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{amortization, classify};
use crate::models::{DerivedEmi, DerivedInvestment, Record, RecordKind};

/// Pricing strategy for investment projections. No live market feed is in
/// scope, so implementations map the invested amount to a current value.
pub trait Valuation {
    fn current_value(&self, invested: Decimal) -> Decimal;
}

/// Default placeholder strategy: a flat percentage markup over the invested
/// amount. Not a business rule; swap it out when a real pricing source lands.
#[derive(Debug, Clone, Copy)]
pub struct FlatMarkup {
    pub percent: Decimal,
}

impl Default for FlatMarkup {
    fn default() -> Self {
        FlatMarkup {
            percent: Decimal::from(5),
        }
    }
}

impl Valuation for FlatMarkup {
    fn current_value(&self, invested: Decimal) -> Decimal {
        amortization::round_currency(invested * (Decimal::ONE + self.percent / Decimal::from(100)))
    }
}

/// Project an EMI record into its tracker view. A missing or previously
/// rejected detail payload degrades to a 12-month schedule with nothing
/// paid; it never fails the projection.
pub fn project_emi(record: &Record, as_of: NaiveDate) -> DerivedEmi {
    let monthly = record.amount;
    match record.detail.as_ref().and_then(|d| d.emi()) {
        Some(d) => {
            let paid = amortization::months_paid(d.start_date, d.due_day, as_of, d.tenure_months);
            DerivedEmi {
                id: record.id,
                name: record.title.clone(),
                category: record.category.clone(),
                monthly_amount: monthly,
                total_amount: d.loan_amount,
                months_paid: paid,
                remaining_months: amortization::remaining_months(d.tenure_months, paid),
                total_months: d.tenure_months,
            }
        }
        None => DerivedEmi {
            id: record.id,
            name: record.title.clone(),
            category: record.category.clone(),
            monthly_amount: monthly,
            total_amount: monthly * Decimal::from(12),
            months_paid: 0,
            remaining_months: 12,
            total_months: 12,
        },
    }
}

pub fn project_investment(record: &Record, valuation: &dyn Valuation) -> DerivedInvestment {
    let invested = record.amount;
    let current_value = valuation.current_value(invested);
    let change_amount = current_value - invested;
    let change_percent = if invested.is_zero() {
        Decimal::ZERO
    } else {
        change_amount / invested * Decimal::from(100)
    };
    DerivedInvestment {
        id: record.id,
        name: record.title.clone(),
        category: record.category.clone(),
        invested_amount: invested,
        current_value,
        change_amount,
        change_percent,
    }
}

pub fn derived_emis(records: &[Record], as_of: NaiveDate) -> Vec<DerivedEmi> {
    classify::of_kind(records, RecordKind::Emi)
        .into_iter()
        .map(|r| project_emi(r, as_of))
        .collect()
}

pub fn derived_investments(records: &[Record], valuation: &dyn Valuation) -> Vec<DerivedInvestment> {
    classify::of_kind(records, RecordKind::Investment)
        .into_iter()
        .map(|r| project_investment(r, valuation))
        .collect()
}
