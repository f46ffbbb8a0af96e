// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::PeriodTotals;

/// Signed percentage delta against the prior period, formatted for display.
///
/// A zero prior period is the common "no data last month" case and must keep
/// its exact behavior: any activity reads as "+100%", none as "0%".
pub fn percent_change(current: Decimal, previous: Decimal) -> String {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            "+100%".to_string()
        } else {
            "0%".to_string()
        };
    }
    let change = (current - previous) / previous * Decimal::from(100);
    if change >= Decimal::ZERO {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    pub income: String,
    pub expenses: String,
    pub balance: String,
}

pub fn trend(current: &PeriodTotals, previous: &PeriodTotals) -> Trend {
    Trend {
        income: percent_change(current.income, previous.income),
        expenses: percent_change(current.expenses, previous.expenses),
        balance: percent_change(current.balance, previous.balance),
    }
}
