// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Record, RecordKind};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize)]
pub struct MonthPoint {
    pub month: &'static str,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Bucket one calendar year of records into fixed Jan-Dec income/expense
/// points. Records outside `year` are ignored; input order does not matter.
pub fn year_series(records: &[Record], year: i32) -> Vec<MonthPoint> {
    let mut points: Vec<MonthPoint> = MONTH_LABELS
        .iter()
        .map(|label| MonthPoint {
            month: label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();
    for r in records {
        if r.date.year() != year {
            continue;
        }
        let idx = (r.date.month() - 1) as usize;
        match r.kind {
            RecordKind::Income => points[idx].income += r.amount,
            RecordKind::Expense => points[idx].expense += r.amount,
            _ => {}
        }
    }
    points
}
