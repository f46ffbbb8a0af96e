// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Record, RecordKind};

/// Chart palette, cycled by slice index.
pub const PALETTE: [&str; 6] = [
    "#60a5fa", "#34d399", "#fbbf24", "#f87171", "#a78bfa", "#fb7185",
];

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    pub color: &'static str,
}

/// Group expense amounts by category in first-seen order. Records without a
/// category land in "Other"; slices that aggregate to zero or less are
/// dropped after color assignment.
pub fn category_breakdown(records: &[Record]) -> Vec<CategorySlice> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for r in records {
        if r.kind != RecordKind::Expense {
            continue;
        }
        let category = r.category.clone().unwrap_or_else(|| "Other".to_string());
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, amount)) => *amount += r.amount,
            None => groups.push((category, r.amount)),
        }
    }
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (category, amount))| CategorySlice {
            category,
            amount,
            color: PALETTE[i % PALETTE.len()],
        })
        .filter(|s| s.amount > Decimal::ZERO)
        .collect()
}
