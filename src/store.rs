// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data-access layer: a swappable provider abstraction with a live sqlite
//! implementation and a canned sample implementation, plus the typed
//! invalidation events the dashboard cache consumes.

use anyhow::{Context, Result};
use chrono::{Days, Months, NaiveDate};
use log::warn;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{CoreError, classify};
use crate::models::{
    CreditCard, Currency, EmiDetail, InvestmentDetail, PaymentMethod, Profile, Record,
    RecordDetail, RecordKind, Wish,
};
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreTable {
    Transactions,
    CreditCards,
    Wishes,
    Profile,
}

/// Change notification: something in `table` was inserted, updated, or
/// deleted. Consumers treat this as a cache-invalidation signal and
/// recompute lazily on the next read.
#[derive(Debug, Clone, Copy)]
pub struct Invalidated {
    pub table: StoreTable,
}

/// A stored row that could not be decoded into a `Record`. Skipped rows are
/// excluded from aggregation but always accounted for.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub record_id: i64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRecord>,
}

pub trait DataProvider {
    /// Records whose date falls within the range, inclusive on both ends,
    /// most recent first.
    fn fetch_records(&self, start: NaiveDate, end: NaiveDate) -> Result<RecordBatch>;
    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>>;
    fn fetch_wishes(&self) -> Result<Vec<Wish>>;
    fn fetch_profile(&self) -> Result<Profile>;
}

/// Live provider over the sqlite database.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteStore { conn }
    }

    /// Every record regardless of date, most recent first.
    pub fn fetch_all_records(&self) -> Result<RecordBatch> {
        self.fetch_records_where(None)
    }

    fn fetch_records_where(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<RecordBatch> {
        let mut sql = String::from(
            "SELECT id, date, type, title, amount, category, payment_method, detail
             FROM transactions",
        );
        if range.is_some() {
            sql.push_str(" WHERE date >= ?1 AND date <= ?2");
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match range {
            Some((start, end)) => stmt.query(params![start.to_string(), end.to_string()])?,
            None => stmt.query([])?,
        };

        let mut batch = RecordBatch::default();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let date_s: String = r.get(1)?;
            let kind_s: String = r.get(2)?;
            let title: String = r.get(3)?;
            let amount_s: String = r.get(4)?;
            let category: Option<String> = r.get(5)?;
            let method_s: Option<String> = r.get(6)?;
            let detail_s: Option<String> = r.get(7)?;

            let date = match NaiveDate::parse_from_str(&date_s, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    let err = CoreError::UnparseableDate {
                        record_id: id,
                        raw: date_s,
                    };
                    warn!("{}", err);
                    batch.skipped.push(SkippedRecord {
                        record_id: id,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let Some(kind) = RecordKind::parse(&kind_s) else {
                warn!("unknown record kind '{}' on record {}", kind_s, id);
                batch.skipped.push(SkippedRecord {
                    record_id: id,
                    reason: format!("unknown record kind '{}'", kind_s),
                });
                continue;
            };
            let amount = match amount_s.parse::<Decimal>() {
                Ok(a) => a,
                Err(_) => {
                    warn!("invalid stored amount '{}' on record {}", amount_s, id);
                    batch.skipped.push(SkippedRecord {
                        record_id: id,
                        reason: format!("invalid stored amount '{}'", amount_s),
                    });
                    continue;
                }
            };
            let payment_method = match method_s {
                Some(ref s) => {
                    let parsed = PaymentMethod::parse(s);
                    if parsed.is_none() {
                        warn!("unknown payment method '{}' on record {}", s, id);
                    }
                    parsed
                }
                None => None,
            };

            batch.records.push(Record {
                id,
                date,
                kind,
                title,
                amount,
                category,
                payment_method,
                detail: decode_detail(id, kind, detail_s.as_deref()),
            });
        }
        Ok(batch)
    }
}

/// Decode the kind-specific payload at the storage boundary. A malformed
/// payload is recovered as `None` so downstream projections use their
/// degraded defaults; the failure is logged, not surfaced.
pub(crate) fn decode_detail(
    record_id: i64,
    kind: RecordKind,
    raw: Option<&str>,
) -> Option<RecordDetail> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    let parsed = match kind {
        RecordKind::Emi => serde_json::from_str::<EmiDetail>(text).map(RecordDetail::Emi),
        RecordKind::Investment => {
            serde_json::from_str::<InvestmentDetail>(text).map(RecordDetail::Investment)
        }
        _ => return None,
    };
    match parsed {
        Ok(detail) => Some(detail),
        Err(e) => {
            let err = CoreError::MalformedDetailPayload {
                record_id,
                reason: e.to_string(),
            };
            warn!("{}", err);
            None
        }
    }
}

impl DataProvider for SqliteStore<'_> {
    fn fetch_records(&self, start: NaiveDate, end: NaiveDate) -> Result<RecordBatch> {
        self.fetch_records_where(Some((start, end)))
    }

    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, last_four, network, credit_limit, current_balance, color_theme, due_day
             FROM credit_cards ORDER BY created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut cards = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let name: String = r.get(1)?;
            let limit_s: String = r.get(4)?;
            let balance_s: String = r.get(5)?;
            let due_day: Option<i64> = r.get(7)?;
            cards.push(CreditCard {
                id,
                credit_limit: limit_s
                    .parse::<Decimal>()
                    .with_context(|| format!("Invalid credit limit '{}' for card {}", limit_s, name))?,
                current_balance: balance_s.parse::<Decimal>().with_context(|| {
                    format!("Invalid card balance '{}' for card {}", balance_s, name)
                })?,
                name,
                last_four: r.get(2)?,
                network: r.get(3)?,
                color_theme: r.get(6)?,
                due_day: due_day.map(|d| d as u32),
            });
        }
        Ok(cards)
    }

    fn fetch_wishes(&self) -> Result<Vec<Wish>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, category, target_amount, current_amount, target_date
             FROM wishes ORDER BY created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut wishes = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let title: String = r.get(1)?;
            let target_s: String = r.get(3)?;
            let current_s: String = r.get(4)?;
            let target_date_s: Option<String> = r.get(5)?;
            wishes.push(Wish {
                id,
                target_amount: target_s.parse::<Decimal>().with_context(|| {
                    format!("Invalid target amount '{}' for wish {}", target_s, title)
                })?,
                current_amount: current_s.parse::<Decimal>().with_context(|| {
                    format!("Invalid current amount '{}' for wish {}", current_s, title)
                })?,
                target_date: match target_date_s {
                    Some(s) => Some(utils::parse_date(&s)?),
                    None => None,
                },
                title,
                category: r.get(2)?,
            });
        }
        Ok(wishes)
    }

    fn fetch_profile(&self) -> Result<Profile> {
        utils::get_profile(self.conn)
    }
}

/// Canned fixture provider, selected by the caller instead of the live
/// store. Dates are laid out relative to `anchor` so the sample always has
/// activity in the current month.
pub struct SampleStore {
    anchor: NaiveDate,
}

impl SampleStore {
    pub fn new(anchor: NaiveDate) -> Self {
        SampleStore { anchor }
    }

    fn all_records(&self) -> Vec<Record> {
        let a = self.anchor;
        vec![
            Record {
                id: 1,
                date: a,
                kind: RecordKind::Expense,
                title: "Grocery Shopping".into(),
                amount: Decimal::new(15680, 2),
                category: Some("Food".into()),
                payment_method: Some(PaymentMethod::Cash),
                detail: None,
            },
            Record {
                id: 2,
                date: a - Days::new(1),
                kind: RecordKind::Income,
                title: "Salary Credit".into(),
                amount: Decimal::from(4200),
                category: Some("Salary".into()),
                payment_method: None,
                detail: None,
            },
            Record {
                id: 3,
                date: a - Days::new(2),
                kind: RecordKind::Expense,
                title: "Gas Station".into(),
                amount: Decimal::new(6850, 2),
                category: Some("Transport".into()),
                payment_method: Some(PaymentMethod::Upi),
                detail: None,
            },
            Record {
                id: 4,
                date: a - Days::new(3),
                kind: RecordKind::Expense,
                title: "Online Shopping".into(),
                amount: Decimal::new(24999, 2),
                category: Some("Shopping".into()),
                payment_method: Some(PaymentMethod::Cash),
                detail: None,
            },
            Record {
                id: 5,
                date: a - Days::new(4),
                kind: RecordKind::Expense,
                title: "Electricity Bill".into(),
                amount: Decimal::new(12730, 2),
                category: Some("Bills".into()),
                payment_method: Some(PaymentMethod::Upi),
                detail: None,
            },
            Record {
                id: 6,
                date: a,
                kind: RecordKind::Emi,
                title: "Axis Bank - PERSONAL".into(),
                amount: Decimal::from(500),
                category: Some("personal".into()),
                payment_method: None,
                detail: Some(RecordDetail::Emi(EmiDetail {
                    lender_name: "Axis Bank".into(),
                    loan_amount: Decimal::from(6000),
                    interest_rate: Decimal::ZERO,
                    tenure_months: 12,
                    start_date: a - Months::new(5),
                    due_day: 5,
                })),
            },
            Record {
                id: 7,
                date: a,
                kind: RecordKind::Investment,
                title: "Stocks".into(),
                amount: Decimal::from(2000),
                category: Some("stocks".into()),
                payment_method: None,
                detail: Some(RecordDetail::Investment(InvestmentDetail {
                    category: Some("stocks".into()),
                    purchase_date: Some(a),
                    ..InvestmentDetail::default()
                })),
            },
        ]
    }
}

impl DataProvider for SampleStore {
    fn fetch_records(&self, start: NaiveDate, end: NaiveDate) -> Result<RecordBatch> {
        let all = self.all_records();
        let records = classify::in_period(&all, start, end)
            .into_iter()
            .cloned()
            .collect();
        Ok(RecordBatch {
            records,
            skipped: Vec::new(),
        })
    }

    fn fetch_credit_cards(&self) -> Result<Vec<CreditCard>> {
        Ok(vec![
            CreditCard {
                id: 1,
                name: "Chase Sapphire".into(),
                last_four: "4532".into(),
                network: Some("Visa".into()),
                credit_limit: Decimal::from(5000),
                current_balance: Decimal::from(1250),
                color_theme: Some("#4f46e5".into()),
                due_day: Some(15),
            },
            CreditCard {
                id: 2,
                name: "Amex Platinum".into(),
                last_four: "3421".into(),
                network: Some("American Express".into()),
                credit_limit: Decimal::from(10000),
                current_balance: Decimal::from(2800),
                color_theme: Some("#6b7280".into()),
                due_day: Some(20),
            },
        ])
    }

    fn fetch_wishes(&self) -> Result<Vec<Wish>> {
        let a = self.anchor;
        Ok(vec![
            Wish {
                id: 1,
                title: "iPhone 15 Pro".into(),
                category: Some("gadget".into()),
                target_amount: Decimal::from(1199),
                current_amount: Decimal::from(450),
                target_date: Some(a + Days::new(120)),
            },
            Wish {
                id: 2,
                title: "MacBook Air".into(),
                category: Some("gadget".into()),
                target_amount: Decimal::from(1299),
                current_amount: Decimal::from(800),
                target_date: Some(a + Days::new(180)),
            },
            Wish {
                id: 3,
                title: "Vacation to Japan".into(),
                category: Some("travel".into()),
                target_amount: Decimal::from(3500),
                current_amount: Decimal::from(1200),
                target_date: Some(a + Days::new(300)),
            },
        ])
    }

    fn fetch_profile(&self) -> Result<Profile> {
        Ok(Profile {
            display_name: "John Doe".into(),
            currency: Currency::Usd,
        })
    }
}
