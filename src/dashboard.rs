// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Assembles everything one monthly dashboard render needs, with a lazy
//! cache keyed by typed invalidation events. Snapshots are immutable and
//! independent; a caller refreshing concurrently just keeps the most
//! recently completed one.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::aggregate;
use crate::core::breakdown::{self, CategorySlice};
use crate::core::classify;
use crate::core::project::{self, Valuation};
use crate::core::series::{self, MonthPoint};
use crate::core::trend::{self, Trend};
use crate::models::{CreditCard, DerivedEmi, DerivedInvestment, PeriodTotals, Profile, Record, Wish};
use crate::store::{DataProvider, Invalidated, RecordBatch, SkippedRecord, StoreTable};

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    /// YYYY-MM selector this snapshot was computed for.
    pub month: String,
    pub profile: Profile,
    pub totals: PeriodTotals,
    pub previous_totals: PeriodTotals,
    pub trend: Trend,
    pub breakdown: Vec<CategorySlice>,
    pub year_series: Vec<MonthPoint>,
    pub emis: Vec<DerivedEmi>,
    pub investments: Vec<DerivedInvestment>,
    pub cards: Vec<CreditCard>,
    pub wishes: Vec<Wish>,
    /// The selected month's records, most recent first.
    pub records: Vec<Record>,
    /// Rows the store could not decode; excluded from every total above.
    pub skipped: Vec<SkippedRecord>,
}

/// Lazily refreshed dashboard state. `invalidate` only marks sections dirty;
/// nothing is refetched until the next `snapshot` call.
pub struct DashboardCache<'a, P: DataProvider> {
    provider: &'a P,
    year: i32,
    month: u32,
    as_of: NaiveDate,
    valuation: &'a dyn Valuation,
    month_batch: Option<RecordBatch>,
    prev_batch: Option<RecordBatch>,
    year_batch: Option<RecordBatch>,
    cards: Option<Vec<CreditCard>>,
    wishes: Option<Vec<Wish>>,
    profile: Option<Profile>,
}

impl<'a, P: DataProvider> DashboardCache<'a, P> {
    pub fn new(
        provider: &'a P,
        year: i32,
        month: u32,
        as_of: NaiveDate,
        valuation: &'a dyn Valuation,
    ) -> Self {
        DashboardCache {
            provider,
            year,
            month,
            as_of,
            valuation,
            month_batch: None,
            prev_batch: None,
            year_batch: None,
            cards: None,
            wishes: None,
            profile: None,
        }
    }

    pub fn invalidate(&mut self, ev: Invalidated) {
        match ev.table {
            StoreTable::Transactions => {
                self.month_batch = None;
                self.prev_batch = None;
                self.year_batch = None;
            }
            StoreTable::CreditCards => self.cards = None,
            StoreTable::Wishes => self.wishes = None,
            StoreTable::Profile => self.profile = None,
        }
    }

    fn refresh(&mut self) -> Result<()> {
        let (start, end) = classify::month_bounds(self.year, self.month)
            .with_context(|| format!("Invalid month {:04}-{:02}", self.year, self.month))?;
        if self.month_batch.is_none() {
            self.month_batch = Some(self.provider.fetch_records(start, end)?);
        }
        if self.prev_batch.is_none() {
            let (py, pm) = classify::prev_month(self.year, self.month);
            let (pstart, pend) = classify::month_bounds(py, pm)
                .with_context(|| format!("Invalid month {:04}-{:02}", py, pm))?;
            self.prev_batch = Some(self.provider.fetch_records(pstart, pend)?);
        }
        if self.year_batch.is_none() {
            let (ystart, _) = classify::month_bounds(self.year, 1)
                .with_context(|| format!("Invalid year {}", self.year))?;
            let (_, yend) = classify::month_bounds(self.year, 12)
                .with_context(|| format!("Invalid year {}", self.year))?;
            self.year_batch = Some(self.provider.fetch_records(ystart, yend)?);
        }
        if self.cards.is_none() {
            self.cards = Some(self.provider.fetch_credit_cards()?);
        }
        if self.wishes.is_none() {
            self.wishes = Some(self.provider.fetch_wishes()?);
        }
        if self.profile.is_none() {
            self.profile = Some(self.provider.fetch_profile()?);
        }
        Ok(())
    }

    pub fn snapshot(&mut self) -> Result<DashboardSnapshot> {
        self.refresh()?;
        let month_batch = self.month_batch.as_ref().context("month records missing")?;
        let prev_batch = self.prev_batch.as_ref().context("previous records missing")?;
        let year_batch = self.year_batch.as_ref().context("year records missing")?;
        let cards = self.cards.as_ref().context("cards missing")?;
        let wishes = self.wishes.as_ref().context("wishes missing")?;
        let profile = self.profile.as_ref().context("profile missing")?;

        let totals = aggregate::period_totals(&month_batch.records, cards);
        // Card balances are a live snapshot; the same set backs both periods.
        let previous_totals = aggregate::period_totals(&prev_batch.records, cards);
        let trend = trend::trend(&totals, &previous_totals);

        let mut skipped: Vec<SkippedRecord> = Vec::new();
        for batch in [month_batch, prev_batch, year_batch] {
            for s in &batch.skipped {
                if !skipped.iter().any(|k| k.record_id == s.record_id) {
                    skipped.push(s.clone());
                }
            }
        }
        skipped.sort_by_key(|s| s.record_id);

        Ok(DashboardSnapshot {
            month: format!("{:04}-{:02}", self.year, self.month),
            profile: profile.clone(),
            breakdown: breakdown::category_breakdown(&month_batch.records),
            year_series: series::year_series(&year_batch.records, self.year),
            emis: project::derived_emis(&month_batch.records, self.as_of),
            investments: project::derived_investments(&month_batch.records, self.valuation),
            totals,
            previous_totals,
            trend,
            cards: cards.clone(),
            wishes: wishes.clone(),
            records: month_batch.records.clone(),
            skipped,
        })
    }
}

/// One-shot assembly for callers that do not hold a cache between reads.
pub fn build_snapshot<P: DataProvider>(
    provider: &P,
    year: i32,
    month: u32,
    as_of: NaiveDate,
    valuation: &dyn Valuation,
) -> Result<DashboardSnapshot> {
    DashboardCache::new(provider, year, month, as_of, valuation).snapshot()
}
