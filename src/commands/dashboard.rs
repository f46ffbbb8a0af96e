// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::core::project::{FlatMarkup, Valuation};
use crate::dashboard::{DashboardSnapshot, build_snapshot};
use crate::store::{DataProvider, SampleStore, SqliteStore};
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let today = Utc::now().date_naive();
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => (today.year(), today.month()),
    };
    let valuation = FlatMarkup::default();

    if m.get_flag("sample") {
        let store = SampleStore::new(today);
        render(&store, year, month, today, &valuation, json_flag)
    } else {
        let store = SqliteStore::new(conn);
        render(&store, year, month, today, &valuation, json_flag)
    }
}

fn render<P: DataProvider>(
    provider: &P,
    year: i32,
    month: u32,
    today: NaiveDate,
    valuation: &dyn Valuation,
    json_flag: bool,
) -> Result<()> {
    let snap = build_snapshot(provider, year, month, today, valuation)?;
    if maybe_print_json(json_flag, false, &snap)? {
        return Ok(());
    }
    print_snapshot(&snap);
    Ok(())
}

fn print_snapshot(snap: &DashboardSnapshot) {
    let sym = snap.profile.currency.symbol();
    let money = |d: &Decimal| fmt_money(d, sym);

    if snap.profile.display_name.is_empty() {
        println!("Dashboard for {}", snap.month);
    } else {
        println!("Dashboard for {} — {}", snap.month, snap.profile.display_name);
    }

    let overview = vec![
        vec!["Income".to_string(), money(&snap.totals.income), snap.trend.income.clone()],
        vec!["Expenses".to_string(), money(&snap.totals.expenses), snap.trend.expenses.clone()],
        vec!["Investments".to_string(), money(&snap.totals.investment), String::new()],
        vec!["EMI".to_string(), money(&snap.totals.emi), String::new()],
        vec![
            "Card Usage".to_string(),
            money(&snap.totals.credit_card_usage),
            String::new(),
        ],
        vec!["Balance".to_string(), money(&snap.totals.balance), snap.trend.balance.clone()],
    ];
    println!("{}", pretty_table(&["", "Amount", "vs Last Month"], overview));

    if !snap.breakdown.is_empty() {
        println!("Expense Breakdown");
        let rows = snap
            .breakdown
            .iter()
            .map(|s| vec![s.category.clone(), money(&s.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Amount"], rows));
    }

    println!("Income vs Expenses");
    let rows = snap
        .year_series
        .iter()
        .map(|p| vec![p.month.to_string(), money(&p.income), money(&p.expense)])
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));

    if !snap.cards.is_empty() {
        println!("Credit Cards");
        let rows = snap
            .cards
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    format!("**** {}", c.last_four),
                    money(&c.current_balance),
                    money(&c.credit_limit),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Card", "Balance", "Limit"], rows));
    }

    if !snap.emis.is_empty() {
        println!("EMI Tracker");
        let rows = snap
            .emis
            .iter()
            .map(|e| {
                vec![
                    e.name.clone(),
                    money(&e.monthly_amount),
                    format!("{}/{}", e.months_paid, e.total_months),
                    e.remaining_months.to_string(),
                    money(&e.total_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Monthly", "Paid", "Remaining", "Loan"], rows)
        );
    }

    if !snap.investments.is_empty() {
        println!("Investments");
        let rows = snap
            .investments
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    money(&i.invested_amount),
                    money(&i.current_value),
                    format!("{} ({:.1}%)", money(&i.change_amount), i.change_percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Invested", "Value", "Change"], rows));
    }

    if !snap.wishes.is_empty() {
        println!("Wishes");
        let rows = snap
            .wishes
            .iter()
            .map(|w| {
                vec![
                    w.title.clone(),
                    format!("{} / {}", money(&w.current_amount), money(&w.target_amount)),
                    w.target_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Wish", "Progress", "Target Date"], rows));
    }

    if !snap.records.is_empty() {
        println!("Recent Transactions");
        let rows = snap
            .records
            .iter()
            .take(8)
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.kind.as_str().to_string(),
                    r.title.clone(),
                    money(&r.amount),
                    r.category.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Title", "Amount", "Category"], rows)
        );
    }

    if !snap.skipped.is_empty() {
        println!(
            "note: {} record(s) skipped; run `doctor` for details",
            snap.skipped.len()
        );
    }
}
