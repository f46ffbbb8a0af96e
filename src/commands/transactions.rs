// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::models::{PaymentMethod, Record, RecordKind};
use crate::store::{DataProvider, SqliteStore};
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<RecordKind> {
    RecordKind::parse(s).ok_or_else(|| anyhow!("Unknown kind '{}'", s))
}

fn parse_method(s: &str) -> Result<PaymentMethod> {
    PaymentMethod::parse(s)
        .ok_or_else(|| anyhow!("Unknown payment method '{}', expected cash, credit-card, or upi", s))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    match kind {
        RecordKind::Income | RecordKind::Expense => {}
        RecordKind::Emi => return Err(anyhow!("Use `emi add` to record a loan")),
        RecordKind::Investment => return Err(anyhow!("Use `invest add` to record an investment")),
    }
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let method = match sub.get_one::<String>("method") {
        Some(s) => {
            if kind != RecordKind::Expense {
                return Err(anyhow!("Payment method applies only to expenses"));
            }
            Some(parse_method(s)?)
        }
        None => None,
    };

    conn.execute(
        "INSERT INTO transactions(date, type, title, amount, category, payment_method)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date.to_string(),
            kind.as_str(),
            title,
            amount.to_string(),
            category,
            method.map(|p| p.as_str())
        ],
    )?;
    println!("Recorded {} '{}' {} on {}", kind.as_str(), title, amount, date);
    Ok(())
}

#[derive(Serialize)]
pub struct RecordRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub title: String,
    pub amount: String,
    pub category: String,
    pub method: String,
}

fn to_row(r: &Record) -> RecordRow {
    RecordRow {
        id: r.id,
        date: r.date.to_string(),
        kind: r.kind.as_str().to_string(),
        title: r.title.clone(),
        amount: format!("{:.2}", r.amount),
        category: r.category.clone().unwrap_or_default(),
        method: r
            .payment_method
            .map(|p| p.as_str().to_string())
            .unwrap_or_default(),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let store = SqliteStore::new(conn);
    let batch = match sub.get_one::<String>("month") {
        Some(month) => {
            let (year, m) = parse_month(month)?;
            let (start, end) = crate::core::classify::month_bounds(year, m)
                .ok_or_else(|| anyhow!("Invalid month '{}'", month))?;
            store.fetch_records(start, end)?
        }
        None => store.fetch_all_records()?,
    };

    let kind_filter = match sub.get_one::<String>("kind") {
        Some(s) => Some(parse_kind(s)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let data: Vec<RecordRow> = batch
        .records
        .iter()
        .filter(|r| kind_filter.is_none_or(|k| r.kind == k))
        .take(limit)
        .map(to_row)
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.title.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.method.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Kind", "Title", "Amount", "Category", "Method"],
                rows,
            )
        );
        if !batch.skipped.is_empty() {
            println!("note: {} record(s) skipped (undecodable)", batch.skipped.len());
        }
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let kind_s: Option<String> = conn
        .query_row(
            "SELECT type FROM transactions WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    let kind = parse_kind(&kind_s.ok_or_else(|| anyhow!("Record {} not found", id))?)?;
    match kind {
        RecordKind::Income | RecordKind::Expense => {}
        RecordKind::Emi => return Err(anyhow!("Use `emi edit` for EMI records")),
        RecordKind::Investment => return Err(anyhow!("Use `invest edit` for investment records")),
    }

    let amount = match sub.get_one::<String>("amount") {
        Some(s) => Some(parse_amount(s)?.to_string()),
        None => None,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => Some(parse_date(s)?.to_string()),
        None => None,
    };
    let method = match sub.get_one::<String>("method") {
        Some(s) => {
            if kind != RecordKind::Expense {
                return Err(anyhow!("Payment method applies only to expenses"));
            }
            Some(parse_method(s)?.as_str())
        }
        None => None,
    };

    conn.execute(
        "UPDATE transactions SET
            title = COALESCE(?2, title),
            amount = COALESCE(?3, amount),
            date = COALESCE(?4, date),
            category = COALESCE(?5, category),
            payment_method = COALESCE(?6, payment_method)
         WHERE id = ?1",
        params![
            id,
            sub.get_one::<String>("title"),
            amount,
            date,
            sub.get_one::<String>("category"),
            method
        ],
    )?;
    println!("Updated record {}", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Record {} not found", id));
    }
    println!("Deleted record {}", id);
    Ok(())
}
