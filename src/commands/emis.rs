// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::core::{amortization, project};
use crate::models::{EmiDetail, RecordKind};
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_day_of_month, parse_decimal, pretty_table};

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

fn emi_title(lender: &str, category: &str) -> String {
    format!("{} - {}", lender, category.replace('_', " ").to_uppercase())
}

fn parse_tenure(s: &str) -> Result<u32> {
    s.parse::<u32>()
        .with_context(|| format!("Invalid tenure '{}', expected a number of months", s))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let lender = sub.get_one::<String>("lender").unwrap().trim().to_string();
    let loan_amount = parse_amount(sub.get_one::<String>("loan-amount").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let tenure = parse_tenure(sub.get_one::<String>("tenure").unwrap())?;
    let start_date = match sub.get_one::<String>("start-date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let due_day = match sub.get_one::<String>("due-day") {
        Some(s) => parse_day_of_month(s)?,
        None => 1,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "personal".to_string());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let monthly = amortization::monthly_payment(loan_amount, rate, tenure)?;
    let detail = EmiDetail {
        lender_name: lender.clone(),
        loan_amount,
        interest_rate: rate,
        tenure_months: tenure,
        start_date,
        due_day,
    };

    conn.execute(
        "INSERT INTO transactions(date, type, title, amount, category, detail)
         VALUES (?1, 'emi', ?2, ?3, ?4, ?5)",
        params![
            date.to_string(),
            emi_title(&lender, &category),
            monthly.to_string(),
            category,
            serde_json::to_string(&detail)?
        ],
    )?;
    println!(
        "Recorded EMI {}/month for {} ({} months)",
        monthly, lender, tenure
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let store = SqliteStore::new(conn);
    let batch = store.fetch_all_records()?;
    let emis = project::derived_emis(&batch.records, as_of);

    if !maybe_print_json(json_flag, jsonl_flag, &emis)? {
        let rows: Vec<Vec<String>> = emis
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.name.clone(),
                    format!("{:.2}", e.monthly_amount),
                    format!("{}/{}", e.months_paid, e.total_months),
                    e.remaining_months.to_string(),
                    format!("{:.2}", e.total_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Monthly", "Paid", "Remaining", "Loan"], rows)
        );
    }
    Ok(())
}

fn req<T>(v: Option<T>, what: &str) -> Result<T> {
    v.ok_or_else(|| {
        anyhow!(
            "Record has no stored loan terms; provide {} (and the other loan flags)",
            what
        )
    })
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let row: Option<(Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT category, detail FROM transactions WHERE id=?1 AND type='emi'",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let (category_db, detail_s) = row.ok_or_else(|| anyhow!("EMI record {} not found", id))?;
    let base = crate::store::decode_detail(id, RecordKind::Emi, detail_s.as_deref())
        .and_then(|d| d.emi().cloned());

    let lender = match sub.get_one::<String>("lender") {
        Some(s) => s.trim().to_string(),
        None => req(base.as_ref().map(|b| b.lender_name.clone()), "--lender")?,
    };
    let loan_amount = match sub.get_one::<String>("loan-amount") {
        Some(s) => parse_amount(s)?,
        None => req(base.as_ref().map(|b| b.loan_amount), "--loan-amount")?,
    };
    let rate = match sub.get_one::<String>("rate") {
        Some(s) => parse_decimal(s)?,
        None => req(base.as_ref().map(|b| b.interest_rate), "--rate")?,
    };
    let tenure = match sub.get_one::<String>("tenure") {
        Some(s) => parse_tenure(s)?,
        None => req(base.as_ref().map(|b| b.tenure_months), "--tenure")?,
    };
    let start_date = match sub.get_one::<String>("start-date") {
        Some(s) => parse_date(s)?,
        None => req(base.as_ref().map(|b| b.start_date), "--start-date")?,
    };
    let due_day = match sub.get_one::<String>("due-day") {
        Some(s) => parse_day_of_month(s)?,
        None => req(base.as_ref().map(|b| b.due_day), "--due-day")?,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.to_string())
        .or(category_db)
        .unwrap_or_else(|| "personal".to_string());

    let monthly = amortization::monthly_payment(loan_amount, rate, tenure)?;
    let detail = EmiDetail {
        lender_name: lender.clone(),
        loan_amount,
        interest_rate: rate,
        tenure_months: tenure,
        start_date,
        due_day,
    };

    conn.execute(
        "UPDATE transactions SET title=?2, amount=?3, category=?4, detail=?5 WHERE id=?1",
        params![
            id,
            emi_title(&lender, &category),
            monthly.to_string(),
            category,
            serde_json::to_string(&detail)?
        ],
    )?;
    println!("Updated EMI {} ({}/month over {} months)", id, monthly, tenure);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND type='emi'",
        params![id],
    )?;
    if n == 0 {
        return Err(anyhow!("EMI record {} not found", id));
    }
    println!("Deleted EMI record {}", id);
    Ok(())
}
