// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::core::project::{self, FlatMarkup};
use crate::models::{InvestmentDetail, RecordKind};
use crate::store::SqliteStore;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_decimal, pretty_table};

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

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let purchase_date = match sub.get_one::<String>("purchase-date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let detail = InvestmentDetail {
        category: category.clone(),
        purchase_date: Some(purchase_date),
        quantity: match sub.get_one::<String>("quantity") {
            Some(s) => Some(parse_decimal(s)?),
            None => None,
        },
        purchase_price: match sub.get_one::<String>("purchase-price") {
            Some(s) => Some(parse_decimal(s)?),
            None => None,
        },
        interest_rate: match sub.get_one::<String>("rate") {
            Some(s) => Some(parse_decimal(s)?),
            None => None,
        },
        maturity_date: match sub.get_one::<String>("maturity-date") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
    };

    conn.execute(
        "INSERT INTO transactions(date, type, title, amount, category, detail)
         VALUES (?1, 'investment', ?2, ?3, ?4, ?5)",
        params![
            purchase_date.to_string(),
            name,
            amount.to_string(),
            category,
            serde_json::to_string(&detail)?
        ],
    )?;
    println!("Recorded investment '{}' {} on {}", name, amount, purchase_date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let valuation = match sub.get_one::<String>("markup") {
        Some(s) => FlatMarkup {
            percent: parse_decimal(s)?,
        },
        None => FlatMarkup::default(),
    };
    let store = SqliteStore::new(conn);
    let batch = store.fetch_all_records()?;
    let investments = project::derived_investments(&batch.records, &valuation);

    if !maybe_print_json(json_flag, jsonl_flag, &investments)? {
        let rows: Vec<Vec<String>> = investments
            .iter()
            .map(|i| {
                vec![
                    i.id.to_string(),
                    i.name.clone(),
                    i.category.clone().unwrap_or_default(),
                    format!("{:.2}", i.invested_amount),
                    format!("{:.2}", i.current_value),
                    format!("{:.2}", i.change_amount),
                    format!("{:.1}%", i.change_percent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Category", "Invested", "Value", "Change", "Change %"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let row: Option<(String, String, Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT title, amount, category, detail FROM transactions WHERE id=?1 AND type='investment'",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (title_db, amount_db, category_db, detail_s) =
        row.ok_or_else(|| anyhow!("Investment record {} not found", id))?;
    let base = crate::store::decode_detail(id, RecordKind::Investment, detail_s.as_deref())
        .and_then(|d| d.investment().cloned())
        .unwrap_or_default();

    let name = sub
        .get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .unwrap_or(title_db);
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_amount(s)?,
        None => parse_decimal(&amount_db)?,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.to_string())
        .or(category_db);
    let purchase_override = match sub.get_one::<String>("purchase-date") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let purchase_date = purchase_override.or(base.purchase_date);
    let detail = InvestmentDetail {
        category: category.clone(),
        purchase_date,
        quantity: match sub.get_one::<String>("quantity") {
            Some(s) => Some(parse_decimal(s)?),
            None => base.quantity,
        },
        purchase_price: match sub.get_one::<String>("purchase-price") {
            Some(s) => Some(parse_decimal(s)?),
            None => base.purchase_price,
        },
        interest_rate: match sub.get_one::<String>("rate") {
            Some(s) => Some(parse_decimal(s)?),
            None => base.interest_rate,
        },
        maturity_date: match sub.get_one::<String>("maturity-date") {
            Some(s) => Some(parse_date(s)?),
            None => base.maturity_date,
        },
    };

    // A changed purchase date moves the ledger date with it.
    conn.execute(
        "UPDATE transactions SET
            title=?2, amount=?3, category=?4, detail=?5,
            date=COALESCE(?6, date)
         WHERE id=?1",
        params![
            id,
            name,
            amount.to_string(),
            category,
            serde_json::to_string(&detail)?,
            purchase_override.map(|d| d.to_string())
        ],
    )?;
    println!("Updated investment {}", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND type='investment'",
        params![id],
    )?;
    if n == 0 {
        return Err(anyhow!("Investment record {} not found", id));
    }
    println!("Deleted investment record {}", id);
    Ok(())
}
