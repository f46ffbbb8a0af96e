// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::store::{DataProvider, SqliteStore};
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

fn parse_target(s: &str) -> Result<Decimal> {
    let target = parse_decimal(s)?;
    if target <= Decimal::ZERO {
        return Err(anyhow!("Target amount '{}' must be positive", s));
    }
    Ok(target)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    let target = parse_target(sub.get_one::<String>("target").unwrap())?;
    let current = match sub.get_one::<String>("current") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let target_date = match sub.get_one::<String>("target-date") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };

    conn.execute(
        "INSERT INTO wishes(title, category, target_amount, current_amount, target_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            title,
            sub.get_one::<String>("category"),
            target.to_string(),
            current.to_string(),
            target_date.map(|d| d.to_string())
        ],
    )?;
    println!("Added wish '{}' ({}/{})", title, current, target);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let wishes = SqliteStore::new(conn).fetch_wishes()?;

    if !maybe_print_json(json_flag, jsonl_flag, &wishes)? {
        let rows: Vec<Vec<String>> = wishes
            .iter()
            .map(|w| {
                let progress = if w.target_amount.is_zero() {
                    Decimal::ZERO
                } else {
                    w.current_amount / w.target_amount * Decimal::from(100)
                };
                vec![
                    w.id.to_string(),
                    w.title.clone(),
                    w.category.clone().unwrap_or_default(),
                    format!("{:.2}/{:.2} ({:.1}%)", w.current_amount, w.target_amount, progress),
                    w.target_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Title", "Category", "Progress", "Target Date"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let target = match sub.get_one::<String>("target") {
        Some(s) => Some(parse_target(s)?.to_string()),
        None => None,
    };
    let current = match sub.get_one::<String>("current") {
        Some(s) => Some(parse_amount(s)?.to_string()),
        None => None,
    };
    let target_date = match sub.get_one::<String>("target-date") {
        Some(s) => Some(parse_date(s)?.to_string()),
        None => None,
    };

    let n = conn.execute(
        "UPDATE wishes SET
            title=COALESCE(?2, title), category=COALESCE(?3, category),
            target_amount=COALESCE(?4, target_amount),
            current_amount=COALESCE(?5, current_amount),
            target_date=COALESCE(?6, target_date)
         WHERE id=?1",
        params![
            id,
            sub.get_one::<String>("title"),
            sub.get_one::<String>("category"),
            target,
            current,
            target_date
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Wish {} not found", id));
    }
    println!("Updated wish {}", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM wishes WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Wish {} not found", id));
    }
    println!("Deleted wish {}", id);
    Ok(())
}
