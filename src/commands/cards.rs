// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use crate::store::{DataProvider, SqliteStore};
use crate::utils::{maybe_print_json, parse_amount, parse_day_of_month, parse_decimal, pretty_table};

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

fn parse_last_four(s: &str) -> Result<String> {
    if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Last four '{}' must be exactly four digits", s));
    }
    Ok(s.to_string())
}

fn parse_limit(s: &str) -> Result<Decimal> {
    let limit = parse_decimal(s)?;
    if limit <= Decimal::ZERO {
        return Err(anyhow!("Credit limit '{}' must be positive", s));
    }
    Ok(limit)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let last_four = parse_last_four(sub.get_one::<String>("last-four").unwrap())?;
    let limit = parse_limit(sub.get_one::<String>("limit").unwrap())?;
    let balance = match sub.get_one::<String>("balance") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let due_day = match sub.get_one::<String>("due-day") {
        Some(s) => Some(parse_day_of_month(s)?),
        None => None,
    };

    if balance > limit {
        println!("warning: balance {} exceeds the credit limit {}", balance, limit);
    }
    conn.execute(
        "INSERT INTO credit_cards(name, last_four, network, credit_limit, current_balance, color_theme, due_day)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            last_four,
            sub.get_one::<String>("network"),
            limit.to_string(),
            balance.to_string(),
            sub.get_one::<String>("color"),
            due_day
        ],
    )?;
    println!("Added card {} (**** {})", name, last_four);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let cards = SqliteStore::new(conn).fetch_credit_cards()?;

    if !maybe_print_json(json_flag, jsonl_flag, &cards)? {
        let rows: Vec<Vec<String>> = cards
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    format!("**** {}", c.last_four),
                    c.network.clone().unwrap_or_default(),
                    format!("{:.2}", c.credit_limit),
                    format!("{:.2}", c.current_balance),
                    format!("{:.2}", c.credit_limit - c.current_balance),
                    c.due_day.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Card", "Network", "Limit", "Balance", "Available", "Due"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let cards = SqliteStore::new(conn).fetch_credit_cards()?;
    let current = cards
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("Card {} not found", id))?;

    let limit = match sub.get_one::<String>("limit") {
        Some(s) => parse_limit(s)?,
        None => current.credit_limit,
    };
    let balance = match sub.get_one::<String>("balance") {
        Some(s) => parse_amount(s)?,
        None => current.current_balance,
    };
    let last_four = match sub.get_one::<String>("last-four") {
        Some(s) => parse_last_four(s)?,
        None => current.last_four.clone(),
    };
    let due_day = match sub.get_one::<String>("due-day") {
        Some(s) => Some(parse_day_of_month(s)?),
        None => current.due_day,
    };

    if balance > limit {
        println!("warning: balance {} exceeds the credit limit {}", balance, limit);
    }
    conn.execute(
        "UPDATE credit_cards SET
            name=COALESCE(?2, name), last_four=?3, network=COALESCE(?4, network),
            credit_limit=?5, current_balance=?6, color_theme=COALESCE(?7, color_theme),
            due_day=?8
         WHERE id=?1",
        params![
            id,
            sub.get_one::<String>("name"),
            last_four,
            sub.get_one::<String>("network"),
            limit.to_string(),
            balance.to_string(),
            sub.get_one::<String>("color"),
            due_day
        ],
    )?;
    println!("Updated card {}", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM credit_cards WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Card {} not found", id));
    }
    println!("Deleted card {}", id);
    Ok(())
}
