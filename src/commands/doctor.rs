// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::models::{EmiDetail, InvestmentDetail};
use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Records that fail to decode: bad dates, bad amounts, negatives
    let mut stmt = conn.prepare("SELECT id, date, amount FROM transactions ORDER BY id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        if NaiveDate::parse_from_str(&date_s, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("record {} '{}'", id, date_s)]);
        }
        match amount_s.parse::<Decimal>() {
            Ok(a) if a < Decimal::ZERO => {
                rows.push(vec!["negative_amount".into(), format!("record {} {}", id, a)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec![
                    "bad_amount".into(),
                    format!("record {} '{}'", id, amount_s),
                ]);
            }
        }
    }

    // 2) EMI / investment payloads that will fall back to degraded defaults
    let mut stmt2 = conn.prepare(
        "SELECT id, type, detail FROM transactions WHERE type IN ('emi','investment') ORDER BY id",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let ty: String = r.get(1)?;
        let detail: Option<String> = r.get(2)?;
        match detail {
            None => {
                if ty == "emi" {
                    rows.push(vec!["missing_detail".into(), format!("record {}", id)]);
                }
            }
            Some(text) => {
                let ok = if ty == "emi" {
                    serde_json::from_str::<EmiDetail>(&text).is_ok()
                } else {
                    serde_json::from_str::<InvestmentDetail>(&text).is_ok()
                };
                if !ok {
                    rows.push(vec!["bad_detail".into(), format!("record {} ({})", id, ty)]);
                }
            }
        }
    }

    // 3) Cards drawn past their limit; accepted but worth surfacing
    let mut stmt3 =
        conn.prepare("SELECT name, credit_limit, current_balance FROM credit_cards ORDER BY id")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let limit_s: String = r.get(1)?;
        let balance_s: String = r.get(2)?;
        match (limit_s.parse::<Decimal>(), balance_s.parse::<Decimal>()) {
            (Ok(limit), Ok(balance)) if balance > limit => {
                rows.push(vec![
                    "card_over_limit".into(),
                    format!("{} {} > {}", name, balance, limit),
                ]);
            }
            (Ok(_), Ok(_)) => {}
            _ => rows.push(vec!["bad_card_amount".into(), name]),
        }
    }

    // 4) Wishes already past their target
    let mut stmt4 =
        conn.prepare("SELECT title, target_amount, current_amount FROM wishes ORDER BY id")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let title: String = r.get(0)?;
        let target_s: String = r.get(1)?;
        let current_s: String = r.get(2)?;
        if let (Ok(target), Ok(current)) =
            (target_s.parse::<Decimal>(), current_s.parse::<Decimal>())
        {
            if current > target {
                rows.push(vec![
                    "wish_over_target".into(),
                    format!("{} {} > {}", title, current, target),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
