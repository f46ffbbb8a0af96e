// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tallyboard::models::EmiDetail;
use tallyboard::{cli, commands::emis, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("emi", sub)) => emis::handle(conn, sub),
        _ => panic!("no emi subcommand"),
    }
}

#[test]
fn add_computes_the_installment_from_loan_terms() {
    let conn = setup();
    run(
        &conn,
        &[
            "tallyboard", "emi", "add", "--lender", "Axis Bank", "--loan-amount", "6000",
            "--rate", "0", "--tenure", "12", "--start-date", "2025-01-01", "--due-day", "5",
            "--category", "personal", "--date", "2025-08-01",
        ],
    )
    .unwrap();

    let (title, amount, detail): (String, String, String) = conn
        .query_row(
            "SELECT title, amount, detail FROM transactions WHERE type='emi'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(title, "Axis Bank - PERSONAL");
    assert_eq!(amount.parse::<rust_decimal::Decimal>().unwrap(), 500.into());

    let parsed: EmiDetail = serde_json::from_str(&detail).unwrap();
    assert_eq!(parsed.lender_name, "Axis Bank");
    assert_eq!(parsed.tenure_months, 12);
    assert_eq!(parsed.due_day, 5);
}

#[test]
fn add_rejects_zero_tenure() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "tallyboard", "emi", "add", "--lender", "Axis Bank", "--loan-amount", "6000",
            "--rate", "0", "--tenure", "0",
        ],
    );
    assert!(err.is_err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn edit_recomputes_the_installment() {
    let conn = setup();
    run(
        &conn,
        &[
            "tallyboard", "emi", "add", "--lender", "Axis Bank", "--loan-amount", "6000",
            "--rate", "0", "--tenure", "12", "--start-date", "2025-01-01",
        ],
    )
    .unwrap();
    let id: i64 = conn
        .query_row("SELECT id FROM transactions", [], |r| r.get(0))
        .unwrap();

    run(
        &conn,
        &["tallyboard", "emi", "edit", &id.to_string(), "--tenure", "6"],
    )
    .unwrap();

    let (amount, detail): (String, String) = conn
        .query_row(
            "SELECT amount, detail FROM transactions WHERE id=?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(amount.parse::<rust_decimal::Decimal>().unwrap(), 1000.into());
    let parsed: EmiDetail = serde_json::from_str(&detail).unwrap();
    assert_eq!(parsed.tenure_months, 6);
    // Untouched terms carry over
    assert_eq!(parsed.lender_name, "Axis Bank");
}

#[test]
fn delete_only_touches_emi_records() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(id, date, type, title, amount) VALUES
         (1,'2025-08-10','expense','Groceries','100')",
        [],
    )
    .unwrap();
    assert!(run(&conn, &["tallyboard", "emi", "delete", "1"]).is_err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
