// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use tallyboard::{cli, commands::transactions, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(conn, sub),
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn add_records_an_expense_with_method() {
    let conn = setup();
    run(
        &conn,
        &[
            "tallyboard", "tx", "add", "--kind", "expense", "--title", "Groceries", "--amount",
            "156.80", "--date", "2025-08-10", "--category", "Food", "--method", "credit-card",
        ],
    )
    .unwrap();

    let (ty, amount, method): (String, String, String) = conn
        .query_row(
            "SELECT type, amount, payment_method FROM transactions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(ty, "expense");
    assert_eq!(amount, "156.80");
    assert_eq!(method, "Credit Card");
}

#[test]
fn add_rejects_negative_amounts() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "tallyboard", "tx", "add", "--kind", "income", "--title", "Oops", "--amount", "-5",
            "--date", "2025-08-10",
        ],
    );
    assert!(err.is_err());
}

#[test]
fn add_rejects_method_on_income() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "tallyboard", "tx", "add", "--kind", "income", "--title", "Salary", "--amount",
            "4200", "--method", "cash",
        ],
    );
    assert!(err.is_err());
}

#[test]
fn add_directs_loans_and_investments_elsewhere() {
    let conn = setup();
    for kind in ["emi", "investment"] {
        let err = run(
            &conn,
            &[
                "tallyboard", "tx", "add", "--kind", kind, "--title", "x", "--amount", "1",
            ],
        );
        assert!(err.is_err());
    }
}

#[test]
fn edit_cannot_change_a_record_kind() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(id, date, type, title, amount) VALUES
         (1,'2025-08-10','emi','Loan','500')",
        [],
    )
    .unwrap();
    // EMI records are not editable through tx, and tx offers no kind flag at all
    let err = run(&conn, &["tallyboard", "tx", "edit", "1", "--amount", "600"]);
    assert!(err.is_err());
}

#[test]
fn edit_updates_only_the_given_fields() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(id, date, type, title, amount, category) VALUES
         (1,'2025-08-10','expense','Groceries','100','Food')",
        [],
    )
    .unwrap();
    run(&conn, &["tallyboard", "tx", "edit", "1", "--amount", "120.50"]).unwrap();

    let (title, amount, category): (String, String, String) = conn
        .query_row(
            "SELECT title, amount, category FROM transactions WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(title, "Groceries");
    assert_eq!(amount, "120.50");
    assert_eq!(category, "Food");
}

#[test]
fn delete_reports_missing_records() {
    let conn = setup();
    assert!(run(&conn, &["tallyboard", "tx", "delete", "42"]).is_err());
}
