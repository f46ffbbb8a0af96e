// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Row id")
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expense records")
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("income or expense (use `emi add` / `invest add` for the rest)"),
                )
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("method")
                        .long("method")
                        .help("cash, credit-card, or upi (expenses only)"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List records")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("kind").long("kind"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit a record (its kind is fixed at creation)")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("method").long("method")),
        )
        .subcommand(Command::new("delete").about("Delete a record").arg(id_arg()))
}

fn emi_cmd() -> Command {
    Command::new("emi")
        .about("Installment loans and the EMI tracker")
        .subcommand(
            Command::new("add")
                .about("Record a loan; the monthly installment is computed from its terms")
                .arg(Arg::new("lender").long("lender").required(true))
                .arg(Arg::new("loan-amount").long("loan-amount").required(true))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .help("Annual interest rate in percent"),
                )
                .arg(
                    Arg::new("tenure")
                        .long("tenure")
                        .required(true)
                        .help("Number of monthly installments"),
                )
                .arg(
                    Arg::new("start-date")
                        .long("start-date")
                        .help("First billing month, YYYY-MM-DD, default today"),
                )
                .arg(
                    Arg::new("due-day")
                        .long("due-day")
                        .help("Day of month the installment is due, default 1"),
                )
                .arg(Arg::new("category").long("category").help("e.g. personal, vehicle, home"))
                .arg(Arg::new("date").long("date").help("Record date, default today")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("EMI tracker with amortization progress")
                .arg(Arg::new("as-of").long("as-of").help("Progress date, default today")),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit loan terms; the installment is recomputed")
                .arg(id_arg())
                .arg(Arg::new("lender").long("lender"))
                .arg(Arg::new("loan-amount").long("loan-amount"))
                .arg(Arg::new("rate").long("rate"))
                .arg(Arg::new("tenure").long("tenure"))
                .arg(Arg::new("start-date").long("start-date"))
                .arg(Arg::new("due-day").long("due-day"))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(Command::new("delete").about("Delete an EMI record").arg(id_arg()))
}

fn invest_cmd() -> Command {
    Command::new("invest")
        .about("Investments and their valuations")
        .subcommand(
            Command::new("add")
                .about("Record an investment")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").help("e.g. stocks, mutual_funds, fd"))
                .arg(
                    Arg::new("purchase-date")
                        .long("purchase-date")
                        .help("YYYY-MM-DD, default today"),
                )
                .arg(Arg::new("quantity").long("quantity"))
                .arg(Arg::new("purchase-price").long("purchase-price"))
                .arg(Arg::new("rate").long("rate").help("Annual interest rate in percent"))
                .arg(Arg::new("maturity-date").long("maturity-date")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Investment tracker with current valuations")
                .arg(
                    Arg::new("markup")
                        .long("markup")
                        .help("Flat valuation markup percent, default 5"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Edit an investment")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("purchase-date").long("purchase-date"))
                .arg(Arg::new("quantity").long("quantity"))
                .arg(Arg::new("purchase-price").long("purchase-price"))
                .arg(Arg::new("rate").long("rate"))
                .arg(Arg::new("maturity-date").long("maturity-date")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete an investment record")
                .arg(id_arg()),
        )
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Credit cards")
        .subcommand(
            Command::new("add")
                .about("Add a credit card")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("last-four")
                        .long("last-four")
                        .required(true)
                        .help("Last four digits; the full number is never stored"),
                )
                .arg(Arg::new("limit").long("limit").required(true))
                .arg(Arg::new("balance").long("balance").help("Drawn balance, default 0"))
                .arg(Arg::new("network").long("network").help("e.g. Visa, Mastercard"))
                .arg(Arg::new("color").long("color").help("Display hex color"))
                .arg(Arg::new("due-day").long("due-day")),
        )
        .subcommand(json_flags(Command::new("list").about("List credit cards")))
        .subcommand(
            Command::new("edit")
                .about("Edit a credit card")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("last-four").long("last-four"))
                .arg(Arg::new("limit").long("limit"))
                .arg(Arg::new("balance").long("balance"))
                .arg(Arg::new("network").long("network"))
                .arg(Arg::new("color").long("color"))
                .arg(Arg::new("due-day").long("due-day")),
        )
        .subcommand(Command::new("delete").about("Delete a credit card").arg(id_arg()))
}

fn wish_cmd() -> Command {
    Command::new("wish")
        .about("Savings goals")
        .subcommand(
            Command::new("add")
                .about("Add a savings goal")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("target").long("target").required(true))
                .arg(Arg::new("current").long("current").help("Saved so far, default 0"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("target-date").long("target-date")),
        )
        .subcommand(json_flags(Command::new("list").about("List savings goals")))
        .subcommand(
            Command::new("edit")
                .about("Edit a savings goal")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("target").long("target"))
                .arg(Arg::new("current").long("current"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("target-date").long("target-date")),
        )
        .subcommand(Command::new("delete").about("Delete a savings goal").arg(id_arg()))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Display name and currency")
        .subcommand(Command::new("show").about("Show the profile"))
        .subcommand(
            Command::new("set")
                .about("Update the profile")
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("currency").long("currency").help("usd or inr")),
        )
}

fn dashboard_cmd() -> Command {
    Command::new("dashboard")
        .about("Monthly overview: totals, trends, breakdown, trackers")
        .arg(Arg::new("month").long("month").help("YYYY-MM, default current month"))
        .arg(
            Arg::new("sample")
                .long("sample")
                .action(ArgAction::SetTrue)
                .help("Render canned sample data instead of the live store"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the full snapshot as JSON"),
        )
}

fn export_cmd() -> Command {
    Command::new("export").about("Export data").subcommand(
        Command::new("transactions")
            .about("Export all records")
            .arg(Arg::new("format").long("format").required(true).help("csv or json"))
            .arg(Arg::new("out").long("out").required(true)),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallyboard")
        .about("Personal finance dashboard: income, expenses, EMIs, investments, credit cards, and savings goals")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(profile_cmd())
        .subcommand(tx_cmd())
        .subcommand(emi_cmd())
        .subcommand(invest_cmd())
        .subcommand(card_cmd())
        .subcommand(wish_cmd())
        .subcommand(dashboard_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}
