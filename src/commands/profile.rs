// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;

use crate::models::Currency;
use crate::utils::{get_profile, set_currency, set_display_name};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let profile = get_profile(conn)?;
    let name = if profile.display_name.is_empty() {
        "(not set)".to_string()
    } else {
        profile.display_name
    };
    println!("Display name: {}", name);
    println!(
        "Currency: {} ({})",
        profile.currency.code(),
        profile.currency.symbol()
    );
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name");
    let currency = sub.get_one::<String>("currency");
    if name.is_none() && currency.is_none() {
        return Err(anyhow!("Nothing to set; pass --name and/or --currency"));
    }
    if let Some(n) = name {
        set_display_name(conn, n)?;
        println!("Display name set to {}", n);
    }
    if let Some(c) = currency {
        let ccy = Currency::parse(c)
            .ok_or_else(|| anyhow!("Unknown currency '{}', expected usd or inr", c))?;
        set_currency(conn, ccy)?;
        println!("Currency set to {} ({})", ccy.code(), ccy.symbol());
    }
    Ok(())
}
