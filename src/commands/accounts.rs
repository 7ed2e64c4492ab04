// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::net::RemoteApi;
use crate::sync::SyncEngine;
use crate::utils::{fmt_local, fmt_money, parse_decimal, pretty_table};
use anyhow::{Context, Result};

pub async fn handle<R: RemoteApi>(engine: &SyncEngine<R>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => list(engine).await?,
        Some(("show", sub)) => show(engine, sub)?,
        Some(("set", sub)) => set(engine, sub).await?,
        _ => {}
    }
    Ok(())
}

fn show<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let account = engine
        .account(id)?
        .with_context(|| format!("Account {} not known locally; run `account list` first", id))?;
    println!("id:       {}", account.id);
    println!("name:     {}", account.name);
    println!("balance:  {}", fmt_money(&account.balance, &account.currency));
    println!("created:  {}", fmt_local(account.created_at));
    println!("updated:  {}", fmt_local(account.updated_at));
    Ok(())
}

async fn list<R: RemoteApi>(engine: &SyncEngine<R>) -> Result<()> {
    let accounts = engine.all_accounts().await?;
    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.name.clone(),
                fmt_money(&a.balance, &a.currency),
                fmt_local(a.updated_at),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Name", "Balance", "Updated"], rows));
    if engine.network_status().is_offline() {
        println!("(offline: cached data)");
    }
    Ok(())
}

async fn set<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let mut account = engine
        .account(id)?
        .with_context(|| format!("Account {} not known locally; run `account list` first", id))?;
    if let Some(name) = sub.get_one::<String>("name") {
        account.name = name.clone();
    }
    if let Some(balance) = sub.get_one::<String>("balance") {
        account.balance = parse_decimal(balance)?;
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        account.currency = ccy.to_uppercase();
    }
    let updated = engine.update_account(&account).await?;
    println!(
        "Updated account '{}' ({})",
        updated.name,
        fmt_money(&updated.balance, &updated.currency)
    );
    Ok(())
}
