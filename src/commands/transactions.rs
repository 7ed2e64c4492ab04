// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::net::RemoteApi;
use crate::store;
use crate::sync::SyncEngine;
use crate::utils::{
    fmt_local, local_date_to_utc, parse_date, parse_decimal, period_from_bounds, pretty_table,
};
use anyhow::{Context, Result};
use chrono::Utc;

pub async fn handle<R: RemoteApi>(engine: &SyncEngine<R>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(engine, sub).await?,
        Some(("list", sub)) => list(engine, sub).await?,
        Some(("edit", sub)) => edit(engine, sub).await?,
        Some(("rm", sub)) => rm(engine, sub).await?,
        _ => {}
    }
    Ok(())
}

async fn add<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let account_id: i64 = sub.get_one::<String>("account").unwrap().parse()?;
    let category_id: i64 = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let transaction_date = match sub.get_one::<String>("date") {
        Some(s) => local_date_to_utc(parse_date(s)?),
        None => Utc::now(),
    };
    let now = Utc::now();
    let tx = Transaction {
        id: engine.next_provisional_id()?,
        account_id,
        category_id,
        amount,
        transaction_date,
        comment: sub.get_one::<String>("comment").cloned(),
        created_at: now,
        updated_at: now,
    };
    engine.create_transaction(&tx).await?;
    if engine.network_status().is_offline() {
        println!("Recorded {} locally; will sync when the server is reachable", amount);
    } else {
        println!("Recorded {}", amount);
    }
    Ok(())
}

async fn list<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_from_bounds(
        sub.get_one::<String>("from").map(String::as_str),
        sub.get_one::<String>("to").map(String::as_str),
    )?;
    let txs = engine.transactions_of_period(&period).await?;
    if crate::utils::maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = txs
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                fmt_local(t.transaction_date),
                t.category_id.to_string(),
                t.amount.to_string(),
                t.comment.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Category", "Amount", "Comment"], rows)
    );
    if engine.network_status().is_offline() {
        println!("(offline: cached data, unsynced entries included)");
    }
    Ok(())
}

async fn edit<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let mut tx = store::fetch_transaction(engine.connection(), id)?
        .with_context(|| format!("Transaction {} not found in local store", id))?;
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(amount)?;
    }
    if let Some(category) = sub.get_one::<String>("category") {
        tx.category_id = category.parse()?;
    }
    if let Some(date) = sub.get_one::<String>("date") {
        tx.transaction_date = local_date_to_utc(parse_date(date)?);
    }
    if let Some(comment) = sub.get_one::<String>("comment") {
        tx.comment = Some(comment.clone());
    }
    tx.updated_at = Utc::now();
    engine.update_transaction(&tx).await?;
    println!("Updated transaction {}", id);
    Ok(())
}

async fn rm<R: RemoteApi>(engine: &SyncEngine<R>, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    engine.delete_transaction(id).await?;
    println!("Deleted transaction {}", id);
    Ok(())
}
