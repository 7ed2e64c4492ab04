// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pocketsync::net::HttpClient;
use pocketsync::status::NetworkStatus;
use pocketsync::sync::SyncEngine;
use pocketsync::{cli, commands, db, utils};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    // Commands that never touch the network skip client construction, so a
    // missing token does not block them.
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("config", sub)) => return commands::config::handle(&conn, sub),
        _ => {}
    }

    let remote = HttpClient::new(&utils::get_api_url(&conn)?, utils::get_api_token(&conn)?)?;
    let engine = SyncEngine::new(conn, remote, NetworkStatus::new());

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&engine, sub).await?,
        Some(("category", sub)) => commands::categories::handle(&engine, sub).await?,
        Some(("tx", sub)) => commands::transactions::handle(&engine, sub).await?,
        Some(("sync", _)) => commands::status::sync(&engine).await?,
        Some(("status", sub)) => commands::status::handle(&engine, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
