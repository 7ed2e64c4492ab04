// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backup;
use crate::net::RemoteApi;
use crate::sync::SyncEngine;
use crate::utils::{fmt_local, pretty_table};
use anyhow::Result;

pub fn handle<R: RemoteApi>(engine: &SyncEngine<R>, m: &clap::ArgMatches) -> Result<()> {
    let pending = backup::all(engine.connection())?;
    let tracker = engine.network_status();
    let state = if !tracker.has_observations() {
        "unknown (no requests made this session)"
    } else if tracker.is_offline() {
        "offline"
    } else {
        "online"
    };
    println!("connectivity: {}", state);
    println!("pending writes: {}", pending.len());
    if m.get_flag("verbose") && !pending.is_empty() {
        let rows: Vec<Vec<String>> = pending
            .iter()
            .map(|p| {
                vec![
                    p.transaction.id.to_string(),
                    p.op.as_str().to_string(),
                    p.transaction.amount.to_string(),
                    fmt_local(p.transaction.transaction_date),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Op", "Amount", "Date"], rows));
    }
    Ok(())
}

pub async fn sync<R: RemoteApi>(engine: &SyncEngine<R>) -> Result<()> {
    let before = backup::all(engine.connection())?.len();
    engine.sync_pending().await?;
    let after = backup::all(engine.connection())?.len();
    println!("Replayed {} of {} pending writes", before - after, before);
    Ok(())
}
