// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::net::RemoteApi;
use crate::sync::SyncEngine;
use crate::utils::pretty_table;
use anyhow::Result;

pub async fn handle<R: RemoteApi>(engine: &SyncEngine<R>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", _)) = m.subcommand() {
        let categories = engine.all_categories().await?;
        let rows: Vec<Vec<String>> = categories
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.emoji.clone(),
                    c.name.clone(),
                    c.direction.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Emoji", "Name", "Direction"], rows)
        );
    }
    Ok(())
}
