// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_api_token, get_api_url, set_api_token, set_api_url};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            set_api_url(conn, url)?;
            println!("API base URL set to {}", url);
        }
        Some(("set-token", sub)) => {
            let token = sub.get_one::<String>("token").unwrap();
            set_api_token(conn, token)?;
            println!("API token stored");
        }
        Some(("show", _)) => {
            println!("url:   {}", get_api_url(conn)?);
            match get_api_token(conn) {
                Ok(_) => println!("token: (configured)"),
                Err(_) => println!("token: (not set)"),
            }
        }
        _ => {}
    }
    Ok(())
}
