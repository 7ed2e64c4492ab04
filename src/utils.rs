// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Period;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// A calendar date typed by the user is local; the core works in UTC. Noon
/// local keeps the instant on the same calendar day in both zones.
pub fn local_date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&noon) {
        chrono::LocalResult::Single(t) | chrono::LocalResult::Ambiguous(t, _) => {
            t.with_timezone(&Utc)
        }
        chrono::LocalResult::None => Utc.from_utc_datetime(&noon),
    }
}

/// Resolve user-supplied `--from`/`--to` calendar dates into a period.
/// No bounds means today; `--from` alone runs up to now; a lone `--to`
/// is rejected rather than silently ignored.
pub fn period_from_bounds(from: Option<&str>, to: Option<&str>) -> Result<Period> {
    match (from, to) {
        (Some(f), Some(t)) => Ok(Period::new(
            local_date_to_utc(parse_date(f)?),
            local_date_to_utc(parse_date(t)?),
        )),
        (Some(f), None) => Ok(Period::new(local_date_to_utc(parse_date(f)?), Utc::now())),
        (None, Some(_)) => bail!("--to requires --from"),
        (None, None) => Ok(Period::today()),
    }
}

pub fn fmt_local(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", d.round_dp(2), ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// API endpoint settings. Environment variables override the stored values so
// a token never has to live on disk.

pub fn get_api_url(conn: &Connection) -> Result<String> {
    if let Ok(url) = std::env::var("POCKETSYNC_API_URL") {
        return Ok(url);
    }
    Ok(get_setting(conn, "api_url")?.unwrap_or_else(|| "https://shmr-finance.ru/".to_string()))
}

pub fn set_api_url(conn: &Connection, url: &str) -> Result<()> {
    set_setting(conn, "api_url", url)
}

pub fn get_api_token(conn: &Connection) -> Result<String> {
    if let Ok(token) = std::env::var("POCKETSYNC_API_TOKEN") {
        return Ok(token);
    }
    get_setting(conn, "api_token")?
        .context("No API token configured; run `pocketsync config set-token` or set POCKETSYNC_API_TOKEN")
}

pub fn set_api_token(conn: &Connection, token: &str) -> Result<()> {
    set_setting(conn, "api_token", token)
}
