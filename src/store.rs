// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable cache of the latest known server state. Writes hit SQLite before
//! returning; there is no write-behind and nothing below this layer to fall
//! back to.

use crate::models::{Account, Category, Direction, Period, Transaction};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub(crate) fn encode_instant(t: DateTime<Utc>) -> String {
    // Fixed-width UTC text so lexicographic range scans equal chronological ones.
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_instant(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid stored instant '{}'", s))?;
    Ok(parsed.with_timezone(&Utc))
}

pub(crate) fn decode_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored decimal '{}'", s))
}

pub fn upsert_account(conn: &Connection, account: &Account) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO accounts(id, user_id, name, balance, currency, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            account.id,
            account.user_id,
            account.name,
            account.balance.to_string(),
            account.currency,
            encode_instant(account.created_at),
            encode_instant(account.updated_at),
        ],
    )?;
    Ok(())
}

pub fn fetch_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, balance, currency, created_at, updated_at
         FROM accounts ORDER BY id",
    )?;
    let rows = stmt.query_map([], account_columns)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(account_from_columns(row?)?);
    }
    Ok(out)
}

pub fn fetch_account(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, balance, currency, created_at, updated_at
         FROM accounts WHERE id=?1",
    )?;
    let cols = stmt.query_row(params![id], account_columns).optional()?;
    cols.map(account_from_columns).transpose()
}

type AccountColumns = (i64, i64, String, String, String, String, String);

fn account_columns(r: &rusqlite::Row<'_>) -> rusqlite::Result<AccountColumns> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn account_from_columns(c: AccountColumns) -> Result<Account> {
    Ok(Account {
        id: c.0,
        user_id: c.1,
        name: c.2,
        balance: decode_decimal(&c.3)?,
        currency: c.4,
        created_at: decode_instant(&c.5)?,
        updated_at: decode_instant(&c.6)?,
    })
}

pub fn upsert_category(conn: &Connection, category: &Category) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO categories(id, name, emoji, direction) VALUES (?1, ?2, ?3, ?4)",
        params![
            category.id,
            category.name,
            category.emoji,
            category.direction.as_str()
        ],
    )?;
    Ok(())
}

pub fn fetch_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, emoji, direction FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, emoji, direction) = row?;
        let direction = Direction::parse(&direction)
            .ok_or_else(|| anyhow!("Invalid stored direction '{}'", direction))?;
        out.push(Category {
            id,
            name,
            emoji,
            direction,
        });
    }
    Ok(out)
}

pub fn upsert_transaction(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO transactions(id, account_id, category_id, amount, transaction_date, comment, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.id,
            tx.account_id,
            tx.category_id,
            tx.amount.to_string(),
            encode_instant(tx.transaction_date),
            tx.comment,
            encode_instant(tx.created_at),
            encode_instant(tx.updated_at),
        ],
    )?;
    Ok(())
}

pub fn fetch_transaction(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, category_id, amount, transaction_date, comment, created_at, updated_at
         FROM transactions WHERE id=?1",
    )?;
    let cols = stmt
        .query_row(params![id], transaction_columns)
        .optional()?;
    cols.map(transaction_from_columns).transpose()
}

/// Cached transactions with `transaction_date` inside `period`, newest first.
pub fn fetch_transactions_in(conn: &Connection, period: &Period) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, category_id, amount, transaction_date, comment, created_at, updated_at
         FROM transactions WHERE transaction_date >= ?1 AND transaction_date <= ?2
         ORDER BY transaction_date DESC",
    )?;
    let rows = stmt.query_map(
        params![encode_instant(period.start), encode_instant(period.end)],
        transaction_columns,
    )?;
    let mut out = Vec::new();
    for row in rows {
        out.push(transaction_from_columns(row?)?);
    }
    Ok(out)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

/// Make the cached window for `period` exactly mirror `txs` (a server
/// response): anything in-range and absent from the new set is deleted,
/// everything else is upserted, all inside one SQLite transaction. This is
/// how stale cache entries disappear once the server confirms they are gone.
pub fn replace_transactions_in(
    conn: &Connection,
    period: &Period,
    txs: &[Transaction],
) -> Result<()> {
    let sql_tx = conn
        .unchecked_transaction()
        .context("Begin replace-range transaction")?;
    sql_tx.execute(
        "DELETE FROM transactions WHERE transaction_date >= ?1 AND transaction_date <= ?2",
        params![encode_instant(period.start), encode_instant(period.end)],
    )?;
    for tx in txs {
        upsert_transaction(&sql_tx, tx)?;
    }
    sql_tx.commit().context("Commit replace-range transaction")?;
    Ok(())
}

pub(crate) type TransactionColumns = (
    i64,
    i64,
    i64,
    String,
    String,
    Option<String>,
    String,
    String,
);

pub(crate) fn transaction_columns(r: &rusqlite::Row<'_>) -> rusqlite::Result<TransactionColumns> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
    ))
}

pub(crate) fn transaction_from_columns(c: TransactionColumns) -> Result<Transaction> {
    Ok(Transaction {
        id: c.0,
        account_id: c.1,
        category_id: c.2,
        amount: decode_decimal(&c.3)?,
        transaction_date: decode_instant(&c.4)?,
        comment: c.5,
        created_at: decode_instant(&c.6)?,
        updated_at: decode_instant(&c.7)?,
    })
}
