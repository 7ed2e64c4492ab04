// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pending-write queue ("backup store"): snapshots of transactions whose
//! create/update/delete was not confirmed by the server. One row per
//! transaction id, tagged with the operation kind so replay can re-issue the
//! right call instead of always re-creating.

use crate::models::{PendingOp, PendingWrite, Transaction};
use crate::store::{encode_instant, transaction_columns, transaction_from_columns};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

/// Idempotent: a second enqueue for the same id overwrites the prior
/// snapshot rather than duplicating the entry. Op tags compose instead of
/// blindly overwriting: an unconfirmed create stays a create no matter how
/// often the snapshot is edited afterwards (the server has never seen the
/// id, so replay must POST, not PUT), and deleting an unconfirmed create
/// removes the entry outright since there is nothing server-side to delete.
pub fn enqueue(conn: &Connection, op: PendingOp, tx: &Transaction) -> Result<()> {
    let op = match (queued_op(conn, tx.id)?, op) {
        (Some(PendingOp::Create), PendingOp::Delete) => return dequeue(conn, tx.id),
        (Some(PendingOp::Create), _) => PendingOp::Create,
        (_, op) => op,
    };
    conn.execute(
        "INSERT OR REPLACE INTO pending_transactions(id, op, account_id, category_id, amount, transaction_date, comment, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tx.id,
            op.as_str(),
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

fn queued_op(conn: &Connection, id: i64) -> Result<Option<PendingOp>> {
    let op: Option<String> = conn
        .query_row(
            "SELECT op FROM pending_transactions WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    op.map(|s| PendingOp::parse(&s).ok_or_else(|| anyhow!("Invalid pending op '{}'", s)))
        .transpose()
}

pub fn dequeue(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM pending_transactions WHERE id=?1", params![id])?;
    Ok(())
}

pub fn all(conn: &Connection) -> Result<Vec<PendingWrite>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, category_id, amount, transaction_date, comment, created_at, updated_at, op
         FROM pending_transactions ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        let cols = transaction_columns(r)?;
        let op: String = r.get(8)?;
        Ok((cols, op))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (cols, op) = row?;
        let op = PendingOp::parse(&op).ok_or_else(|| anyhow!("Invalid pending op '{}'", op))?;
        out.push(PendingWrite {
            op,
            transaction: transaction_from_columns(cols)?,
        });
    }
    Ok(out)
}

pub fn clear(conn: &Connection, ids: &[i64]) -> Result<()> {
    for id in ids {
        dequeue(conn, *id)?;
    }
    Ok(())
}
