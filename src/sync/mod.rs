// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The sync coordinator. Every read and write of account/category/transaction
//! data goes through [`SyncEngine`], which decides between the network, the
//! local cache, and the pending-write queue, and reconciles them when the
//! server becomes reachable again.
//!
//! Per-entity operations live in the `accounts`, `categories`, and
//! `transactions` submodules; this module holds the engine itself, outcome
//! reporting, and the queue replay.

pub mod accounts;
pub mod categories;
pub mod transactions;

use crate::backup;
use crate::models::{PendingOp, Period, Transaction};
use crate::net::{NetworkError, RemoteApi, TransactionRequest};
use crate::status::NetworkStatus;
use crate::store;
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashSet;

/// Owns the local store, the pending-write queue (both behind one SQLite
/// connection) and the remote client. All mutation of the cached state is
/// routed through here; the engine assumes a single active caller, matching
/// a single-user client.
pub struct SyncEngine<R> {
    conn: Connection,
    remote: R,
    status: NetworkStatus,
}

impl<R: RemoteApi> SyncEngine<R> {
    pub fn new(conn: Connection, remote: R, status: NetworkStatus) -> Self {
        SyncEngine {
            conn,
            remote,
            status,
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn network_status(&self) -> &NetworkStatus {
        &self.status
    }

    /// Report a terminated remote call to the connectivity tracker, then hand
    /// the result back unchanged. Every remote call the engine makes goes
    /// through here.
    pub(crate) fn observe<T>(
        &self,
        res: Result<T, NetworkError>,
    ) -> Result<T, NetworkError> {
        match &res {
            Ok(_) => self.status.report_success(),
            Err(err) => self.status.report_failure(err),
        }
        res
    }

    /// Opportunistic replay of the pending-write queue. Each entry is
    /// re-issued according to its op tag; an entry that fails stays queued
    /// and the next one is still attempted. No ordering guarantee across
    /// entries. Only a local persistence failure is an error.
    pub async fn sync_pending(&self) -> Result<()> {
        let entries = backup::all(&self.conn)?;
        if entries.is_empty() {
            return Ok(());
        }
        let mut synced: Vec<i64> = Vec::new();
        for entry in entries {
            let tx = &entry.transaction;
            let res = match entry.op {
                PendingOp::Create => {
                    self.remote
                        .create_transaction(&TransactionRequest::from(tx))
                        .await
                }
                PendingOp::Update => {
                    self.remote
                        .update_transaction(tx.id, &TransactionRequest::from(tx))
                        .await
                }
                PendingOp::Delete => self.remote.delete_transaction(tx.id).await,
            };
            match self.observe(res) {
                Ok(()) => synced.push(tx.id),
                Err(err) => {
                    tracing::debug!(
                        id = tx.id,
                        op = entry.op.as_str(),
                        error = %err,
                        "pending replay failed, entry stays queued"
                    );
                }
            }
        }
        if !synced.is_empty() {
            backup::clear(&self.conn, &synced)?;
        }
        Ok(())
    }

    /// Best-effort view when the server is unreachable: cached transactions
    /// in range, plus queued snapshots not already covered by the cache.
    /// Cache entries win on id collision; delete-tagged snapshots are not
    /// resurrected. Newest first.
    pub(crate) fn offline_period_view(&self, period: &Period) -> Result<Vec<Transaction>> {
        let mut merged = store::fetch_transactions_in(&self.conn, period)?;
        let mut seen: HashSet<i64> = merged.iter().map(|t| t.id).collect();
        for entry in backup::all(&self.conn)? {
            if entry.op == PendingOp::Delete {
                continue;
            }
            let tx = entry.transaction;
            if period.contains(tx.transaction_date) && seen.insert(tx.id) {
                merged.push(tx);
            }
        }
        merged.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(merged)
    }
}
