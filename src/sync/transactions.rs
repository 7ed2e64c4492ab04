// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::SyncEngine;
use crate::backup;
use crate::models::{Direction, PendingOp, Period, Transaction};
use crate::net::{RemoteApi, TransactionRequest};
use crate::store;
use anyhow::Result;

impl<R: RemoteApi> SyncEngine<R> {
    /// Transactions of the primary account inside `period`.
    ///
    /// Replays the pending queue first, then asks the server. On success the
    /// cached window is rewritten to mirror the response exactly and the
    /// server's set is returned as ground truth. On any remote failure the
    /// caller gets the merged cache/pending view instead; offline degradation
    /// is silent and returns an empty list at worst.
    pub async fn transactions_of_period(&self, period: &Period) -> Result<Vec<Transaction>> {
        self.sync_pending().await?;

        let accounts = self.all_accounts().await?;
        let Some(account) = accounts.first() else {
            tracing::debug!("no primary account known, serving offline view");
            return self.offline_period_view(period);
        };
        match self.observe(
            self.remote()
                .transactions_of_period(account.id, period)
                .await,
        ) {
            Ok(responses) => {
                let txs: Vec<Transaction> = responses
                    .into_iter()
                    .map(|r| r.into_transaction())
                    .collect();
                store::replace_transactions_in(self.connection(), period, &txs)?;
                Ok(txs)
            }
            Err(err) => {
                tracing::debug!(error = %err, "period fetch failed, serving offline view");
                self.offline_period_view(period)
            }
        }
    }

    /// Period read over the current UTC day.
    pub async fn today_transactions(&self) -> Result<Vec<Transaction>> {
        self.transactions_of_period(&Period::today()).await
    }

    /// Remote create first; confirmed or not, the transaction lands in the
    /// local store and the owning account's balance absorbs the delta. Only
    /// an unconfirmed create is queued for replay.
    pub async fn create_transaction(&self, tx: &Transaction) -> Result<()> {
        let req = TransactionRequest::from(tx);
        match self.observe(self.remote().create_transaction(&req).await) {
            Ok(()) => {
                store::upsert_transaction(self.connection(), tx)?;
                backup::dequeue(self.connection(), tx.id)?;
            }
            Err(err) => {
                tracing::debug!(id = tx.id, error = %err, "create not confirmed, queuing for replay");
                store::upsert_transaction(self.connection(), tx)?;
                backup::enqueue(self.connection(), PendingOp::Create, tx)?;
            }
        }
        // Sign of the delta comes from the category's direction at call time.
        let direction = self
            .category(tx.category_id)
            .await?
            .map(|c| c.direction)
            .unwrap_or(Direction::Outcome);
        self.adjust_balance(tx.account_id, tx.amount, direction)
    }

    pub async fn update_transaction(&self, tx: &Transaction) -> Result<()> {
        let req = TransactionRequest::from(tx);
        match self.observe(self.remote().update_transaction(tx.id, &req).await) {
            Ok(()) => {
                store::upsert_transaction(self.connection(), tx)?;
                backup::dequeue(self.connection(), tx.id)?;
            }
            Err(err) => {
                tracing::debug!(id = tx.id, error = %err, "update not confirmed, queuing for replay");
                store::upsert_transaction(self.connection(), tx)?;
                backup::enqueue(self.connection(), PendingOp::Update, tx)?;
            }
        }
        Ok(())
    }

    /// The snapshot is captured before the local row disappears so an
    /// unconfirmed delete can still be replayed later.
    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        match self.observe(self.remote().delete_transaction(id).await) {
            Ok(()) => {
                store::delete_transaction(self.connection(), id)?;
                backup::dequeue(self.connection(), id)?;
            }
            Err(err) => {
                tracing::debug!(id, error = %err, "delete not confirmed, queuing for replay");
                if let Some(tx) = store::fetch_transaction(self.connection(), id)? {
                    backup::enqueue(self.connection(), PendingOp::Delete, &tx)?;
                }
                store::delete_transaction(self.connection(), id)?;
            }
        }
        Ok(())
    }

    /// Provisional id for a transaction created before the server has
    /// assigned one: past the maximum id the cache or the queue has seen, so
    /// concurrent unconfirmed creates do not collide in the queue.
    pub fn next_provisional_id(&self) -> Result<i64> {
        let max: i64 = self.connection().query_row(
            "SELECT COALESCE(MAX(id), 0) FROM (
                 SELECT id FROM transactions UNION ALL SELECT id FROM pending_transactions
             )",
            [],
            |r| r.get(0),
        )?;
        Ok(max + 1)
    }
}
