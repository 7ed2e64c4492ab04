// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::SyncEngine;
use crate::models::{Account, Direction};
use crate::net::{AccountUpdate, RemoteApi};
use crate::store;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use rust_decimal::Decimal;

impl<R: RemoteApi> SyncEngine<R> {
    /// Remote list, mirrored into the cache on success; cached list on any
    /// failure. Never errors for remote reasons.
    pub async fn all_accounts(&self) -> Result<Vec<Account>> {
        match self.observe(self.remote().list_accounts().await) {
            Ok(accounts) => {
                for account in &accounts {
                    store::upsert_account(self.connection(), account)?;
                }
                Ok(accounts)
            }
            Err(err) => {
                tracing::debug!(error = %err, "account list fetch failed, serving cache");
                store::fetch_accounts(self.connection())
            }
        }
    }

    /// Local-only lookup; account state is refreshed via [`Self::all_accounts`].
    pub fn account(&self, id: i64) -> Result<Option<Account>> {
        store::fetch_account(self.connection(), id)
    }

    /// Push an account edit to the server and cache the server's version of
    /// the record. Accounts have no pending queue, so a remote failure
    /// surfaces to the caller.
    pub async fn update_account(&self, account: &Account) -> Result<Account> {
        let update = AccountUpdate {
            name: account.name.clone(),
            balance: account.balance,
            currency: account.currency.clone(),
        };
        let updated = self
            .observe(self.remote().update_account(account.id, &update).await)
            .context("Update account on server")?;
        store::upsert_account(self.connection(), &updated)?;
        Ok(updated)
    }

    /// Atomic read-modify-write of the cached balance: fetch, add the signed
    /// delta, stamp `updated_at`, persist. Runs for every transaction create,
    /// confirmed or not, so the local balance tracks the user's intent even
    /// without server confirmation.
    pub(crate) fn adjust_balance(
        &self,
        account_id: i64,
        amount: Decimal,
        direction: Direction,
    ) -> Result<()> {
        let Some(mut account) = store::fetch_account(self.connection(), account_id)? else {
            bail!("Account {} not found in local store", account_id);
        };
        match direction {
            Direction::Income => account.balance += amount,
            Direction::Outcome => account.balance -= amount,
        }
        account.updated_at = Utc::now();
        store::upsert_account(self.connection(), &account)
    }
}
