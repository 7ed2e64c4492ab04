// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::SyncEngine;
use crate::models::Category;
use crate::net::RemoteApi;
use crate::store;
use anyhow::Result;

// Categories are read-mostly reference data; the engine only ever needs them
// to decide the sign of a transaction's balance effect.
impl<R: RemoteApi> SyncEngine<R> {
    pub async fn all_categories(&self) -> Result<Vec<Category>> {
        match self.observe(self.remote().list_categories().await) {
            Ok(categories) => {
                for category in &categories {
                    store::upsert_category(self.connection(), category)?;
                }
                Ok(categories)
            }
            Err(err) => {
                tracing::debug!(error = %err, "category list fetch failed, serving cache");
                store::fetch_categories(self.connection())
            }
        }
    }

    pub async fn category(&self, id: i64) -> Result<Option<Category>> {
        Ok(self
            .all_categories()
            .await?
            .into_iter()
            .find(|c| c.id == id))
    }
}
