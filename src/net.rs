// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Category, Direction, Period, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const UA: &str = concat!(
    "pocketsync/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/pocketsync/pocketsync)"
);

/// Closed set of failures a remote call can produce. The sync layer never
/// sees a raw `reqwest::Error`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid URL")]
    InvalidUrl,
    #[error("network transport failure")]
    Network,
    #[error("failed to decode server response")]
    Decoding,
    #[error("unauthorized (401)")]
    Unauthorized,
    #[error("forbidden (403)")]
    Forbidden,
    #[error("not found (404)")]
    NotFound,
    #[error("too many requests (429)")]
    TooManyRequests,
    #[error("internal server error")]
    InternalServerError,
    #[error("unexpected response status {0}")]
    BadResponse(u16),
    #[error("server error {0}")]
    ServerError(u16),
    #[error("no internet connection")]
    NoInternetConnection,
}

impl NetworkError {
    /// True for failures that mean the server was never reached. HTTP status
    /// errors prove the opposite and are not connectivity loss.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            NetworkError::Network | NetworkError::NoInternetConnection
        )
    }

    fn from_status(code: u16) -> NetworkError {
        match code {
            400 => NetworkError::BadResponse(400),
            401 => NetworkError::Unauthorized,
            403 => NetworkError::Forbidden,
            404 => NetworkError::NotFound,
            429 => NetworkError::TooManyRequests,
            500..=599 => NetworkError::InternalServerError,
            _ => NetworkError::ServerError(code),
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NetworkError::Decoding
        } else if err.is_connect() {
            NetworkError::NoInternetConnection
        } else {
            NetworkError::Network
        }
    }
}

/// Body of `POST/PUT /api/v1/transactions`. Amount crosses the wire as a
/// decimal string, the date as ISO-8601 in UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub comment: Option<String>,
}

impl From<&Transaction> for TransactionRequest {
    fn from(tx: &Transaction) -> Self {
        TransactionRequest {
            account_id: tx.account_id,
            category_id: tx.category_id,
            amount: tx.amount,
            transaction_date: tx.transaction_date,
            comment: tx.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBrief {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
}

/// Categories are transmitted with an `isIncome` flag; the domain model uses
/// the two-valued [`Direction`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub is_income: bool,
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Category {
            id: dto.id,
            name: dto.name,
            emoji: dto.emoji,
            direction: if dto.is_income {
                Direction::Income
            } else {
                Direction::Outcome
            },
        }
    }
}

/// One element of a period query response, with the owning account and
/// category embedded as briefs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    pub account: AccountBrief,
    pub category: CategoryDto,
    pub amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionResponse {
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            account_id: self.account.id,
            category_id: self.category.id,
            amount: self.amount,
            transaction_date: self.transaction_date,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Body of `PUT /api/v1/accounts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
}

/// The REST surface the sync engine consumes. Implemented by [`HttpClient`]
/// for production and by in-memory fakes in tests. No retry and no backoff
/// here; re-attempting unconfirmed writes is the sync engine's job.
#[allow(async_fn_in_trait)]
pub trait RemoteApi {
    async fn list_accounts(&self) -> Result<Vec<Account>, NetworkError>;
    async fn update_account(
        &self,
        id: i64,
        update: &AccountUpdate,
    ) -> Result<Account, NetworkError>;
    async fn list_categories(&self) -> Result<Vec<Category>, NetworkError>;
    async fn transactions_of_period(
        &self,
        account_id: i64,
        period: &Period,
    ) -> Result<Vec<TransactionResponse>, NetworkError>;
    async fn create_transaction(&self, req: &TransactionRequest) -> Result<(), NetworkError>;
    async fn update_transaction(
        &self,
        id: i64,
        req: &TransactionRequest,
    ) -> Result<(), NetworkError>;
    async fn delete_transaction(&self, id: i64) -> Result<(), NetworkError>;
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base: reqwest::Url,
    token: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, NetworkError> {
        let base = reqwest::Url::parse(base_url).map_err(|_| NetworkError::InvalidUrl)?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()
            .map_err(NetworkError::from)?;
        Ok(HttpClient {
            base,
            token: token.into(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, NetworkError> {
        self.base.join(path).map_err(|_| NetworkError::InvalidUrl)
    }

    async fn send(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, NetworkError> {
        let res = req.bearer_auth(&self.token).send().await?;
        let code = res.status().as_u16();
        if (200..300).contains(&code) {
            Ok(res)
        } else {
            Err(NetworkError::from_status(code))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, NetworkError> {
        let res = self.send(self.http.get(self.endpoint(path)?)).await?;
        res.json::<T>().await.map_err(|_| NetworkError::Decoding)
    }
}

impl RemoteApi for HttpClient {
    async fn list_accounts(&self) -> Result<Vec<Account>, NetworkError> {
        self.get_json("api/v1/accounts").await
    }

    async fn update_account(
        &self,
        id: i64,
        update: &AccountUpdate,
    ) -> Result<Account, NetworkError> {
        let url = self.endpoint(&format!("api/v1/accounts/{id}"))?;
        let res = self.send(self.http.put(url).json(update)).await?;
        res.json::<Account>()
            .await
            .map_err(|_| NetworkError::Decoding)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, NetworkError> {
        let dtos: Vec<CategoryDto> = self.get_json("api/v1/categories").await?;
        Ok(dtos.into_iter().map(Category::from).collect())
    }

    async fn transactions_of_period(
        &self,
        account_id: i64,
        period: &Period,
    ) -> Result<Vec<TransactionResponse>, NetworkError> {
        let path = format!(
            "api/v1/transactions/account/{}/period?startDate={}&endDate={}",
            account_id,
            period.start_param(),
            period.end_param()
        );
        self.get_json(&path).await
    }

    async fn create_transaction(&self, req: &TransactionRequest) -> Result<(), NetworkError> {
        let url = self.endpoint("api/v1/transactions")?;
        self.send(self.http.post(url).json(req)).await?;
        Ok(())
    }

    async fn update_transaction(
        &self,
        id: i64,
        req: &TransactionRequest,
    ) -> Result<(), NetworkError> {
        let url = self.endpoint(&format!("api/v1/transactions/{id}"))?;
        self.send(self.http.put(url).json(req)).await?;
        Ok(())
    }

    async fn delete_transaction(&self, id: i64) -> Result<(), NetworkError> {
        let url = self.endpoint(&format!("api/v1/transactions/{id}"))?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }
}
