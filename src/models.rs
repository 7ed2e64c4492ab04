// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a category adds to or subtracts from an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Outcome,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Outcome => "outcome",
        }
    }

    pub fn parse(s: &str) -> Option<Direction> {
        match s {
            "income" => Some(Direction::Income),
            "outcome" => Some(Direction::Outcome),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub direction: Direction,
}

impl Category {
    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }
}

/// Server-assigned `id`; `0` is the provisional sentinel for transactions
/// that have never been confirmed by a create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inclusive date window of a period query, bounds in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Period { start, end }
    }

    /// The whole UTC day containing `instant`.
    pub fn day_of(instant: DateTime<Utc>) -> Self {
        let date = instant.date_naive();
        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = date.and_hms_opt(23, 59, 59).unwrap_or_default().and_utc();
        Period { start, end }
    }

    pub fn today() -> Self {
        Period::day_of(Utc::now())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// `startDate` query parameter, `yyyy-MM-dd` in UTC.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// `endDate` query parameter, `yyyy-MM-dd` in UTC.
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Kind of mutation a queued snapshot is waiting to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Create,
    Update,
    Delete,
}

impl PendingOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PendingOp::Create => "create",
            PendingOp::Update => "update",
            PendingOp::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<PendingOp> {
        match s {
            "create" => Some(PendingOp::Create),
            "update" => Some(PendingOp::Update),
            "delete" => Some(PendingOp::Delete),
            _ => None,
        }
    }
}

/// A transaction whose last known mutation has not been confirmed by the
/// server, keyed by transaction id in the queue.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub op: PendingOp,
    pub transaction: Transaction,
}
