// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use pocketsync::db;
use pocketsync::models::{Account, Category, Direction, Period, Transaction};
use pocketsync::net::{
    AccountBrief, AccountUpdate, CategoryDto, NetworkError, RemoteApi, TransactionRequest,
    TransactionResponse,
};
use pocketsync::status::NetworkStatus;
use pocketsync::sync::SyncEngine;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};

/// In-memory stand-in for the REST backend. Flip `offline` to make every
/// call fail with a transport error; successful calls are recorded so tests
/// can assert what reached the "server".
#[derive(Default)]
pub struct FakeRemote {
    pub offline: Cell<bool>,
    pub accounts: RefCell<Vec<Account>>,
    pub categories: RefCell<Vec<Category>>,
    pub period_result: RefCell<Vec<TransactionResponse>>,
    pub created: RefCell<Vec<TransactionRequest>>,
    pub updated: RefCell<Vec<(i64, TransactionRequest)>>,
    pub deleted: RefCell<Vec<i64>>,
}

impl FakeRemote {
    fn check(&self) -> Result<(), NetworkError> {
        if self.offline.get() {
            Err(NetworkError::Network)
        } else {
            Ok(())
        }
    }
}

impl RemoteApi for FakeRemote {
    async fn list_accounts(&self) -> Result<Vec<Account>, NetworkError> {
        self.check()?;
        Ok(self.accounts.borrow().clone())
    }

    async fn update_account(
        &self,
        id: i64,
        update: &AccountUpdate,
    ) -> Result<Account, NetworkError> {
        self.check()?;
        let mut accounts = self.accounts.borrow_mut();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(NetworkError::NotFound)?;
        account.name = update.name.clone();
        account.balance = update.balance;
        account.currency = update.currency.clone();
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, NetworkError> {
        self.check()?;
        Ok(self.categories.borrow().clone())
    }

    async fn transactions_of_period(
        &self,
        _account_id: i64,
        _period: &Period,
    ) -> Result<Vec<TransactionResponse>, NetworkError> {
        self.check()?;
        Ok(self.period_result.borrow().clone())
    }

    async fn create_transaction(&self, req: &TransactionRequest) -> Result<(), NetworkError> {
        self.check()?;
        self.created.borrow_mut().push(req.clone());
        Ok(())
    }

    async fn update_transaction(
        &self,
        id: i64,
        req: &TransactionRequest,
    ) -> Result<(), NetworkError> {
        self.check()?;
        self.updated.borrow_mut().push((id, req.clone()));
        Ok(())
    }

    async fn delete_transaction(&self, id: i64) -> Result<(), NetworkError> {
        self.check()?;
        self.deleted.borrow_mut().push(id);
        Ok(())
    }
}

pub fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

pub fn engine(fake: FakeRemote) -> SyncEngine<FakeRemote> {
    SyncEngine::new(mem_conn(), fake, NetworkStatus::new())
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn instant(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

pub fn july() -> Period {
    Period::new(instant(2025, 7, 1, 0), instant(2025, 7, 31, 23))
}

pub fn account(id: i64, balance: &str) -> Account {
    Account {
        id,
        user_id: 1,
        name: format!("Account {id}"),
        balance: dec(balance),
        currency: "RUB".to_string(),
        created_at: instant(2025, 1, 1, 0),
        updated_at: instant(2025, 1, 1, 0),
    }
}

pub fn category(id: i64, direction: Direction) -> Category {
    Category {
        id,
        name: format!("Category {id}"),
        emoji: "🧾".to_string(),
        direction,
    }
}

pub fn tx(id: i64, amount: &str, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id,
        account_id: 1,
        category_id: 1,
        amount: dec(amount),
        transaction_date: date,
        comment: None,
        created_at: date,
        updated_at: date,
    }
}

pub fn response_for(tx: &Transaction, account: &Account, category: &Category) -> TransactionResponse {
    TransactionResponse {
        id: tx.id,
        account: AccountBrief {
            id: account.id,
            name: account.name.clone(),
            balance: account.balance,
            currency: account.currency.clone(),
        },
        category: CategoryDto {
            id: category.id,
            name: category.name.clone(),
            emoji: category.emoji.clone(),
            is_income: category.is_income(),
        },
        amount: tx.amount,
        transaction_date: tx.transaction_date,
        comment: tx.comment.clone(),
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}
