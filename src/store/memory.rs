//! In-memory account store.
//!
//! Used by the test suites and by the server when no `DATABASE_URL` is
//! configured. A unit of work holds the whole store lock from `begin` until
//! it is committed or dropped, so conflicting read-modify-write sequences
//! run one after another.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{AccountStore, StoreError, UnitOfWork};
use crate::models::account::{Account, NewAccount};

#[derive(Debug, Default)]
struct Accounts {
    next_number: i64,
    by_number: BTreeMap<i64, Account>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    inner: Arc<Mutex<Accounts>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.inner.lock().await;
        Ok(accounts.by_number.values().cloned().collect())
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        let accounts = self.inner.lock().await;
        Ok(accounts.by_number.get(&number).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.inner.lock().await;
        Ok(accounts
            .by_number
            .values()
            .find(|account| account.name == name)
            .cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.inner.lock().await;
        if accounts.by_number.values().any(|a| a.name == account.name) {
            return Err(StoreError::DuplicateName);
        }

        accounts.next_number += 1;
        let now = Utc::now();
        let stored = Account {
            number: accounts.next_number,
            account_type: account.account_type,
            name: account.name,
            balance: account.balance,
            created_at: now,
            updated_at: now,
        };
        accounts.by_number.insert(stored.number, stored.clone());

        Ok(stored)
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let guard = self.inner.clone().lock_owned().await;
        Ok(Box::new(MemoryUnitOfWork {
            guard,
            staged: HashMap::new(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Holds the store lock; balances are staged until commit.
struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<Accounts>,
    staged: HashMap<i64, Decimal>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn lock(&mut self, number: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.guard.by_number.get(&number).map(|account| {
            let mut account = account.clone();
            if let Some(balance) = self.staged.get(&number) {
                account.balance = *balance;
            }
            account
        }))
    }

    async fn set_balance(&mut self, number: i64, balance: Decimal) -> Result<(), StoreError> {
        if !self.guard.by_number.contains_key(&number) {
            return Err(StoreError::Corrupt(format!("account {number} vanished")));
        }
        self.staged.insert(number, balance);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryUnitOfWork { mut guard, staged } = *self;
        let now = Utc::now();
        for (number, balance) in staged {
            if let Some(account) = guard.by_number.get_mut(&number) {
                account.balance = balance;
                account.updated_at = now;
            }
        }
        Ok(())
    }
}
