//! Account storage.
//!
//! The service talks to storage only through [`AccountStore`], so the
//! PostgreSQL store and the in-memory store are interchangeable.
//!
//! # Units of Work
//!
//! Balance changes go through a [`UnitOfWork`]: rows are locked with
//! [`UnitOfWork::lock`], new balances staged with
//! [`UnitOfWork::set_balance`], and everything becomes visible at once on
//! [`UnitOfWork::commit`]. Dropping a unit of work without committing
//! discards every staged write.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::account::{Account, NewAccount};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

/// Failures reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Insert rejected because another account already has this name.
    #[error("Account name already exists")]
    DuplicateName,

    /// A stored row could not be mapped back into an [`Account`].
    #[error("Corrupt account record: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Every account, ordered by account number.
    async fn find_all(&self) -> Result<Vec<Account>, StoreError>;

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account; the store assigns its number.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Start a unit of work for read-modify-write balance changes.
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;

    /// Cheap liveness check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UnitOfWork: Send {
    /// Lock the account row for the rest of this unit of work and return it
    /// with any balance already staged here applied.
    async fn lock(&mut self, number: i64) -> Result<Option<Account>, StoreError>;

    /// Stage a new balance for an account previously returned by `lock`.
    async fn set_balance(&mut self, number: i64, balance: Decimal) -> Result<(), StoreError>;

    /// Make every staged write visible at once.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
