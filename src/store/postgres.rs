//! PostgreSQL account store.
//!
//! # Atomicity Guarantees
//!
//! Every unit of work is a PostgreSQL transaction. Rows are locked with
//! `SELECT ... FOR UPDATE`, so concurrent read-modify-write sequences on the
//! same account are serialized by the database. Dropping the transaction
//! without committing rolls it back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use super::{AccountStore, StoreError, UnitOfWork};
use crate::{
    db::DbPool,
    models::account::{Account, NewAccount},
};

/// Raw `accounts` row; `account_type` is TEXT in the database.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    number: i64,
    account_type: String,
    name: String,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let account_type = row
            .account_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {e}", row.number)))?;

        Ok(Account {
            number: row.number,
            account_type,
            name: row.name,
            balance: row.balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: DbPool,
}

impl PgAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT number, account_type, name, balance, created_at, updated_at FROM accounts ORDER BY number",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT number, account_type, name, balance, created_at, updated_at FROM accounts WHERE number = $1",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?
        .map(Account::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT number, account_type, name, balance, created_at, updated_at FROM accounts WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .map(Account::try_from)
        .transpose()
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (account_type, name, balance)
            VALUES ($1, $2, $3)
            RETURNING number, account_type, name, balance, created_at, updated_at
            "#,
        )
        .bind(account.account_type.as_str())
        .bind(&account.name)
        .bind(account.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // The UNIQUE constraint on `name` catches concurrent creates
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::DuplicateName,
            other => StoreError::Database(other),
        })?;

        Account::try_from(row)
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// A unit of work backed by one database transaction.
struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn lock(&mut self, number: i64) -> Result<Option<Account>, StoreError> {
        // FOR UPDATE holds the row until commit or rollback
        sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT number, account_type, name, balance, created_at, updated_at
            FROM accounts
            WHERE number = $1
            FOR UPDATE
            "#,
        )
        .bind(number)
        .fetch_optional(&mut *self.tx)
        .await?
        .map(Account::try_from)
        .transpose()
    }

    async fn set_balance(&mut self, number: i64, balance: Decimal) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET balance = $1,
                updated_at = NOW()
            WHERE number = $2
            "#,
        )
        .bind(balance)
        .bind(number)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let PgUnitOfWork { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
