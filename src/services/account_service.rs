//! Account service - Core business logic for bank accounts.
//!
//! This service handles:
//! - Account type and name validation
//! - Balance arithmetic and the non-negative balance rule
//! - Classification of failures into `NotFound`, `BadRequest` and `Internal`
//!
//! # Atomicity Guarantees
//!
//! Deposit, withdraw and transfer each run inside one store unit of work.
//! The rows involved stay locked until commit, and an early return drops the
//! unit of work, which discards anything already staged.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::account::{AccountResponse, AccountType, NewAccount},
    store::{AccountStore, StoreError},
};

const ACCOUNT_NOT_FOUND: &str = "Account not found";
const TARGET_NOT_FOUND: &str = "Target account not found";
const INSUFFICIENT_BALANCE: &str = "Insufficient balance";

/// Business operations on accounts, backed by an injected store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

/// Collapse a store failure into a fixed, caller-safe message.
fn internal(message: &'static str) -> impl Fn(StoreError) -> AppError {
    move |error| {
        tracing::error!(error = %error, "{message}");
        AppError::internal(message)
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::bad_request("Amount must be positive"));
    }
    Ok(())
}

fn overflow() -> AppError {
    AppError::bad_request("Amount too large")
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// List every account, ordered by account number.
    pub async fn list(&self) -> Result<Vec<AccountResponse>, AppError> {
        let accounts = self
            .store
            .find_all()
            .await
            .map_err(internal("Failed to fetch accounts"))?;

        Ok(accounts.into_iter().map(Into::into).collect())
    }

    /// Get a single account by number.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no account has this number
    /// - `Internal`: the store failed
    pub async fn get(&self, number: i64) -> Result<AccountResponse, AppError> {
        self.store
            .find_by_number(number)
            .await
            .map_err(internal("Failed to fetch account"))?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found(ACCOUNT_NOT_FOUND))
    }

    /// Create a new account.
    ///
    /// # Process
    ///
    /// 1. Validate the account type against `SAVING`, `CHECKING`, `CURRENT`
    /// 2. Reject a negative initial balance
    /// 3. Reject a name that is already taken
    /// 4. Insert; the store assigns the account number
    ///
    /// # Errors
    ///
    /// - `BadRequest`: invalid type, negative balance, or duplicate name
    /// - `Internal`: the insert failed for any other reason
    pub async fn create(
        &self,
        account_type: &str,
        name: &str,
        balance: Decimal,
    ) -> Result<AccountResponse, AppError> {
        let account_type: AccountType = account_type
            .parse()
            .map_err(|_| AppError::bad_request("Invalid account type"))?;

        if balance < Decimal::ZERO {
            return Err(AppError::bad_request(
                "Initial balance must not be negative",
            ));
        }

        let existing = self
            .store
            .find_by_name(name)
            .await
            .map_err(internal("Failed to create account"))?;
        if existing.is_some() {
            return Err(AppError::bad_request("Account name already exists"));
        }

        let account = self
            .store
            .insert(NewAccount {
                account_type,
                name: name.to_string(),
                balance,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent create of the same name
                StoreError::DuplicateName => AppError::bad_request("Account name already exists"),
                other => internal("Failed to create account")(other),
            })?;

        tracing::info!(
            number = account.number,
            account_type = %account.account_type,
            "Account created"
        );

        Ok(account.into())
    }

    /// Add `amount` to an account's balance.
    ///
    /// # Errors
    ///
    /// - `BadRequest`: amount is zero or negative
    /// - `NotFound`: account doesn't exist
    /// - `Internal`: the update could not be persisted
    pub async fn deposit(&self, number: i64, amount: Decimal) -> Result<AccountResponse, AppError> {
        ensure_positive(amount)?;
        let failed = internal("Failed to deposit");

        let mut uow = self.store.begin().await.map_err(&failed)?;
        let mut account = uow
            .lock(number)
            .await
            .map_err(&failed)?
            .ok_or_else(|| AppError::not_found(ACCOUNT_NOT_FOUND))?;

        account.balance = account.balance.checked_add(amount).ok_or_else(overflow)?;
        uow.set_balance(number, account.balance)
            .await
            .map_err(&failed)?;
        uow.commit().await.map_err(&failed)?;

        tracing::info!(number, %amount, "Deposit applied");
        Ok(account.into())
    }

    /// Remove `amount` from an account's balance.
    ///
    /// # Errors
    ///
    /// - `BadRequest`: amount is zero or negative, or the balance would go
    ///   below zero
    /// - `NotFound`: account doesn't exist
    /// - `Internal`: the update could not be persisted
    pub async fn withdraw(
        &self,
        number: i64,
        amount: Decimal,
    ) -> Result<AccountResponse, AppError> {
        ensure_positive(amount)?;
        let failed = internal("Failed to withdraw");

        let mut uow = self.store.begin().await.map_err(&failed)?;
        let mut account = uow
            .lock(number)
            .await
            .map_err(&failed)?
            .ok_or_else(|| AppError::not_found(ACCOUNT_NOT_FOUND))?;

        let new_balance = account.balance - amount;
        if new_balance < Decimal::ZERO {
            return Err(AppError::bad_request(INSUFFICIENT_BALANCE));
        }

        account.balance = new_balance;
        uow.set_balance(number, account.balance)
            .await
            .map_err(&failed)?;
        uow.commit().await.map_err(&failed)?;

        tracing::info!(number, %amount, "Withdrawal applied");
        Ok(account.into())
    }

    /// Move `amount` from `source` to `target`.
    ///
    /// Returns the source account's state after the transfer.
    ///
    /// # Atomicity
    ///
    /// Both balances are written in the same unit of work. Either both
    /// changes become visible or neither does.
    ///
    /// # Errors
    ///
    /// - `BadRequest`: amount is zero or negative, source and target are the
    ///   same account, or the source balance is below `amount`
    /// - `NotFound`: source or target doesn't exist
    /// - `Internal`: either leg could not be persisted
    pub async fn transfer(
        &self,
        source: i64,
        target: i64,
        amount: Decimal,
    ) -> Result<AccountResponse, AppError> {
        ensure_positive(amount)?;
        let failed = internal("Failed to transfer");

        let mut uow = self.store.begin().await.map_err(&failed)?;

        // Lock in ascending number order so two opposite transfers cannot
        // deadlock on each other's rows.
        let (first, second) = if source <= target {
            (source, target)
        } else {
            (target, source)
        };
        let first_account = uow.lock(first).await.map_err(&failed)?;
        let second_account = if second == first {
            first_account.clone()
        } else {
            uow.lock(second).await.map_err(&failed)?
        };
        let (source_account, target_account) = if source <= target {
            (first_account, second_account)
        } else {
            (second_account, first_account)
        };

        let mut source_account =
            source_account.ok_or_else(|| AppError::not_found(ACCOUNT_NOT_FOUND))?;
        let mut target_account =
            target_account.ok_or_else(|| AppError::not_found(TARGET_NOT_FOUND))?;

        if source == target {
            return Err(AppError::bad_request("Cannot transfer to same account"));
        }

        if source_account.balance < amount {
            return Err(AppError::bad_request(INSUFFICIENT_BALANCE));
        }

        source_account.balance -= amount;
        target_account.balance = target_account
            .balance
            .checked_add(amount)
            .ok_or_else(overflow)?;

        uow.set_balance(source, source_account.balance)
            .await
            .map_err(&failed)?;
        uow.set_balance(target, target_account.balance)
            .await
            .map_err(&failed)?;
        uow.commit().await.map_err(&failed)?;

        tracing::info!(source, target, %amount, "Transfer applied");
        Ok(source_account.into())
    }

    /// Check that the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.store
            .ping()
            .await
            .map_err(internal("Store unavailable"))
    }
}
