//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: stored entity representing an account
//! - `AccountType`: the closed set of account categories
//! - Request bodies for create, deposit, withdraw and transfer
//! - `AccountResponse`: Response body returned to clients

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account category. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Saving,
    Checking,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Saving => "SAVING",
            AccountType::Checking => "CHECKING",
            AccountType::Current => "CURRENT",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `SAVING`, `CHECKING`, `CURRENT`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SAVING" => Ok(AccountType::Saving),
            "CHECKING" => Ok(AccountType::Checking),
            "CURRENT" => Ok(AccountType::Current),
            other => Err(UnknownAccountType(other.to_string())),
        }
    }
}

/// Represents a stored account.
///
/// # Balance Storage
///
/// Balances are `Decimal` (PostgreSQL `NUMERIC`) so repeated deposits and
/// withdrawals never drift the way binary floats do.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Store-assigned account number, immutable once assigned
    pub number: i64,

    pub account_type: AccountType,

    /// Unique across all accounts
    pub name: String,

    /// Current balance, never negative
    pub balance: Decimal,

    /// Timestamp when account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of last balance update
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller supplies for a new account; the store assigns the rest.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_type: AccountType,
    pub name: String,
    pub balance: Decimal,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "type": "SAVING",
///   "name": "Alice",
///   "balance": 100
/// }
/// ```
///
/// `type` stays a plain string here so an unknown category is reported as
/// "Invalid account type" rather than as a deserialization failure.
///
/// Money fields are read from the exact JSON number text, never via `f64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(rename = "type")]
    pub account_type: String,

    pub name: String,

    /// Initial balance
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

/// Request body for deposit and withdraw.
///
/// ```json
/// { "amount": 50 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

pub type DepositRequest = AmountRequest;
pub type WithdrawRequest = AmountRequest;
pub type TransferRequest = AmountRequest;

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "number": 1,
///   "type": "SAVING",
///   "name": "Alice",
///   "balance": 100.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub number: i64,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Convert a stored Account to the API AccountResponse.
///
/// This drops the `created_at`/`updated_at` store metadata.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            number: account.number,
            account_type: account.account_type,
            name: account.name,
            balance: account.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parses_canonical_account_types() {
        assert_eq!("SAVING".parse::<AccountType>(), Ok(AccountType::Saving));
        assert_eq!("CHECKING".parse::<AccountType>(), Ok(AccountType::Checking));
        assert_eq!("CURRENT".parse::<AccountType>(), Ok(AccountType::Current));
    }

    #[test]
    fn account_type_matching_is_case_sensitive() {
        assert!("Checking".parse::<AccountType>().is_err());
        assert!("saving".parse::<AccountType>().is_err());
        assert!("".parse::<AccountType>().is_err());
    }

    #[test]
    fn response_uses_type_key_and_numeric_balance() {
        let response = AccountResponse {
            number: 7,
            account_type: AccountType::Saving,
            name: "Alice".to_string(),
            balance: dec!(100.5),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"number": 7, "type": "SAVING", "name": "Alice", "balance": 100.5})
        );
    }

    #[test]
    fn response_hides_store_metadata() {
        let now = Utc::now();
        let account = Account {
            number: 1,
            account_type: AccountType::Current,
            name: "Bob".to_string(),
            balance: dec!(0),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(AccountResponse::from(account)).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("created_at"));
    }

    #[test]
    fn create_request_accepts_numeric_balance() {
        let request: CreateAccountRequest =
            serde_json::from_value(json!({"type": "SAVING", "name": "Alice", "balance": 100}))
                .unwrap();

        assert_eq!(request.account_type, "SAVING");
        assert_eq!(request.balance, dec!(100));
    }

    #[test]
    fn amount_request_requires_amount() {
        assert!(serde_json::from_value::<AmountRequest>(json!({})).is_err());

        let request: AmountRequest = serde_json::from_value(json!({"amount": 12.5})).unwrap();
        assert_eq!(request.amount, dec!(12.5));
    }

    #[test]
    fn amounts_are_parsed_without_float_rounding() {
        let request: AmountRequest =
            serde_json::from_str(r#"{"amount": 79228162514264337593543950335}"#).unwrap();
        assert_eq!(request.amount, Decimal::MAX);

        let request: AmountRequest =
            serde_json::from_str(r#"{"amount": 0.1000000000000000000001}"#).unwrap();
        assert_eq!(request.amount, dec!(0.1000000000000000000001));

        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"type": "SAVING", "name": "Alice", "balance": 100.10}"#)
                .unwrap();
        assert_eq!(request.balance, dec!(100.10));
    }
}
