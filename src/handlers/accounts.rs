//! Account HTTP handlers.
//!
//! This module implements the account API endpoints:
//! - GET /accounts - List all accounts
//! - GET /accounts/{accountNo} - Get account by number
//! - POST /accounts - Create new account
//! - POST /accounts/{accountNo}/deposit - Add money to an account
//! - POST /accounts/{accountNo}/withdraw - Remove money from an account
//! - POST /accounts/{accountNo}/transfer/{targetAccountNo} - Move money between accounts
//!
//! Path parameters and bodies are taken as `Result<_, Rejection>` so a bad
//! account number or a malformed body is answered with the same error format
//! as every other failure.

use crate::{
    error::AppError,
    models::account::{
        AccountResponse, CreateAccountRequest, DepositRequest, TransferRequest, WithdrawRequest,
    },
    services::account_service::AccountService,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// List all accounts.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "number": 1, "type": "SAVING", "name": "Alice", "balance": 100.0 },
///   { "number": 2, "type": "CURRENT", "name": "Bob", "balance": 0.0 }
/// ]
/// ```
pub async fn list_accounts(
    State(service): State<AccountService>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    Ok(Json(service.list().await?))
}

/// Get a specific account by number.
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details
/// - **Error (404)**: Account not found
pub async fn get_account(
    State(service): State<AccountService>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(account_no) = path?;
    Ok(Json(service.get(account_no).await?))
}

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// { "type": "SAVING", "name": "Alice", "balance": 100 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the created account with its number
/// - **Error (400)**: Invalid type, duplicate name, or malformed body
/// - **Error (500)**: The account could not be stored
pub async fn create_account(
    State(service): State<AccountService>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Json(request) = payload?;

    let account = service
        .create(&request.account_type, &request.name, request.balance)
        .await?;

    Ok(Json(account))
}

/// Deposit an amount to the account.
///
/// # Request Body
///
/// ```json
/// { "amount": 50 }
/// ```
pub async fn deposit(
    State(service): State<AccountService>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(account_no) = path?;
    let Json(request) = payload?;
    Ok(Json(service.deposit(account_no, request.amount).await?))
}

/// Withdraw an amount from the account.
///
/// # Validation
///
/// - Account must have sufficient balance (400 otherwise)
pub async fn withdraw(
    State(service): State<AccountService>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(account_no) = path?;
    let Json(request) = payload?;
    Ok(Json(service.withdraw(account_no, request.amount).await?))
}

/// Transfer money from one account to another.
///
/// # Atomicity
///
/// Both accounts are updated in a single unit of work.
/// Either both succeed or both fail.
///
/// # Response
///
/// The source account after the transfer.
pub async fn transfer(
    State(service): State<AccountService>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path((account_no, target_account_no)) = path?;
    let Json(request) = payload?;

    let account = service
        .transfer(account_no, target_account_no, request.amount)
        .await?;

    Ok(Json(account))
}
