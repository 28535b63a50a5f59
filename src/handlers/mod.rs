//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Calls the account service
//! 3. Returns HTTP response (JSON, status code)

use axum::{
    Router,
    routing::{get, post},
};

use crate::services::account_service::AccountService;

/// Account management endpoints
pub mod accounts;
/// Liveness endpoint
pub mod health;

/// Build the application router with every route bound to `service`.
pub fn create_router(service: AccountService) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route("/accounts/{accountNo}", get(accounts::get_account))
        .route("/accounts/{accountNo}/deposit", post(accounts::deposit))
        .route("/accounts/{accountNo}/withdraw", post(accounts::withdraw))
        .route(
            "/accounts/{accountNo}/transfer/{targetAccountNo}",
            post(accounts::transfer),
        )
        .with_state(service)
}
