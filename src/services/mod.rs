//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They own validation, balance arithmetic and error classification.

pub mod account_service;

pub use account_service::AccountService;
