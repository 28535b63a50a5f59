//! Fintech Bank library.
//!
//! Re-exports modules for the server binary and for integration testing.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use services::AccountService;
