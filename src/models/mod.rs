//! Data models representing stored entities and API payloads.

/// Bank account model
pub mod account;
