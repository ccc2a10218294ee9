//! Core domain library for Pastebin Lite (config, storage, expiry rules, service).

/// Configuration loading and defaults.
pub mod config;
/// Shared defaults and limits.
pub mod constants;
/// Database access layer backed by redb.
pub mod db;
/// Process-global environment helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Expiry policy evaluation.
pub mod expiry;
/// Share identifier generation.
pub mod ids;
/// Data models for API requests and persistence.
pub mod models;
/// Paste lifecycle orchestration.
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::AppError;
pub use service::PasteService;
