//! Data models shared by storage, service and HTTP layers.

/// Paste records and API payloads.
pub mod paste;
