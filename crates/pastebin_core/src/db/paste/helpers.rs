//! Helper functions shared by paste storage operations.

use crate::error::AppError;
use crate::models::paste::Paste;
use chrono::{DateTime, Utc};

pub(crate) fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn expiry_index_key(expires_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps clamp to zero; they are expired either way.
    expires_at.timestamp_millis().max(0) as u64
}
