//! Paste storage operations backed by redb.

mod helpers;

use crate::{db::tables::*, error::AppError, models::paste::Paste};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;

pub(crate) use self::helpers::{deserialize_paste, expiry_index_key};

/// Accessor for paste-related redb tables.
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Returns
    /// A new [`PasteDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.open_table(PASTES_BY_EXPIRY)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new paste row and its expiry index row atomically.
    ///
    /// # Arguments
    /// - `paste`: Paste row to persist.
    ///
    /// # Returns
    /// `Ok(())` when insert commits.
    ///
    /// # Errors
    /// Returns [`AppError::DuplicateId`] when the id is already taken, so the
    /// caller can retry with a fresh one. Storage and serialization failures
    /// are propagated as-is.
    pub fn create(&self, paste: &Paste) -> Result<(), AppError> {
        let encoded_paste = bincode::serialize(paste)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_expiry = write_txn.open_table(PASTES_BY_EXPIRY)?;

            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(AppError::DuplicateId(paste.id.clone()));
            }

            pastes.insert(paste.id.as_str(), encoded_paste.as_slice())?;
            if let Some(expires_at) = paste.expires_at {
                by_expiry.insert((expiry_index_key(expires_at), paste.id.as_str()), ())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a paste by id without touching its view counter.
    ///
    /// Expired and exhausted rows are returned too; visibility is decided by
    /// the caller.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    /// Count one view if the paste is still readable at `now`.
    ///
    /// The eligibility check, the increment and the write-back run inside one
    /// write transaction. redb admits a single writer at a time, so concurrent
    /// callers are serialized and never both consume the last remaining view.
    ///
    /// # Returns
    /// `Ok(Some(paste))` with the post-increment row, or `Ok(None)` when the
    /// paste is missing, expired, or already at its view cap.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn fetch_and_increment_if_eligible(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Paste>, AppError> {
        let write_txn = self.db.begin_write()?;
        let viewed = {
            let mut pastes = write_txn.open_table(PASTES)?;

            let Some(guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(guard.value())?;
            drop(guard);

            if !paste.is_accessible_at(now) {
                return Ok(None);
            }

            paste.views_count = paste.views_count.saturating_add(1);
            let encoded_paste = bincode::serialize(&paste)?;
            pastes.insert(id, encoded_paste.as_slice())?;
            paste
        };

        write_txn.commit()?;
        Ok(Some(viewed))
    }

    /// Return up to `limit` ids whose expiry time is at or before `now`, oldest first.
    ///
    /// Walks the expiry index only; rows without an expiry are never listed.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn expired_ids(&self, now: DateTime<Utc>, limit: usize) -> Result<Vec<String>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let cutoff = expiry_index_key(now);
        let read_txn = self.db.begin_read()?;
        let by_expiry = read_txn.open_table(PASTES_BY_EXPIRY)?;
        let mut ids = Vec::new();

        for item in by_expiry.iter()? {
            let (key, _) = item?;
            let (expires_millis, paste_id) = key.value();
            if expires_millis > cutoff {
                break;
            }
            ids.push(paste_id.to_string());
            if ids.len() >= limit {
                break;
            }
        }

        Ok(ids)
    }

    /// Number of stored paste rows, including expired ones.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.len()?)
    }
}
