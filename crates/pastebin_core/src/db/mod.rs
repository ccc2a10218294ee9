//! Database layer for Pastebin Lite.

/// Paste storage operations.
pub mod paste;
/// Table definitions.
pub mod tables;

use crate::error::AppError;
use redb::ReadableDatabase;
use std::path::Path;
use std::sync::Arc;

/// Database handle with access to the paste tables.
///
/// Constructed once at process start and handed to the service; every clone
/// made through [`Database::share`] talks to the same redb instance.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: paste::PasteDb,
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be initialized.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: paste::PasteDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another worker in the same process.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database file and initialize tables.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or opened, including when
    /// another process already holds it.
    pub fn open(path: &str) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::StorageMessage(format!(
                        "Failed to create database directory '{}': {}",
                        parent.display(),
                        err
                    ))
                })?;
            }
        }

        let db = redb::Database::create(path)?;
        tracing::debug!("Opened paste database at {}", path);
        Self::from_shared(Arc::new(db))
    }

    /// Connectivity probe used by the health endpoint.
    ///
    /// # Errors
    /// Returns an error when a read transaction or table open fails.
    pub fn ping(&self) -> Result<(), AppError> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(tables::PASTES)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
