//! Shared test-only helpers for pastebin_core.

use crate::models::paste::Paste;
use crate::Database;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.redb");
    let db = Database::open(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Fixed instant used as "creation time" across tests.
pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Build a paste row with the given limits, created at [`epoch`].
pub(crate) fn paste_with_limits(
    id: &str,
    content: &str,
    expires_at: Option<DateTime<Utc>>,
    max_views: Option<u64>,
) -> Paste {
    Paste::new(
        id.to_string(),
        content.to_string(),
        epoch(),
        expires_at,
        max_views,
    )
}
