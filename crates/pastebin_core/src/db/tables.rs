//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Canonical paste rows (`Paste`, bincode-encoded).
pub const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");

/// Expiry index ordered by `expires_at` millis then id. Pastes without an
/// expiry time have no row here.
pub const PASTES_BY_EXPIRY: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("pastes_by_expiry");
