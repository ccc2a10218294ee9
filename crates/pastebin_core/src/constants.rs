//! Shared constants used across Pastebin Lite crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum paste size (bytes) accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 256 * 1024;

/// Default upper bound for a single store operation, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;

/// Length of generated share identifiers.
pub const ID_LENGTH: usize = 10;

/// Attempts made to find an unused identifier before giving up.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// Request header carrying the simulated clock (milliseconds since epoch) in test mode.
pub const TEST_NOW_HEADER: &str = "x-test-now-ms";

/// File name used when `DB_PATH` is not set.
pub const DEFAULT_DB_FILE_NAME: &str = "pastes.redb";
