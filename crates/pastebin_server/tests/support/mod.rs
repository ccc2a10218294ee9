//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use pastebin_server::{constants::TEST_NOW_HEADER, create_app, AppState, Config, Database};
use std::path::Path;
use tempfile::TempDir;

/// Simulated creation instant (2024-01-01T00:00:00Z) in epoch millis.
pub(crate) const T0_MS: i64 = 1_704_067_200_000;

pub(crate) fn test_config_for_db_path(db_path: &Path, test_mode: bool) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_paste_size: 1024,
        store_timeout_ms: 5_000,
        public_base_url: None,
        test_mode,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let db = Database::open(config.db_path.as_str()).expect("open db");
    let state = AppState::new(config, db);
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn setup_server(test_mode: bool) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.redb");
    let config = test_config_for_db_path(&db_path, test_mode);
    (test_server_for_config(config), temp_dir)
}

/// Header pair that pins the request clock to `T0_MS + offset_seconds`.
pub(crate) fn clock_at(offset_seconds: i64) -> (HeaderName, HeaderValue) {
    let millis = T0_MS + offset_seconds * 1000;
    (
        HeaderName::from_static(TEST_NOW_HEADER),
        HeaderValue::from_str(&millis.to_string()).expect("header value"),
    )
}
