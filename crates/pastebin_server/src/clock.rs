//! Request-time clock resolution.
//!
//! Handlers never read wall-clock time themselves; they extract
//! [`RequestNow`], which honors the simulated-clock header only when the
//! server runs in test mode.

use crate::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use hyper::HeaderMap;
use pastebin_core::constants::TEST_NOW_HEADER;
use std::convert::Infallible;

/// Evaluation instant for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestNow(pub DateTime<Utc>);

fn parse_test_now(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let raw = headers.get(TEST_NOW_HEADER)?.to_str().ok()?.trim();
    let millis: i64 = raw.parse().ok()?;
    if millis <= 0 {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

/// Resolve "now" for a request.
///
/// With `test_mode` set, a valid `x-test-now-ms` header replaces wall-clock
/// time; a missing or malformed header falls back to wall-clock time.
pub fn resolve_now(test_mode: bool, headers: &HeaderMap) -> DateTime<Utc> {
    if test_mode {
        if let Some(simulated) = parse_test_now(headers) {
            return simulated;
        }
    }
    Utc::now()
}

#[async_trait]
impl FromRequestParts<AppState> for RequestNow {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_now(state.config.test_mode, &parts.headers)))
    }
}
