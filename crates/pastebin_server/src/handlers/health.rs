//! Store connectivity probe.

use crate::{store::run_store, AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Report whether the store answers a trivial read.
///
/// Always responds `200`; the body carries the probe outcome.
pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    let ok = match run_store(&state, |service| service.ping()).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("Health probe failed: {}", err);
            false
        }
    };
    Json(json!({ "ok": ok }))
}
