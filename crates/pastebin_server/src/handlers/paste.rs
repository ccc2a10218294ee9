//! Paste API handlers.

use crate::{
    clock::RequestNow, error::HttpError, models::paste::*, store::run_store, AppError, AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    Json,
};
use hyper::HeaderMap;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme and host used to build share URLs.
///
/// Prefers the configured public base URL, then the request's `Host` header,
/// then the local listen port.
fn share_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = state.config.public_base_url.as_deref() {
        return base.to_string();
    }
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| matches!(*value, "http" | "https"))
        .unwrap_or("http");
    match headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
    {
        Some(host) => format!("{}://{}", scheme, host.trim()),
        None => format!("{}://localhost:{}", scheme, state.config.port),
    }
}

/// Create a new paste.
///
/// # Returns
/// `201` with the new id and share URL.
///
/// # Errors
/// Responds `400` for malformed JSON, invalid fields or oversized content,
/// and `500` when persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    RequestNow(now): RequestNow,
    headers: HeaderMap,
    payload: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedPaste>), HttpError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if req.content.len() > state.config.max_paste_size {
        return Err(AppError::BadRequest(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        ))
        .into());
    }

    let base_url = share_base_url(&state, &headers);
    let created = run_store(&state, move |service| service.create(req, now, &base_url)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch a paste and count the view.
///
/// # Returns
/// Content, remaining views and expiry time as JSON.
///
/// # Errors
/// Responds `404` when the paste is missing, expired or exhausted, or when
/// the id segment does not decode.
pub async fn get_paste(
    State(state): State<AppState>,
    RequestNow(now): RequestNow,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PasteView>, HttpError> {
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!("Rejected paste id segment: {}", rejection.body_text());
        AppError::NotFound
    })?;
    let view = run_store(&state, move |service| service.view(&id, now)).await?;
    Ok(Json(view))
}
