//! HTTP error mapping for API and page handlers.

use crate::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::NotFound => StatusCode::NOT_FOUND,
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_if_internal(err: &AppError) {
    if !err.is_client_error() {
        tracing::error!(error = ?err, "Request failed: {}", err);
    }
}

/// JSON error wrapper for `/api/*` handlers.
///
/// Body shape: `{"error": {"code": ..., "message": ...}}`. Server-side
/// failures are logged in full and reported with a generic message.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        log_if_internal(&self.0);
        let status = status_for(&self.0);
        let (code, message) = match &self.0 {
            AppError::NotFound => ("NOT_FOUND", "Not found".to_string()),
            AppError::BadRequest(message) => ("BAD_REQUEST", message.clone()),
            _ => ("INTERNAL_ERROR", INTERNAL_MESSAGE.to_string()),
        };
        let body = Json(json!({ "error": { "code": code, "message": message } }));
        (status, body).into_response()
    }
}

/// Plain-text error wrapper for the rendered paste page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        log_if_internal(&self.0);
        let status = status_for(&self.0);
        let body = match status {
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::BAD_REQUEST => "Bad Request",
            _ => "Internal Server Error",
        };
        (status, body).into_response()
    }
}
