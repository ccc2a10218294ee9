//! HTTP request handlers.

/// Health probe endpoint.
pub mod health;
/// Rendered paste page and landing page.
pub mod page;
/// Paste API endpoints.
pub mod paste;

use crate::error::HttpError;
use crate::AppError;
use axum::{http::Uri, response::IntoResponse, response::Response};

/// Fallback for unmatched routes: JSON under `/api/`, plain text elsewhere.
pub async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        HttpError(AppError::NotFound).into_response()
    } else {
        (axum::http::StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}
