//! Human-facing pages.

use crate::{clock::RequestNow, error::PageError, render, store::run_store, AppError, AppState};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Html,
};

/// Render a paste without consuming a view.
///
/// # Errors
/// Responds `404` for missing, expired or exhausted pastes and `500` on
/// store failures.
pub async fn show_paste(
    State(state): State<AppState>,
    RequestNow(now): RequestNow,
    id: Result<Path<String>, PathRejection>,
) -> Result<Html<String>, PageError> {
    let Path(id) = id.map_err(|_| AppError::NotFound)?;
    let lookup_id = id.clone();
    let paste = run_store(&state, move |service| service.display(&lookup_id, now)).await?;
    Ok(Html(render::paste_page(&id, &paste.content)))
}

/// Landing page.
pub async fn index() -> Html<String> {
    Html(render::landing_page())
}
