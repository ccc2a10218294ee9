//! Bounded execution of blocking store calls.

use crate::{AppError, AppState, PasteService};
use std::sync::Arc;

/// Run `op` against the paste service on the blocking pool.
///
/// The call is bounded by the configured store timeout. A timed-out
/// operation is not cancelled and may still complete in the background.
///
/// # Errors
/// Returns the operation's own error, [`AppError::StorageMessage`] on
/// timeout, or [`AppError::Internal`] when the task panicked or was cancelled.
pub(crate) async fn run_store<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&PasteService) -> Result<T, AppError> + Send + 'static,
{
    let service: Arc<PasteService> = state.service.clone();
    let limit = state.config.store_timeout();
    let task = tokio::task::spawn_blocking(move || op(&service));

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => {
            tracing::error!("Store task failed: {}", join_err);
            Err(AppError::Internal)
        }
        Err(_) => Err(AppError::StorageMessage(format!(
            "Store operation exceeded {:?}",
            limit
        ))),
    }
}
