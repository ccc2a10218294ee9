//! Paste lifecycle orchestration: creation, display reads and counted reads.
//!
//! Every operation takes the evaluation instant from the caller. The HTTP
//! layer decides whether that is wall-clock time or a simulated test clock.

use crate::constants::MAX_ID_ATTEMPTS;
use crate::db::Database;
use crate::error::AppError;
use crate::ids::{self, IdGenerator};
use crate::models::paste::{CreatePasteRequest, CreatedPaste, Paste, PasteView};
use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Validated creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u64>,
}

fn parse_positive(value: Option<i64>, field: &str) -> Result<Option<u64>, AppError> {
    match value {
        None => Ok(None),
        Some(value) if value >= 1 => Ok(Some(value as u64)),
        Some(_) => Err(AppError::BadRequest(format!(
            "{} must be an integer >= 1 when provided",
            field
        ))),
    }
}

impl NewPaste {
    /// Validate a create request and resolve its TTL against `now`.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for blank content, non-positive limits,
    /// or a TTL that overflows the timestamp range.
    pub fn from_request(request: CreatePasteRequest, now: DateTime<Utc>) -> Result<Self, AppError> {
        if request.content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "content is required and must be a non-empty string".to_string(),
            ));
        }

        let ttl_seconds = parse_positive(request.ttl_seconds, "ttl_seconds")?;
        let max_views = parse_positive(request.max_views, "max_views")?;

        let expires_at = match ttl_seconds {
            None => None,
            Some(ttl) => Some(
                i64::try_from(ttl)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .and_then(|ttl| now.checked_add_signed(ttl))
                    .ok_or_else(|| {
                        AppError::BadRequest("ttl_seconds is too large".to_string())
                    })?,
            ),
        };

        Ok(Self {
            content: request.content,
            expires_at,
            max_views,
        })
    }
}

/// Build the human-facing share URL for `id`.
pub fn share_url(base_url: &str, id: &str) -> String {
    format!("{}/p/{}", base_url.trim_end_matches('/'), id)
}

/// Orchestrates paste creation and the two read paths over a [`Database`].
pub struct PasteService {
    db: Database,
    id_generator: IdGenerator,
}

impl PasteService {
    /// Create a service that draws random share ids.
    pub fn new(db: Database) -> Self {
        Self::with_id_generator(db, ids::default_generator())
    }

    /// Create a service with a custom id source.
    pub fn with_id_generator(db: Database, id_generator: IdGenerator) -> Self {
        Self { db, id_generator }
    }

    /// Underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Store connectivity probe.
    ///
    /// # Errors
    /// Propagates the store error when the probe fails.
    pub fn ping(&self) -> Result<(), AppError> {
        self.db.ping()
    }

    /// Validate and persist a new paste.
    ///
    /// Colliding ids are replaced with fresh ones up to [`MAX_ID_ATTEMPTS`] times.
    ///
    /// # Arguments
    /// - `request`: Raw create payload.
    /// - `now`: Creation instant; the TTL is measured from here.
    /// - `base_url`: Scheme and host used to build the share URL.
    ///
    /// # Returns
    /// The new id and its share URL.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for invalid input,
    /// [`AppError::IdSpaceExhausted`] when every attempt collided, or the
    /// underlying storage error.
    pub fn create(
        &self,
        request: CreatePasteRequest,
        now: DateTime<Utc>,
        base_url: &str,
    ) -> Result<CreatedPaste, AppError> {
        // Stored timestamps keep millisecond precision to match the expiry index.
        let now = now.trunc_subsecs(3);
        let draft = NewPaste::from_request(request, now)?;
        let mut paste = Paste::new(
            String::new(),
            draft.content,
            now,
            draft.expires_at,
            draft.max_views,
        );

        for attempt in 1..=MAX_ID_ATTEMPTS {
            paste.id = (self.id_generator)();
            match self.db.pastes.create(&paste) {
                Ok(()) => {
                    tracing::info!(
                        id = %paste.id,
                        ttl = ?paste.expires_at.map(|at| (at - now).num_seconds()),
                        max_views = ?paste.max_views,
                        "Created paste"
                    );
                    return Ok(CreatedPaste {
                        url: share_url(base_url, &paste.id),
                        id: paste.id,
                    });
                }
                Err(AppError::DuplicateId(id)) => {
                    tracing::warn!(attempt, id = %id, "Paste id collision; retrying");
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    /// Fetch a paste for human viewing without consuming a view.
    ///
    /// Expired and exhausted pastes are reported as [`AppError::NotFound`],
    /// the same as ids that never existed.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] or the underlying storage error.
    pub fn display(&self, id: &str, now: DateTime<Utc>) -> Result<Paste, AppError> {
        if !ids::is_well_formed(id) {
            return Err(AppError::NotFound);
        }
        let paste = self.db.pastes.get(id)?.ok_or(AppError::NotFound)?;
        if !paste.is_accessible_at(now) {
            tracing::debug!(id, state = ?paste.state_at(now), "Display read on inaccessible paste");
            return Err(AppError::NotFound);
        }
        Ok(paste)
    }

    /// Consume one view and return the paste with its remaining allowance.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when the paste is missing, expired or
    /// exhausted, or the underlying storage error.
    pub fn view(&self, id: &str, now: DateTime<Utc>) -> Result<PasteView, AppError> {
        if !ids::is_well_formed(id) {
            return Err(AppError::NotFound);
        }
        let paste = self
            .db
            .pastes
            .fetch_and_increment_if_eligible(id, now)?
            .ok_or(AppError::NotFound)?;
        tracing::debug!(id, views = paste.views_count, "Counted paste view");
        Ok(PasteView::from(paste))
    }
}

#[cfg(test)]
mod tests;
