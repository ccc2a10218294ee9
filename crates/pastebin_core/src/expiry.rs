//! Expiry policy evaluation.
//!
//! A paste stops being readable when its expiry time has passed or when its
//! view counter has reached the cap. Both checks run on every evaluation and
//! either one is enough to block access. The evaluation instant is always
//! supplied by the caller so expiry can be simulated deterministically.

use chrono::{DateTime, Utc};

/// Logical lifecycle state derived from a paste's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteState {
    Active,
    /// `now` reached `expires_at`.
    Expired,
    /// `views_count` reached `max_views`.
    Exhausted,
}

impl PasteState {
    /// Whether reads are allowed in this state.
    pub fn is_accessible(self) -> bool {
        matches!(self, Self::Active)
    }
}

fn is_time_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|at| now >= at)
}

fn is_view_exhausted(max_views: Option<u64>, views_count: u64) -> bool {
    max_views.is_some_and(|max| views_count >= max)
}

/// Decide whether a paste is readable at `now`.
pub fn is_accessible(
    expires_at: Option<DateTime<Utc>>,
    max_views: Option<u64>,
    views_count: u64,
    now: DateTime<Utc>,
) -> bool {
    !is_time_expired(expires_at, now) && !is_view_exhausted(max_views, views_count)
}

/// Derive the lifecycle state at `now`.
///
/// When both limits are hit the paste reports [`PasteState::Expired`]; callers
/// outside the core never see the difference.
pub fn evaluate(
    expires_at: Option<DateTime<Utc>>,
    max_views: Option<u64>,
    views_count: u64,
    now: DateTime<Utc>,
) -> PasteState {
    if is_time_expired(expires_at, now) {
        PasteState::Expired
    } else if is_view_exhausted(max_views, views_count) {
        PasteState::Exhausted
    } else {
        PasteState::Active
    }
}

/// Views left before the cap, floored at zero. `None` when uncapped.
pub fn remaining_views(max_views: Option<u64>, views_count: u64) -> Option<u64> {
    max_views.map(|max| max.saturating_sub(views_count))
}
