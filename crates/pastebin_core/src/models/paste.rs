//! Paste records and the request/response shapes built around them.

use crate::expiry::{self, PasteState};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Paste row stored in the database.
///
/// Only `views_count` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u64>,
    pub views_count: u64,
}

/// Request payload for creating a paste.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_optional_whole_number")]
    pub ttl_seconds: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_whole_number")]
    pub max_views: Option<i64>,
}

/// Identifier and share URL returned after a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPaste {
    pub id: String,
    pub url: String,
}

/// Result of a counted read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u64>,
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Paste {
    /// Build a fresh paste row with a zero view counter.
    pub fn new(
        id: String,
        content: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        max_views: Option<u64>,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            expires_at,
            max_views,
            views_count: 0,
        }
    }

    /// Logical lifecycle state at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> PasteState {
        expiry::evaluate(self.expires_at, self.max_views, self.views_count, now)
    }

    /// Whether this paste may be read at `now`.
    pub fn is_accessible_at(&self, now: DateTime<Utc>) -> bool {
        expiry::is_accessible(self.expires_at, self.max_views, self.views_count, now)
    }

    /// Views left before the cap is reached, `None` when uncapped.
    pub fn remaining_views(&self) -> Option<u64> {
        expiry::remaining_views(self.max_views, self.views_count)
    }
}

impl From<Paste> for PasteView {
    fn from(value: Paste) -> Self {
        let remaining_views = value.remaining_views();
        Self {
            content: value.content,
            remaining_views,
            expires_at: value.expires_at,
        }
    }
}

/// Format a timestamp as ISO 8601 UTC with millisecond precision.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_optional_timestamp<S>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
        None => serializer.serialize_none(),
    }
}

/// Accepts JSON integers and whole-valued floats (`5.0`, `1e1`) that fit in
/// an `i64`. Fractions, strings and booleans are rejected.
fn deserialize_optional_whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalWholeNumber;

    impl<'de> de::Visitor<'de> for OptionalWholeNumber {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(WholeNumber).map(Some)
        }
    }

    struct WholeNumber;

    impl<'de> de::Visitor<'de> for WholeNumber {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            // 2^63 is exactly representable; i64::MAX is not.
            const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
            let whole = value.is_finite() && value.fract() == 0.0;
            if whole && (-TWO_POW_63..TWO_POW_63).contains(&value) {
                Ok(value as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_option(OptionalWholeNumber)
}
