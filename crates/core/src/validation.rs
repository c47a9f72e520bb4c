//! Input normalization and validation helpers.
//!
//! Request bodies come from browser forms as often as from API clients, so
//! ids and counts may arrive as numbers or numeric strings and every text
//! field may be missing. These helpers turn such raw input into the values
//! that get stored, or a [`CoreError::Validation`] with the message shown to
//! the user.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Trim an optional text field, storing a missing value as an empty string.
pub fn normalize_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Trim a required text field, failing with `message` when it is missing or
/// blank.
pub fn require_text(value: Option<String>, message: &str) -> Result<String, CoreError> {
    let value = normalize_text(value);
    if value.is_empty() {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// Require a parent id to be present.
pub fn require_id(value: Option<DbId>, message: &str) -> Result<DbId, CoreError> {
    value.ok_or_else(|| CoreError::Validation(message.to_string()))
}

/// Require a strictly positive count. Missing and unparseable values are
/// treated like zero.
pub fn require_positive(value: Option<i64>, message: &str) -> Result<i64, CoreError> {
    match value {
        Some(n) if n > 0 => Ok(n),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Naive formats accepted in addition to RFC 3339. All are taken as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a user-supplied timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`), naive date-times and plain
/// dates (`2024-01-01`, read as midnight UTC).
pub fn parse_timestamp(field: &str, raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();

    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(CoreError::Validation(format!(
        "{field} must be an ISO-8601 date or date-time, got '{raw}'"
    )))
}

/// Parse an optional timestamp where an empty string means "not supplied".
pub fn parse_optional_timestamp(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<Timestamp>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(field, value).map(Some),
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Deserialize an integer that may be sent as a JSON number or a numeric
/// string. `null`, blank strings and non-numeric strings become `None` so
/// the caller can report a domain-specific validation message.
pub fn loose_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LooseIntVisitor;

    impl<'de> Visitor<'de> for LooseIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(i64::try_from(v).ok())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                Ok(Some(v as i64))
            } else {
                Ok(None)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse::<i64>().ok())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(LooseIntVisitor)
        }
    }

    deserializer.deserialize_any(LooseIntVisitor)
}

/// Distinguish an absent field from one explicitly set (possibly to `null`).
///
/// Use together with `#[serde(default)]`: absent → `None`, `null` →
/// `Some(None)`, value → `Some(Some(value))`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
