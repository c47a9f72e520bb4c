//! Clock (irrigation controller) entity model and DTOs.

use clockcheck_core::error::CoreError;
use clockcheck_core::types::{DbId, Timestamp};
use clockcheck_core::validation::{
    loose_int, normalize_text, require_id, require_positive, require_text,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `clocks` row joined with its property and the property's contact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Clock {
    pub id: DbId,
    pub property_id: DbId,
    pub label: String,
    pub manufacturer: String,
    pub model: String,
    pub station_count: i64,
    pub location: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(rename = "propertyAddress")]
    pub property_address: String,
    #[serde(rename = "contactName")]
    pub contact_name: String,
}

/// Request body for creating or fully replacing a clock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInput {
    #[serde(default, deserialize_with = "loose_int")]
    pub property_id: Option<DbId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "loose_int")]
    pub station_count: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Trimmed, validated clock columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFields {
    pub property_id: DbId,
    pub label: String,
    pub manufacturer: String,
    pub model: String,
    pub station_count: i64,
    pub location: String,
    pub notes: String,
}

impl ClockInput {
    pub fn validate(self) -> Result<ClockFields, CoreError> {
        Ok(ClockFields {
            property_id: require_id(
                self.property_id,
                "A valid property is required for each clock.",
            )?,
            label: require_text(self.label, "Clock label is required.")?,
            manufacturer: normalize_text(self.manufacturer),
            model: normalize_text(self.model),
            station_count: require_positive(
                self.station_count,
                "Station count must be a positive number.",
            )?,
            location: normalize_text(self.location),
            notes: normalize_text(self.notes),
        })
    }
}
