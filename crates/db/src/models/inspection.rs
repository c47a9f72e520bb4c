//! Inspection entity model and DTOs.
//!
//! Inspections are started with [`StartInspection`] and afterwards only
//! changed through partial [`PatchInspection`] bodies.

use clockcheck_core::error::CoreError;
use clockcheck_core::inspection::{validate_status, InspectionStatus};
use clockcheck_core::types::{DbId, Timestamp};
use clockcheck_core::validation::{
    loose_int, normalize_text, parse_optional_timestamp, present, require_id,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An `inspections` row joined with its clock, property and contact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub clock_id: DbId,
    pub status: String,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub summary: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(rename = "clockLabel")]
    pub clock_label: String,
    pub property_id: DbId,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(rename = "propertyAddress")]
    pub property_address: String,
    #[serde(rename = "contactName")]
    pub contact_name: String,
}

impl Inspection {
    /// Parsed lifecycle status. The column is CHECK-constrained, so a parse
    /// failure means the database was modified outside this application.
    pub fn lifecycle_status(&self) -> Result<InspectionStatus, CoreError> {
        self.status.parse().map_err(|_| {
            CoreError::Internal(format!(
                "inspection {} has unknown status '{}'",
                self.id, self.status
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Start
// ---------------------------------------------------------------------------

/// Request body for starting an inspection on a clock.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInspection {
    #[serde(default, deserialize_with = "loose_int")]
    pub clock_id: Option<DbId>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated values for a new inspection. The status is always
/// `in_progress`; `started_at` falls back to the current time when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInspection {
    pub clock_id: DbId,
    pub started_at: Option<Timestamp>,
    pub summary: String,
    pub notes: String,
}

impl StartInspection {
    pub fn validate(self) -> Result<NewInspection, CoreError> {
        Ok(NewInspection {
            clock_id: require_id(
                self.clock_id,
                "A valid clock is required for each inspection.",
            )?,
            started_at: parse_optional_timestamp("startedAt", self.started_at.as_deref())?,
            summary: normalize_text(self.summary),
            notes: normalize_text(self.notes),
        })
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// Partial update body. Each field distinguishes "absent" from "present":
/// only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchInspection {
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub started_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed_at: Option<Option<String>>,
}

/// Validated column changes. `None` keeps the stored value.
///
/// Empty `startedAt`/`completedAt` strings validate to `None`, so they never
/// clear a stored timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionChanges {
    pub status: Option<InspectionStatus>,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl PatchInspection {
    fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.summary.is_none()
            && self.notes.is_none()
            && self.started_at.is_none()
            && self.completed_at.is_none()
    }

    pub fn validate(self) -> Result<InspectionChanges, CoreError> {
        if self.is_empty() {
            return Err(CoreError::Validation(
                "No changes provided for the inspection.".to_string(),
            ));
        }

        let status = self
            .status
            .map(|s| validate_status(s.as_deref().unwrap_or_default()))
            .transpose()?;

        Ok(InspectionChanges {
            status,
            summary: self.summary.map(normalize_text),
            notes: self.notes.map(normalize_text),
            started_at: parse_optional_timestamp("startedAt", self.started_at.flatten().as_deref())?,
            completed_at: parse_optional_timestamp(
                "completedAt",
                self.completed_at.flatten().as_deref(),
            )?,
        })
    }
}

impl InspectionChanges {
    /// Status and completion time the record will have once these changes
    /// are applied to `current`.
    pub fn resulting_state(
        &self,
        current: &Inspection,
    ) -> Result<(InspectionStatus, Option<Timestamp>), CoreError> {
        let status = match self.status {
            Some(status) => status,
            None => current.lifecycle_status()?,
        };
        Ok((status, self.completed_at.or(current.completed_at)))
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Optional filters for listing inspections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InspectionFilter {
    pub clock_id: Option<DbId>,
    pub status: Option<InspectionStatus>,
}
