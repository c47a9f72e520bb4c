//! Inspection lifecycle.
//!
//! An inspection starts `in_progress` and ends in one of the terminal states
//! `completed`, `archived` or `cancelled`. A clock may have at most one
//! `in_progress` inspection at a time; the store enforces that with a
//! partial unique index, and the start operation checks it atomically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_ARCHIVED: &str = "archived";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid inspection status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_ARCHIVED,
    STATUS_CANCELLED,
];

/// Message returned when a clock already has an active inspection.
pub const ACTIVE_INSPECTION_CONFLICT: &str = "An inspection is already in progress for this clock.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    #[default]
    InProgress,
    Completed,
    Archived,
    Cancelled,
}

impl InspectionStatus {
    /// The value stored in the `inspections.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
            Self::Archived => STATUS_ARCHIVED,
            Self::Cancelled => STATUS_CANCELLED,
        }
    }

    /// Whether this inspection occupies its clock's single active slot.
    pub fn is_active(self) -> bool {
        self == Self::InProgress
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_ARCHIVED => Ok(Self::Archived),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation("Invalid inspection status.".to_string())),
        }
    }
}

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<InspectionStatus, CoreError> {
    status.parse()
}

/// Cross-field rule applied to the record an update would produce.
///
/// An inspection that is still `in_progress` cannot carry a completion
/// time. Terminal states may or may not have one (archiving and cancelling
/// never set it).
pub fn validate_completion(
    status: InspectionStatus,
    completed_at: Option<Timestamp>,
) -> Result<(), CoreError> {
    if status.is_active() && completed_at.is_some() {
        return Err(CoreError::Validation(
            "An inspection that is still in progress cannot have a completion time.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn every_valid_status_parses_and_round_trips() {
        for raw in VALID_STATUSES {
            let status = validate_status(raw).unwrap();
            assert_eq!(status.as_str(), *raw);
            assert_eq!(status.to_string(), *raw);
        }
    }

    #[test]
    fn status_parsing_trims_whitespace() {
        assert_eq!(
            validate_status(" completed ").unwrap(),
            InspectionStatus::Completed
        );
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        assert_matches!(
            validate_status("done"),
            Err(CoreError::Validation(msg)) if msg == "Invalid inspection status."
        );
        assert_matches!(validate_status(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_status("IN_PROGRESS"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_in_progress_is_active() {
        assert!(InspectionStatus::InProgress.is_active());
        assert!(InspectionStatus::Completed.is_terminal());
        assert!(InspectionStatus::Archived.is_terminal());
        assert!(InspectionStatus::Cancelled.is_terminal());
        assert_eq!(InspectionStatus::default(), InspectionStatus::InProgress);
    }

    #[test]
    fn serde_uses_stored_values() {
        let json = serde_json::to_string(&InspectionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: InspectionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, InspectionStatus::Cancelled);
    }

    #[test]
    fn completion_time_rejected_while_in_progress() {
        assert_matches!(
            validate_completion(InspectionStatus::InProgress, Some(Utc::now())),
            Err(CoreError::Validation(_))
        );
        assert!(validate_completion(InspectionStatus::InProgress, None).is_ok());
    }

    #[test]
    fn completion_time_optional_for_terminal_states() {
        assert!(validate_completion(InspectionStatus::Completed, Some(Utc::now())).is_ok());
        assert!(validate_completion(InspectionStatus::Completed, None).is_ok());
        assert!(validate_completion(InspectionStatus::Archived, None).is_ok());
        assert!(validate_completion(InspectionStatus::Cancelled, Some(Utc::now())).is_ok());
    }
}
