//! Contact entity model and DTOs.

use clockcheck_core::error::CoreError;
use clockcheck_core::types::{DbId, Timestamp};
use clockcheck_core::validation::{normalize_text, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or fully replacing a contact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// Trimmed, validated contact columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
}

impl ContactInput {
    pub fn validate(self) -> Result<ContactFields, CoreError> {
        Ok(ContactFields {
            name: require_text(self.name, "Contact name is required.")?,
            phone: normalize_text(self.phone),
            email: normalize_text(self.email),
            organization: normalize_text(self.organization),
        })
    }
}
