//! Property entity model and DTOs.

use clockcheck_core::error::CoreError;
use clockcheck_core::types::{DbId, Timestamp};
use clockcheck_core::validation::{loose_int, normalize_text, require_id, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `properties` row joined with its owning contact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub contact_id: DbId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(rename = "contactName")]
    pub contact_name: String,
    #[serde(rename = "contactPhone")]
    pub contact_phone: String,
    #[serde(rename = "contactEmail")]
    pub contact_email: String,
    #[serde(rename = "contactOrganization")]
    pub contact_organization: String,
}

/// Request body for creating or fully replacing a property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    #[serde(default, deserialize_with = "loose_int")]
    pub contact_id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Trimmed, validated property columns. The contact's existence is checked
/// separately against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFields {
    pub contact_id: DbId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub notes: String,
}

impl PropertyInput {
    pub fn validate(self) -> Result<PropertyFields, CoreError> {
        Ok(PropertyFields {
            contact_id: require_id(
                self.contact_id,
                "A valid contact is required for each property.",
            )?,
            name: require_text(self.name, "Property name is required.")?,
            address: require_text(self.address, "Property address is required.")?,
            city: normalize_text(self.city),
            state: normalize_text(self.state),
            postal_code: normalize_text(self.postal_code),
            notes: normalize_text(self.notes),
        })
    }
}
