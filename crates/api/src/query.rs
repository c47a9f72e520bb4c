//! Query parameter types for the list endpoints.
//!
//! Values arrive as raw strings so a malformed filter can be reported with
//! the same JSON error shape as any other validation failure. An empty value
//! means "no filter".

use clockcheck_core::error::CoreError;
use clockcheck_core::inspection::{validate_status, InspectionStatus};
use clockcheck_core::types::DbId;
use clockcheck_db::models::inspection::InspectionFilter;
use serde::Deserialize;

/// `GET /api/properties?contactId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListParams {
    pub contact_id: Option<String>,
}

/// `GET /api/clocks?propertyId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockListParams {
    pub property_id: Option<String>,
}

/// `GET /api/inspections?clockId=&status=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionListParams {
    pub clock_id: Option<String>,
    pub status: Option<String>,
}

impl PropertyListParams {
    pub fn contact_id(&self) -> Result<Option<DbId>, CoreError> {
        parse_id_filter("contactId", self.contact_id.as_deref())
    }
}

impl ClockListParams {
    pub fn property_id(&self) -> Result<Option<DbId>, CoreError> {
        parse_id_filter("propertyId", self.property_id.as_deref())
    }
}

impl InspectionListParams {
    pub fn filter(&self) -> Result<InspectionFilter, CoreError> {
        let status: Option<InspectionStatus> = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(validate_status(raw)?),
        };
        Ok(InspectionFilter {
            clock_id: parse_id_filter("clockId", self.clock_id.as_deref())?,
            status,
        })
    }
}

fn parse_id_filter(name: &str, raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<DbId>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("Invalid {name} filter."))),
    }
}
