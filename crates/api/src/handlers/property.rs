//! Handlers for the `/properties` resource.
//!
//! A property belongs to exactly one contact and its address is unique
//! across all properties.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clockcheck_core::error::CoreError;
use clockcheck_core::types::DbId;
use clockcheck_db::models::property::{PropertyFields, PropertyInput};
use clockcheck_db::repositories::{ContactRepo, PropertyRepo};

use crate::error::{conflict_on_unique, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::PropertyListParams;
use crate::state::AppState;

const DUPLICATE_ADDRESS: &str = "Another property already uses that address.";

/// Validate the body and make sure the referenced contact exists.
async fn validated_fields(state: &AppState, input: PropertyInput) -> AppResult<PropertyFields> {
    let fields = input.validate()?;
    if !ContactRepo::exists(&state.pool, fields.contact_id).await? {
        return Err(CoreError::Validation("Selected contact does not exist.".to_string()).into());
    }
    Ok(fields)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/properties?contactId=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PropertyListParams>,
) -> AppResult<impl IntoResponse> {
    let properties = PropertyRepo::list(&state.pool, params.contact_id()?).await?;
    Ok(Json(properties))
}

/// POST /api/properties
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<PropertyInput>,
) -> AppResult<impl IntoResponse> {
    let fields = validated_fields(&state, input).await?;
    let property = PropertyRepo::create(&state.pool, &fields)
        .await
        .map_err(conflict_on_unique(DUPLICATE_ADDRESS))?;

    tracing::info!(
        property_id = property.id,
        contact_id = property.contact_id,
        "Property created"
    );
    Ok((StatusCode::CREATED, Json(property)))
}

/// GET /api/properties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Property", id))?;
    Ok(Json(property))
}

/// PUT /api/properties/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<PropertyInput>,
) -> AppResult<impl IntoResponse> {
    if !PropertyRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Property", id));
    }
    let fields = validated_fields(&state, input).await?;

    let property = PropertyRepo::update(&state.pool, id, &fields)
        .await
        .map_err(conflict_on_unique(DUPLICATE_ADDRESS))?
        .ok_or(AppError::not_found("Property", id))?;

    tracing::info!(property_id = id, "Property updated");
    Ok(Json(property))
}

/// DELETE /api/properties/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !PropertyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Property", id));
    }

    tracing::info!(property_id = id, "Property deleted");
    Ok(StatusCode::NO_CONTENT)
}
