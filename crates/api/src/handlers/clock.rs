//! Handlers for the `/clocks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clockcheck_core::error::CoreError;
use clockcheck_core::types::DbId;
use clockcheck_db::models::clock::{ClockFields, ClockInput};
use clockcheck_db::repositories::{ClockRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ClockListParams;
use crate::state::AppState;

async fn validated_fields(state: &AppState, input: ClockInput) -> AppResult<ClockFields> {
    let fields = input.validate()?;
    if !PropertyRepo::exists(&state.pool, fields.property_id).await? {
        return Err(CoreError::Validation("Selected property does not exist.".to_string()).into());
    }
    Ok(fields)
}

/// GET /api/clocks?propertyId=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ClockListParams>,
) -> AppResult<impl IntoResponse> {
    let clocks = ClockRepo::list(&state.pool, params.property_id()?).await?;
    Ok(Json(clocks))
}

/// POST /api/clocks
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ClockInput>,
) -> AppResult<impl IntoResponse> {
    let fields = validated_fields(&state, input).await?;
    let clock = ClockRepo::create(&state.pool, &fields).await?;

    tracing::info!(clock_id = clock.id, property_id = clock.property_id, "Clock created");
    Ok((StatusCode::CREATED, Json(clock)))
}

/// GET /api/clocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let clock = ClockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Clock", id))?;
    Ok(Json(clock))
}

/// PUT /api/clocks/{id}
///
/// Moving a clock to another property is allowed; its inspections follow it.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ClockInput>,
) -> AppResult<impl IntoResponse> {
    if !ClockRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Clock", id));
    }
    let fields = validated_fields(&state, input).await?;

    let clock = ClockRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::not_found("Clock", id))?;

    tracing::info!(clock_id = id, "Clock updated");
    Ok(Json(clock))
}

/// DELETE /api/clocks/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ClockRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Clock", id));
    }

    tracing::info!(clock_id = id, "Clock deleted");
    Ok(StatusCode::NO_CONTENT)
}
