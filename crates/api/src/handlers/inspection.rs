//! Handlers for the `/inspections` resource.
//!
//! Inspections are started against a clock and then moved through their
//! lifecycle with partial updates. A clock never has more than one
//! `in_progress` inspection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clockcheck_core::error::CoreError;
use clockcheck_core::inspection::{validate_completion, ACTIVE_INSPECTION_CONFLICT};
use clockcheck_core::types::DbId;
use clockcheck_db::models::inspection::{PatchInspection, StartInspection};
use clockcheck_db::repositories::{ClockRepo, InspectionRepo};

use crate::error::{conflict_on_unique, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::InspectionListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/inspections?clockId=&status=
///
/// Most recently started first.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<InspectionListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter()?;
    let inspections = InspectionRepo::list(&state.pool, &filter).await?;
    Ok(Json(inspections))
}

/// POST /api/inspections
///
/// Start a new `in_progress` inspection. Returns 409 if the clock already
/// has one.
pub async fn start(
    State(state): State<AppState>,
    AppJson(input): AppJson<StartInspection>,
) -> AppResult<impl IntoResponse> {
    let new = input.validate()?;
    if !ClockRepo::exists(&state.pool, new.clock_id).await? {
        return Err(CoreError::Validation("Selected clock does not exist.".to_string()).into());
    }

    let inspection = InspectionRepo::start(&state.pool, &new)
        .await
        .map_err(conflict_on_unique(ACTIVE_INSPECTION_CONFLICT))?
        .ok_or_else(|| CoreError::Conflict(ACTIVE_INSPECTION_CONFLICT.to_string()))?;

    tracing::info!(
        inspection_id = inspection.id,
        clock_id = inspection.clock_id,
        "Inspection started"
    );
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// GET /api/inspections/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let inspection = InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Inspection", id))?;
    Ok(Json(inspection))
}

/// PATCH /api/inspections/{id}
///
/// Only the fields present in the body change. Reopening an inspection
/// while another one on the same clock is in progress is a 409.
pub async fn patch(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<PatchInspection>,
) -> AppResult<impl IntoResponse> {
    let current = InspectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Inspection", id))?;

    let changes = input.validate()?;
    let (status, completed_at) = changes.resulting_state(&current)?;
    validate_completion(status, completed_at)?;

    let inspection = InspectionRepo::patch(&state.pool, id, &changes)
        .await
        .map_err(conflict_on_unique(ACTIVE_INSPECTION_CONFLICT))?
        .ok_or(AppError::not_found("Inspection", id))?;

    tracing::info!(inspection_id = id, status = %inspection.status, "Inspection updated");
    Ok(Json(inspection))
}

/// DELETE /api/inspections/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !InspectionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Inspection", id));
    }

    tracing::info!(inspection_id = id, "Inspection deleted");
    Ok(StatusCode::NO_CONTENT)
}
