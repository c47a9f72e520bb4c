//! Handlers for the `/contacts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clockcheck_core::types::DbId;
use clockcheck_db::models::contact::ContactInput;
use clockcheck_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/contacts
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(contacts))
}

/// POST /api/contacts
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<ContactInput>,
) -> AppResult<impl IntoResponse> {
    let fields = input.validate()?;
    let contact = ContactRepo::create(&state.pool, &fields).await?;

    tracing::info!(contact_id = contact.id, "Contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Contact", id))?;
    Ok(Json(contact))
}

/// PUT /api/contacts/{id}
///
/// Replaces every editable field. Omitted optional fields become empty.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ContactInput>,
) -> AppResult<impl IntoResponse> {
    if !ContactRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Contact", id));
    }
    let fields = input.validate()?;

    let contact = ContactRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::not_found("Contact", id))?;

    tracing::info!(contact_id = id, "Contact updated");
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
///
/// Cascades to the contact's properties, their clocks and inspections.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Contact", id));
    }

    tracing::info!(contact_id = id, "Contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
