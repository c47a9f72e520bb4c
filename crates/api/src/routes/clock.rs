//! Route definitions for clocks.

use axum::routing::get;
use axum::Router;

use crate::handlers::clock;
use crate::state::AppState;

/// Routes mounted at `/clocks`.
///
/// ```text
/// GET    /       -> list (?propertyId=)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clock::list).post(clock::create))
        .route(
            "/{id}",
            get(clock::get_by_id).put(clock::update).delete(clock::delete),
        )
}
