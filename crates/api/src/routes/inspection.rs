//! Route definitions for inspections.

use axum::routing::get;
use axum::Router;

use crate::handlers::inspection;
use crate::state::AppState;

/// Routes mounted at `/inspections`.
///
/// ```text
/// GET    /       -> list (?clockId=&status=)
/// POST   /       -> start
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> patch
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inspection::list).post(inspection::start))
        .route(
            "/{id}",
            get(inspection::get_by_id)
                .patch(inspection::patch)
                .delete(inspection::delete),
        )
}
