pub mod clock;
pub mod contact;
pub mod health;
pub mod inspection;
pub mod property;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /contacts                  list, create
/// /contacts/{id}             get, replace, delete
///
/// /properties?contactId=     list, create
/// /properties/{id}           get, replace, delete
///
/// /clocks?propertyId=        list, create
/// /clocks/{id}               get, replace, delete
///
/// /inspections?clockId=&status=   list, start
/// /inspections/{id}               get, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/contacts", contact::router())
        .nest("/properties", property::router())
        .nest("/clocks", clock::router())
        .nest("/inspections", inspection::router())
}
