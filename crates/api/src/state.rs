use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool (a single serialized connection).
    pub pool: clockcheck_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
