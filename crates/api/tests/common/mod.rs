#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use clockcheck_api::config::{LogFormat, ServerConfig};
use clockcheck_api::router::build_app_router;
use clockcheck_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: PathBuf::from(":memory:"),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router, with the same middleware stack as
/// production, on top of the given pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: SqlitePool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a request whose body is sent verbatim as JSON content.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a contact → property → clock chain, returning the three ids.
pub async fn seed_clock(pool: &SqlitePool, address: &str) -> (i64, i64, i64) {
    let contact = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/contacts",
            serde_json::json!({"name": format!("Owner of {address}")}),
        )
        .await,
    )
    .await;
    let contact_id = contact["id"].as_i64().unwrap();

    let property = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/properties",
            serde_json::json!({"contactId": contact_id, "name": "Site", "address": address}),
        )
        .await,
    )
    .await;
    let property_id = property["id"].as_i64().unwrap();

    let clock = body_json(
        post_json(
            build_test_app(pool.clone()),
            "/api/clocks",
            serde_json::json!({"propertyId": property_id, "label": "Zone A", "stationCount": 8}),
        )
        .await,
    )
    .await;
    (contact_id, property_id, clock["id"].as_i64().unwrap())
}
