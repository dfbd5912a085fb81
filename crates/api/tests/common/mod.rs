#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use filegate_core::expiry::Expiry;
use filegate_core::store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use filegate_api::auth::jwt::JwtConfig;
use filegate_api::config::ServerConfig;
use filegate_api::router::build_app_router;
use filegate_api::state::AppState;

pub const USER_AGENT: &str = "integration-test/1.0";

/// Build a test `ServerConfig` with safe defaults and long, distinct secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_sweep_interval_secs: 3600,
        jwt: JwtConfig {
            access_secret: "integration-access-secret-0123456789abcdef".to_string(),
            refresh_secret: "integration-refresh-secret-0123456789abcdef".to_string(),
            access_expiry: Expiry::access_default(),
            refresh_expiry: Expiry::refresh_default(),
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. The store is returned for direct inspection.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(config.clone(), store.clone(), store.clone());
    (build_app_router(state, &config), store)
}

/// Send a request and return the status plus the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("user-agent", USER_AGENT)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, access_token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {access_token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Sign up `id` with a fixed password and return the token-pair JSON.
pub async fn signup(app: &Router, id: &str) -> Value {
    let (status, json) = post_json(
        app,
        "/signup",
        serde_json::json!({ "id": id, "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {json}");
    json
}

pub async fn signin(app: &Router, id: &str) -> Value {
    let (status, json) = post_json(
        app,
        "/signin",
        serde_json::json!({ "id": id, "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signin failed: {json}");
    json
}

pub fn str_field<'a>(json: &'a Value, field: &str) -> &'a str {
    json[field]
        .as_str()
        .unwrap_or_else(|| panic!("missing string field {field} in {json}"))
}
