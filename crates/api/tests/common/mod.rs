use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use contacto_core::validation::rules::FinalizeMode;
use http_body_util::BodyExt;
use tower::ServiceExt;

use contacto_api::config::{ContactoValidationConfig, ServerConfig};
use contacto_api::router::build_app_router;
use contacto_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and the default finalize modes (create collects, update responds).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 64 * 1024,
        contacto: ContactoValidationConfig::default(),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    build_app_with(test_config())
}

/// Build the app with both contact routes finalizing in `create` / `update` mode.
pub fn build_test_app_with_modes(create: FinalizeMode, update: FinalizeMode) -> Router {
    let mut config = test_config();
    config.contacto = ContactoValidationConfig { create, update };
    build_app_with(config)
}

fn build_app_with(config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };
    build_app_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
