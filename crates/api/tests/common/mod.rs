#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use datacontrol_api::config::{CorsOrigins, LogFormat, ServerConfig};
use datacontrol_api::router::build_app_router;
use datacontrol_api::state::AppState;

/// Test `ServerConfig` with a single allowed origin and a 30-second timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec!["http://localhost:5173".parse().unwrap()]),
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        log_format: LogFormat::Text,
    }
}

/// Build the application router exactly as `main.rs` does, on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState { pool }, &test_config())
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_body(method: Method, uri: &str, content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

fn without_body(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, without_body(Method::GET, uri)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, without_body(Method::PATCH, uri)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, without_body(Method::DELETE, uri)).await
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    send(
        app,
        with_body(Method::POST, uri, "application/json", body.to_string()),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    send(
        app,
        with_body(Method::PUT, uri, "application/json", body.to_string()),
    )
    .await
}

/// POST an already-encoded `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        with_body(
            Method::POST,
            uri,
            "application/x-www-form-urlencoded",
            body.to_string(),
        ),
    )
    .await
}

/// POST raw bytes with an explicit content type.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    send(
        app,
        with_body(Method::POST, uri, content_type, body.to_string()),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
