//! Shared harness for API integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use signquest_api::config::ServerConfig;
use signquest_api::engine::leaderboard::LeaderboardCache;
use signquest_api::routes;
use signquest_api::state::AppState;
use signquest_core::types::DbId;

/// Shared secret the test config uses for the jobs endpoint.
pub const TEST_CRON_SECRET: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cron_secret: Some(TEST_CRON_SECRET.to_string()),
        leaderboard_ttl_secs: 300,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the default test config.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`], with a caller-supplied config.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let leaderboard = Arc::new(LeaderboardCache::new(Duration::from_secs(
        config.leaderboard_ttl_secs,
    )));

    let state = AppState {
        pool,
        config: Arc::new(config),
        leaderboard,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Insert a bare user and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO users (username, email) VALUES ($1, $1 || '@example.com') RETURNING id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("failed to insert test user");
    row.0
}

/// Fetch a user's `(points, xp)` totals.
pub async fn user_totals(pool: &PgPool, user_id: DbId) -> (i32, i32) {
    sqlx::query_as("SELECT points, xp FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("failed to fetch user totals")
}

/// Issue an unauthenticated GET request.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a GET request with the gateway identity header.
pub async fn get_as(app: Router, path: &str, user_id: DbId) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .header("x-user-id", user_id.to_string())
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with the gateway identity header and an optional
/// JSON body.
pub async fn post_as(
    app: Router,
    path: &str,
    user_id: DbId,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header("x-user-id", user_id.to_string());

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

/// Issue an unauthenticated POST request.
pub async fn post(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}
