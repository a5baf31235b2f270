//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as production
//! via `build_app_router`) on top of an `#[sqlx::test]`-provided pool, and
//! provides small request/seeding helpers so individual tests stay readable.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use harvestlog_api::auth::jwt::{generate_access_token, JwtConfig};
use harvestlog_api::config::ServerConfig;
use harvestlog_api::router::build_app_router;
use harvestlog_api::state::AppState;
use harvestlog_core::types::DbId;
use harvestlog_db::models::plant::CreatePlant;
use harvestlog_db::models::user::CreateUser;
use harvestlog_db::repositories::{PlantRepo, UserRepo};

/// Signing secret shared by the test app and the tokens the tests mint.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Multipart boundary used by [`post_csv`].
const BOUNDARY: &str = "harvestlog-test-boundary";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a valid Bearer token for the given user id.
pub fn auth_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation")
}

// ── Seeding ──────────────────────────────────────────────────────────

/// Insert a user row and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: "Test Gardener".to_string(),
        },
    )
    .await
    .expect("seed user")
    .id
}

/// Insert a plant owned by `owner_id` and return its id.
pub async fn seed_plant(pool: &PgPool, owner_id: DbId, name: &str, emoji: &str) -> DbId {
    PlantRepo::create(
        pool,
        owner_id,
        &CreatePlant {
            name: name.to_string(),
            emoji: emoji.to_string(),
        },
    )
    .await
    .expect("seed plant")
    .id
}

// ── Requests ─────────────────────────────────────────────────────────

/// Send a GET request, optionally authenticated.
pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).expect("request");
    app.oneshot(request).await.expect("response")
}

/// Send a POST request with a JSON body, optionally authenticated.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Send a POST request with a single-file multipart body, optionally
/// authenticated. `content_type` is the declared type of the file part.
pub async fn post_csv(
    app: Router,
    uri: &str,
    token: Option<&str>,
    file_name: &str,
    content_type: &str,
    data: &str,
) -> Response {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {data}\r\n\
         --{BOUNDARY}--\r\n"
    );

    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).expect("request");
    app.oneshot(request).await.expect("response")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as a UTF-8 string.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be valid UTF-8")
}
