//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the full production router through `tower::ServiceExt`
//! without a TCP listener. Outbound GitHub calls are pointed at a wiremock
//! server via the configurable base URLs.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use clasign_db::models::user::{UpsertUser, User};
use clasign_db::repositories::user_repo::UserRepo;
use clasign_github::{GitHubApi, OAuthConfig};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clasign_api::auth::jwt::{generate_session_token, JwtConfig};
use clasign_api::config::ServerConfig;
use clasign_api::router::build_app_router;
use clasign_api::state::AppState;

/// Webhook secret shared by tests that exercise the hook endpoint.
pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

/// Service account token the test config carries.
pub const TEST_SERVICE_TOKEN: &str = "service-token";

/// Build a test `ServerConfig` with safe defaults, pointing both GitHub
/// base URLs at `github_base` (a wiremock server, typically).
pub fn test_config(github_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        base_url: "http://localhost:3000".to_string(),
        admin_logins: vec!["admin-login".to_string()],
        webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            session_expiry_mins: 60,
        },
        oauth: OAuthConfig {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            service_token: TEST_SERVICE_TOKEN.to_string(),
            web_base_url: github_base.to_string(),
            api_base_url: github_base.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and GitHub base URL.
///
/// Uses the same [`build_app_router`] as `main.rs` so tests exercise the
/// production middleware stack.
pub fn build_test_app(pool: PgPool, github_base: &str) -> Router {
    let config = test_config(github_base);
    let github = Arc::new(GitHubApi::new(config.oauth.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        github,
    };

    build_app_router(state, &config)
}

/// Insert a user row and return it together with a valid session token.
pub async fn seed_user(
    pool: &PgPool,
    login: &str,
    emails: &[&str],
    is_admin: bool,
) -> (User, String) {
    let user = UserRepo::upsert(
        pool,
        &UpsertUser {
            github_login: login.to_string(),
            name: Some("Test User".to_string()),
            avatar_url: None,
            emails: emails.iter().map(|e| e.to_string()).collect(),
            access_token: format!("gh-token-{login}"),
            is_admin,
        },
    )
    .await
    .expect("failed to seed user");

    let config = test_config("http://unused.invalid");
    let token = generate_session_token(user.id, login, is_admin, &config.jwt)
        .expect("failed to sign session token");

    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a raw POST body with extra headers (for webhook payloads).
pub async fn post_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}
