//! Integration tests for the GitHub REST client against a mock server.

use clasign_github::api::GitHubApi;
use clasign_github::oauth::OAuthConfig;
use clasign_github::types::{CommitState, CommitStatus};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a client whose web and API base URLs both point at the mock server.
fn client_for(server: &MockServer) -> GitHubApi {
    GitHubApi::new(OAuthConfig {
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
        service_token: "service-token".into(),
        web_base_url: server.uri(),
        api_base_url: server.uri(),
    })
}

#[tokio::test]
async fn test_exchange_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(body_partial_json(serde_json::json!({
            "client_id": "client-id",
            "code": "the-code",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "gho_token",
            "token_type": "bearer",
        })))
        .mount(&server)
        .await;

    let token = client_for(&server)
        .exchange_code("the-code")
        .await
        .expect("exchange should succeed");
    assert_eq!(token, "gho_token");
}

#[tokio::test]
async fn test_exchange_code_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired.",
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .exchange_code("expired")
        .await
        .expect_err("exchange must fail");
    assert!(err.to_string().contains("incorrect or expired"));
}

#[tokio::test]
async fn test_current_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "octocat",
            "name": "The Octocat",
            "avatar_url": "https://avatars.example.com/octocat",
        })))
        .mount(&server)
        .await;

    let user = client_for(&server)
        .current_user("user-token")
        .await
        .expect("request should succeed");
    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
}

#[tokio::test]
async fn test_verified_emails_filters_and_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "email": "old@example.com", "verified": false, "primary": false },
            { "email": "alt@example.com", "verified": true, "primary": false },
            { "email": "main@example.com", "verified": true, "primary": true },
        ])))
        .mount(&server)
        .await;

    let emails = client_for(&server)
        .verified_emails("user-token")
        .await
        .expect("request should succeed");
    assert_eq!(emails, vec!["main@example.com", "alt@example.com"]);
}

#[tokio::test]
async fn test_organizations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/orgs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "login": "acme" },
            { "login": "widgets-inc" },
        ])))
        .mount(&server)
        .await;

    let orgs = client_for(&server)
        .organizations("user-token")
        .await
        .expect("request should succeed");
    assert_eq!(orgs, vec!["acme", "widgets-inc"]);
}

#[tokio::test]
async fn test_pull_request_head_sha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/pulls/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": 42,
            "head": { "sha": "abc123" },
        })))
        .mount(&server)
        .await;

    let sha = client_for(&server)
        .pull_request_head_sha("user-token", "octo/widgets", 42)
        .await
        .expect("request should succeed");
    assert_eq!(sha, "abc123");
}

#[tokio::test]
async fn test_create_commit_status_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/statuses/abc123"))
        .and(body_partial_json(serde_json::json!({
            "state": "success",
            "context": "license/cla",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let status = CommitStatus {
        state: CommitState::Success,
        target_url: "https://cla.example.com/sign/apache/icla".into(),
        description: "Contributor License Agreement is signed.".into(),
        context: "license/cla".into(),
    };

    client_for(&server)
        .create_commit_status("repo-token", "octo/widgets", "abc123", &status)
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .current_user("bad-token")
        .await
        .expect_err("request must fail");
    let message = err.to_string();
    assert!(message.contains("401"), "got: {message}");
    assert!(message.contains("Bad credentials"), "got: {message}");
}

#[tokio::test]
async fn test_create_pull_request_hook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/hooks"))
        .and(body_partial_json(serde_json::json!({
            "events": ["pull_request"],
            "config": { "url": "https://cla.example.com/github/hooks/pull_request/apache" },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .create_pull_request_hook(
            "service-token",
            "octo/widgets",
            "https://cla.example.com/github/hooks/pull_request/apache",
            "hook-secret",
        )
        .await
        .expect("request should succeed");
}
