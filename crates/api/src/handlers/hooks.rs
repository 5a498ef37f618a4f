//! GitHub webhook receiver for pull request events.
//!
//! The payload must carry a valid `X-Hub-Signature-256` HMAC computed with
//! the shared webhook secret; anything else is rejected before parsing.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use clasign_core::error::CoreError;
use clasign_db::repositories::user_repo::UserRepo;
use clasign_github::types::PullRequestEvent;
use clasign_github::webhook::{verify_signature, SIGNATURE_HEADER};

use crate::cla::{self, Contributor};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Actions that change the head commit or (re)open the pull request, and so
/// need a fresh commit status.
const STATUS_ACTIONS: &[&str] = &["opened", "reopened", "synchronize"];

/// POST /github/hooks/pull_request/{name}
pub async fn pull_request(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing webhook signature".into()))
        })?;

    if !verify_signature(&state.config.webhook_secret, &body, signature) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }

    let event: PullRequestEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid pull request payload: {e}")))?;

    if !STATUS_ACTIONS.contains(&event.action.as_str()) {
        tracing::debug!(action = %event.action, "Ignoring pull request action");
        return Ok(StatusCode::OK);
    }

    // The PR author may never have logged in here. A stored user row adds
    // verified emails and an org-capable token to the check; without one the
    // login alone decides.
    let author_login = &event.pull_request.user.login;
    let contributor = match UserRepo::find_by_github_login(&state.pool, author_login).await? {
        Some(user) => Contributor {
            github_login: user.github_login,
            emails: user.emails,
            access_token: user.access_token,
        },
        None => Contributor {
            github_login: author_login.clone(),
            emails: Vec::new(),
            access_token: None,
        },
    };

    let signed = cla::is_signed(&state, &name, &contributor).await?;

    cla::save_pull_request_status(
        &state,
        &name,
        &event.repository.full_name,
        event.pull_request.number,
        &event.pull_request.head.sha,
        signed,
    )
    .await?;

    Ok(StatusCode::OK)
}
