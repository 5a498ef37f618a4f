//! GitHub OAuth login handlers.
//!
//! There is no password login. `GET /auth/github` hands the client the
//! GitHub authorize URL with a signed `state` token; the callback exchanges
//! the code for a GitHub access token, pulls the user's profile and verified
//! emails, upserts the user row, and issues the application's own session
//! JWT.

use axum::extract::{Query, State};
use axum::Json;
use clasign_core::error::CoreError;
use clasign_db::models::user::{UpsertUser, User};
use clasign_db::repositories::user_repo::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_session_token, generate_state_token, validate_state_token};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response of `GET /auth/github`.
#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    /// The GitHub authorization URL the client should redirect to.
    pub authorize_url: String,
}

/// Query parameters of the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

/// Response of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

/// The redirect URI registered with the GitHub OAuth application.
fn callback_url(base_url: &str) -> String {
    format!("{base_url}/api/v1/auth/github/callback")
}

/// GET /api/v1/auth/github
pub async fn authorize(State(state): State<AppState>) -> AppResult<Json<AuthorizeResponse>> {
    let state_token = generate_state_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign state token: {e}")))?;

    let authorize_url = state
        .config
        .oauth
        .authorize_url(&state_token, &callback_url(&state.config.base_url));

    Ok(Json(AuthorizeResponse { authorize_url }))
}

/// GET /api/v1/auth/github/callback?code=&state=
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Json<LoginResponse>> {
    validate_state_token(&query.state, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired OAuth state".into(),
        ))
    })?;

    let github_token = state.github.exchange_code(&query.code).await?;
    let profile = state.github.current_user(&github_token).await?;
    let emails = state.github.verified_emails(&github_token).await?;

    let is_admin = state
        .config
        .admin_logins
        .iter()
        .any(|login| login == &profile.login);

    let user = UserRepo::upsert(
        &state.pool,
        &UpsertUser {
            github_login: profile.login,
            name: profile.name,
            avatar_url: profile.avatar_url,
            emails,
            access_token: github_token,
            is_admin,
        },
    )
    .await?;

    let access_token = generate_session_token(user.id, &user.github_login, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign session token: {e}")))?;

    tracing::info!(login = %user.github_login, is_admin = user.is_admin, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        user,
    }))
}
