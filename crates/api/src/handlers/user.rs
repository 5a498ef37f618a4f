//! Handlers for the authenticated user's own resources.

use axum::extract::State;
use axum::Json;
use clasign_core::error::CoreError;
use clasign_db::models::user::User;
use clasign_db::repositories::user_repo::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user
pub async fn current(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        }))?;
    Ok(Json(user))
}

/// GET /api/v1/user/organizations
///
/// The caller's GitHub organizations, for the corporate sign form.
pub async fn organizations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        }))?;

    let token = user.access_token.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("No GitHub token on record".into()))
    })?;

    let organizations = state.github.organizations(token).await?;
    Ok(Json(DataResponse {
        data: organizations,
    }))
}
