//! Route definitions for GitHub OAuth login.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// GET /github             -> authorize (public)
/// GET /github/callback    -> callback (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/github", get(auth::authorize))
        .route("/github/callback", get(auth::callback))
}
