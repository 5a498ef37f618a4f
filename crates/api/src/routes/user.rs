//! Route definitions for the authenticated user's own resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`. All require a Bearer session token.
///
/// ```text
/// GET /                 -> current
/// GET /organizations    -> organizations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::current))
        .route("/organizations", get(user::organizations))
}
