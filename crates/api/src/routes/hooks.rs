//! Route definitions for the GitHub webhook receiver.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// Routes mounted at the root level (NOT under `/api/v1`); GitHub delivers
/// webhooks to the URL registered at link time.
///
/// ```text
/// POST /github/hooks/pull_request/{name}    -> pull_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/github/hooks/pull_request/{name}", post(hooks::pull_request))
}
