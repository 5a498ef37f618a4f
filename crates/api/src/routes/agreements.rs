//! Route definitions for the public agreement views.

use axum::routing::get;
use axum::Router;

use crate::handlers::agreements;
use crate::state::AppState;

/// Routes mounted at `/cla`.
///
/// ```text
/// GET /{name}/icla    -> view_icla (public)
/// GET /{name}/ccla    -> view_ccla (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{name}/icla", get(agreements::view_icla))
        .route("/{name}/ccla", get(agreements::view_ccla))
}
