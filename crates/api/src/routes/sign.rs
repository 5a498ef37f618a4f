//! Route definitions for the authenticated sign pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::sign;
use crate::state::AppState;

/// Routes mounted at `/sign`. All require a Bearer session token.
///
/// ```text
/// GET  /{name}/icla    -> icla_form
/// POST /{name}/icla    -> sign_icla
/// GET  /{name}/ccla    -> ccla_form
/// POST /{name}/ccla    -> sign_ccla
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{name}/icla", get(sign::icla_form).post(sign::sign_icla))
        .route("/{name}/ccla", get(sign::ccla_form).post(sign::sign_ccla))
}
