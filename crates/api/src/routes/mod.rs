pub mod admin;
pub mod agreements;
pub mod auth;
pub mod health;
pub mod hooks;
pub mod sign;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/github                       GitHub authorize URL (public)
/// /auth/github/callback              OAuth callback (public)
///
/// /cla/{name}/icla                   view individual agreement (public)
/// /cla/{name}/ccla                   view corporate agreement (public)
///
/// /sign/{name}/icla                  sign form / record signature (auth)
/// /sign/{name}/ccla                  corporate equivalent (auth)
///
/// /user                              current user (auth)
/// /user/organizations                caller's GitHub orgs (auth)
///
/// /admin/cla                         list, create (admin only)
/// /admin/cla/{id}                    get, update, delete
/// /admin/cla/link                    list, create repository links
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/cla", agreements::router())
        .nest("/sign", sign::router())
        .nest("/user", user::router())
        .nest("/admin", admin::router())
}
