//! Route definitions for the admin surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin_cla;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin claim.
///
/// ```text
/// GET    /cla          -> list
/// POST   /cla          -> create
/// GET    /cla/link     -> list_links
/// POST   /cla/link     -> create_links
/// GET    /cla/{id}     -> get_by_id
/// PUT    /cla/{id}     -> update
/// DELETE /cla/{id}     -> delete
/// ```
///
/// `/cla/link` is registered before `/cla/{id}` so the literal segment wins.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cla", get(admin_cla::list).post(admin_cla::create))
        .route(
            "/cla/link",
            get(admin_cla::list_links).post(admin_cla::create_links),
        )
        .route(
            "/cla/{id}",
            get(admin_cla::get_by_id)
                .put(admin_cla::update)
                .delete(admin_cla::delete),
        )
}
