use std::sync::Arc;

use clasign_github::GitHubApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: clasign_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// GitHub REST client (OAuth, identity, commit statuses, webhooks).
    pub github: Arc<GitHubApi>,
}
