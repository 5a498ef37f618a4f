//! User entity model and DTOs.

use clasign_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// The access token is the user's GitHub OAuth token; it is never
/// serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub github_login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub emails: Vec<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or refreshing a user row at OAuth login.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub github_login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub emails: Vec<String>,
    pub access_token: String,
    pub is_admin: bool,
}
