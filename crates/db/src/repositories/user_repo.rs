//! Repository for the `users` table.

use clasign_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, github_login, name, avatar_url, emails, access_token, \
                       is_admin, created_at, updated_at";

/// Provides persistence for GitHub-authenticated users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user, or refresh an existing row for the same GitHub login.
    ///
    /// Called on every OAuth callback, so the stored profile, email set,
    /// and access token track GitHub's current state.
    pub async fn upsert(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (github_login, name, avatar_url, emails, access_token, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (github_login) DO UPDATE SET
                name = EXCLUDED.name,
                avatar_url = EXCLUDED.avatar_url,
                emails = EXCLUDED.emails,
                access_token = EXCLUDED.access_token,
                is_admin = EXCLUDED.is_admin,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.github_login)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(&input.emails)
            .bind(&input.access_token)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by GitHub login.
    pub async fn find_by_github_login(
        pool: &PgPool,
        github_login: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE github_login = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(github_login)
            .fetch_optional(pool)
            .await
    }
}
