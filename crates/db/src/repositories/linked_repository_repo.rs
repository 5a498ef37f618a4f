//! Repository for the `linked_repositories` table.

use sqlx::PgPool;

use crate::models::linked_repository::{CreateLinkedRepository, LinkedRepository};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, repository, agreement_name, access_token, created_at";

/// Provides persistence for repository-to-agreement links.
pub struct LinkedRepositoryRepo;

impl LinkedRepositoryRepo {
    /// Link a repository to an agreement, replacing any existing link for
    /// the same repository.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateLinkedRepository,
    ) -> Result<LinkedRepository, sqlx::Error> {
        let query = format!(
            "INSERT INTO linked_repositories (repository, agreement_name, access_token)
             VALUES ($1, $2, $3)
             ON CONFLICT (repository) DO UPDATE SET
                agreement_name = EXCLUDED.agreement_name,
                access_token = EXCLUDED.access_token
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LinkedRepository>(&query)
            .bind(&input.repository)
            .bind(&input.agreement_name)
            .bind(&input.access_token)
            .fetch_one(pool)
            .await
    }

    /// Find a link by repository full name (`owner/name`).
    pub async fn find_by_repository(
        pool: &PgPool,
        repository: &str,
    ) -> Result<Option<LinkedRepository>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM linked_repositories WHERE repository = $1");
        sqlx::query_as::<_, LinkedRepository>(&query)
            .bind(repository)
            .fetch_optional(pool)
            .await
    }

    /// List all linked repositories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<LinkedRepository>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM linked_repositories ORDER BY repository");
        sqlx::query_as::<_, LinkedRepository>(&query)
            .fetch_all(pool)
            .await
    }
}
