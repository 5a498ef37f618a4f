//! Repository for the `agreements` table.

use clasign_core::types::DbId;
use sqlx::PgPool;

use crate::models::agreement::{Agreement, CreateAgreement, UpdateAgreement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_primary, superseding_agreement_id, \
                       individual_markdown, individual_html, corporate_markdown, \
                       corporate_html, created_at, updated_at";

/// Upper bound on superseding-chain length. The data is expected acyclic;
/// this guards lookups against a corrupt chain.
const MAX_CHAIN_LENGTH: usize = 32;

/// Provides CRUD operations and chain resolution for agreements.
pub struct AgreementRepo;

impl AgreementRepo {
    /// Insert a new agreement, returning the created row.
    ///
    /// If `is_primary` is `None` in the input, defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateAgreement) -> Result<Agreement, sqlx::Error> {
        let query = format!(
            "INSERT INTO agreements (name, description, is_primary, superseding_agreement_id,
                 individual_markdown, individual_html, corporate_markdown, corporate_html)
             VALUES ($1, $2, COALESCE($3, TRUE), $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agreement>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_primary)
            .bind(input.superseding_agreement_id)
            .bind(&input.individual_markdown)
            .bind(&input.individual_html)
            .bind(&input.corporate_markdown)
            .bind(&input.corporate_html)
            .fetch_one(pool)
            .await
    }

    /// Find an agreement by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agreement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agreements WHERE id = $1");
        sqlx::query_as::<_, Agreement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the primary agreement with the given name.
    pub async fn find_primary_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Agreement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agreements WHERE name = $1 AND is_primary");
        sqlx::query_as::<_, Agreement>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all agreements ordered by name, primary versions first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Agreement>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM agreements ORDER BY name, is_primary DESC, id");
        sqlx::query_as::<_, Agreement>(&query).fetch_all(pool).await
    }

    /// Update an agreement. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAgreement,
    ) -> Result<Option<Agreement>, sqlx::Error> {
        let query = format!(
            "UPDATE agreements SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_primary = COALESCE($4, is_primary),
                superseding_agreement_id =
                    CASE WHEN $5 THEN $6 ELSE superseding_agreement_id END,
                individual_markdown = COALESCE($7, individual_markdown),
                individual_html = COALESCE($8, individual_html),
                corporate_markdown = COALESCE($9, corporate_markdown),
                corporate_html = COALESCE($10, corporate_html),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agreement>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_primary)
            .bind(input.superseding_agreement_id.is_some())
            .bind(input.superseding_agreement_id.flatten())
            .bind(&input.individual_markdown)
            .bind(&input.individual_html)
            .bind(&input.corporate_markdown)
            .bind(&input.corporate_html)
            .fetch_optional(pool)
            .await
    }

    /// Delete an agreement by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM agreements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any other agreement references this one as its superseding
    /// agreement. Such an agreement must not be deleted.
    pub async fn is_referenced_as_superseding(
        pool: &PgPool,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM agreements WHERE superseding_agreement_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Resolve the superseding chain for the primary agreement with the
    /// given name.
    ///
    /// Returns the IDs of the named agreement and every agreement reached by
    /// following `superseding_agreement_id`, in chain order. Returns an
    /// empty vector when no primary agreement with that name exists. A
    /// repeated ID (corrupt, cyclic data) terminates the walk.
    pub async fn chain_ids(pool: &PgPool, name: &str) -> Result<Vec<DbId>, sqlx::Error> {
        let Some(mut current) = Self::find_primary_by_name(pool, name).await? else {
            return Ok(Vec::new());
        };

        let mut ids = vec![current.id];
        while let Some(next_id) = current.superseding_agreement_id {
            if ids.contains(&next_id) || ids.len() >= MAX_CHAIN_LENGTH {
                tracing::warn!(name, next_id, "Superseding chain terminated early");
                break;
            }
            match Self::find_by_id(pool, next_id).await? {
                Some(next) => {
                    ids.push(next.id);
                    current = next;
                }
                None => break,
            }
        }
        Ok(ids)
    }

    /// Resolve the agreement presented for signing: the primary agreement
    /// with the given name, replaced by the tail of its superseding chain
    /// when one exists.
    pub async fn resolve_current(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Agreement>, sqlx::Error> {
        let ids = Self::chain_ids(pool, name).await?;
        match ids.last() {
            Some(&id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }
}
