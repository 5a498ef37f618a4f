//! Repository for the `individual_signatures` table.

use clasign_core::types::DbId;
use sqlx::PgPool;

use crate::models::signature::{CreateIndividualSignature, IndividualSignature};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agreement_id, name, email, mailing_address, country, \
                       telephone, github_login, signed_at";

/// Provides persistence and lookup for individual signatures.
pub struct IndividualSignatureRepo;

impl IndividualSignatureRepo {
    /// Record a new individual signature, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIndividualSignature,
    ) -> Result<IndividualSignature, sqlx::Error> {
        let query = format!(
            "INSERT INTO individual_signatures
                 (agreement_id, name, email, mailing_address, country, telephone, github_login)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IndividualSignature>(&query)
            .bind(input.agreement_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mailing_address)
            .bind(&input.country)
            .bind(&input.telephone)
            .bind(&input.github_login)
            .fetch_one(pool)
            .await
    }

    /// Find the most recent signature covering any of the given agreements,
    /// matched by GitHub login OR any of the given email addresses.
    pub async fn find_first_for(
        pool: &PgPool,
        github_login: &str,
        emails: &[String],
        agreement_ids: &[DbId],
    ) -> Result<Option<IndividualSignature>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM individual_signatures
             WHERE agreement_id = ANY($1)
               AND (github_login = $2 OR email = ANY($3))
             ORDER BY signed_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, IndividualSignature>(&query)
            .bind(agreement_ids)
            .bind(github_login)
            .bind(emails)
            .fetch_optional(pool)
            .await
    }

    /// List all signatures for one agreement, newest first.
    pub async fn list_for_agreement(
        pool: &PgPool,
        agreement_id: DbId,
    ) -> Result<Vec<IndividualSignature>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM individual_signatures
             WHERE agreement_id = $1
             ORDER BY signed_at DESC"
        );
        sqlx::query_as::<_, IndividualSignature>(&query)
            .bind(agreement_id)
            .fetch_all(pool)
            .await
    }

    /// Count signatures referencing one agreement. Used to block deletion
    /// of agreements that have been signed.
    pub async fn count_for_agreement(
        pool: &PgPool,
        agreement_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM individual_signatures WHERE agreement_id = $1")
                .bind(agreement_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
