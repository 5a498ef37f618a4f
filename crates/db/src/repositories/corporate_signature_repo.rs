//! Repository for the `corporate_signatures` table.

use clasign_core::types::DbId;
use sqlx::PgPool;

use crate::models::signature::{CorporateSignature, CreateCorporateSignature};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agreement_id, organization, github_organization, email_domain, \
                       signer_name, signer_email, signer_title, signer_github_login, signed_at";

/// Provides persistence and lookup for corporate signatures.
pub struct CorporateSignatureRepo;

impl CorporateSignatureRepo {
    /// Record a new corporate signature, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCorporateSignature,
    ) -> Result<CorporateSignature, sqlx::Error> {
        let query = format!(
            "INSERT INTO corporate_signatures
                 (agreement_id, organization, github_organization, email_domain,
                  signer_name, signer_email, signer_title, signer_github_login)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorporateSignature>(&query)
            .bind(input.agreement_id)
            .bind(&input.organization)
            .bind(&input.github_organization)
            .bind(&input.email_domain)
            .bind(&input.signer_name)
            .bind(&input.signer_email)
            .bind(&input.signer_title)
            .bind(&input.signer_github_login)
            .fetch_one(pool)
            .await
    }

    /// Find the most recent corporate signature covering any of the given
    /// agreements, matched by GitHub organization membership OR verified
    /// email domain.
    pub async fn find_first_for(
        pool: &PgPool,
        github_organizations: &[String],
        email_domains: &[String],
        agreement_ids: &[DbId],
    ) -> Result<Option<CorporateSignature>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM corporate_signatures
             WHERE agreement_id = ANY($1)
               AND (github_organization = ANY($2) OR email_domain = ANY($3))
             ORDER BY signed_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CorporateSignature>(&query)
            .bind(agreement_ids)
            .bind(github_organizations)
            .bind(email_domains)
            .fetch_optional(pool)
            .await
    }

    /// Count corporate signatures referencing one agreement.
    pub async fn count_for_agreement(
        pool: &PgPool,
        agreement_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM corporate_signatures WHERE agreement_id = $1")
                .bind(agreement_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
