//! Individual and corporate signature models and DTOs.

use clasign_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An individual signature row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IndividualSignature {
    pub id: DbId,
    pub agreement_id: DbId,
    pub name: String,
    pub email: String,
    pub mailing_address: Option<String>,
    pub country: Option<String>,
    pub telephone: Option<String>,
    pub github_login: String,
    pub signed_at: Timestamp,
}

/// DTO for recording an individual signature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIndividualSignature {
    pub agreement_id: DbId,
    pub name: String,
    pub email: String,
    pub mailing_address: Option<String>,
    pub country: Option<String>,
    pub telephone: Option<String>,
    pub github_login: String,
}

/// A corporate signature row.
///
/// Covers contributors either by GitHub organization membership
/// (`github_organization`) or by verified-email domain (`email_domain`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CorporateSignature {
    pub id: DbId,
    pub agreement_id: DbId,
    pub organization: String,
    pub github_organization: Option<String>,
    pub email_domain: Option<String>,
    pub signer_name: String,
    pub signer_email: String,
    pub signer_title: Option<String>,
    pub signer_github_login: String,
    pub signed_at: Timestamp,
}

/// DTO for recording a corporate signature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCorporateSignature {
    pub agreement_id: DbId,
    pub organization: String,
    pub github_organization: Option<String>,
    pub email_domain: Option<String>,
    pub signer_name: String,
    pub signer_email: String,
    pub signer_title: Option<String>,
    pub signer_github_login: String,
}
