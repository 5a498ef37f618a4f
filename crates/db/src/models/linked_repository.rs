//! Linked repository model and DTOs.

use clasign_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A repository linked to an agreement.
///
/// The access token is used to post commit statuses on pull requests in
/// this repository; it is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LinkedRepository {
    pub id: DbId,
    /// `owner/name` form, e.g. `octo/widgets`.
    pub repository: String,
    pub agreement_name: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub created_at: Timestamp,
}

/// DTO for linking a repository to an agreement.
#[derive(Debug, Clone)]
pub struct CreateLinkedRepository {
    pub repository: String,
    pub agreement_name: String,
    pub access_token: String,
}
