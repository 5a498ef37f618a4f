//! Contributor license agreement model and DTOs.

use clasign_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An agreement row from the `agreements` table.
///
/// Multiple rows may share a `name` (older versions, per-company variants);
/// at most one of them carries `is_primary`. `superseding_agreement_id`
/// points at the agreement that replaces this one: if a contributor signed
/// either this agreement or any agreement along the superseding chain, they
/// need not sign again.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Agreement {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_primary: bool,
    pub superseding_agreement_id: Option<DbId>,
    pub individual_markdown: String,
    pub individual_html: Option<String>,
    pub corporate_markdown: String,
    pub corporate_html: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new agreement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgreement {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_primary: Option<bool>,
    pub superseding_agreement_id: Option<DbId>,
    pub individual_markdown: String,
    pub individual_html: Option<String>,
    pub corporate_markdown: String,
    pub corporate_html: Option<String>,
}

/// DTO for updating an existing agreement. All fields are optional.
///
/// `superseding_agreement_id` is double-optional so an explicit `null` in
/// the request body clears the chain link: `None` leaves the column alone,
/// `Some(None)` nulls it, `Some(Some(id))` points it at `id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAgreement {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_primary: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub superseding_agreement_id: Option<Option<DbId>>,
    pub individual_markdown: Option<String>,
    pub individual_html: Option<String>,
    pub corporate_markdown: Option<String>,
    pub corporate_html: Option<String>,
}

/// Keeps "field absent" distinguishable from "field is null": serde only
/// calls this when the key is present, so a literal `null` becomes
/// `Some(None)` while an omitted key stays `None` via the default.
fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}
