//! Public, read-only views of agreement content.

use axum::extract::{Path, State};
use axum::Json;
use clasign_db::models::agreement::Agreement;
use serde::Serialize;

use crate::cla;
use crate::error::AppResult;
use crate::state::AppState;

/// One side (individual or corporate) of an agreement, ready for display.
#[derive(Debug, Serialize)]
pub struct AgreementView {
    pub name: String,
    pub description: Option<String>,
    pub markdown: String,
    pub html: Option<String>,
}

impl AgreementView {
    /// The individual side of an agreement.
    pub fn individual(agreement: Agreement) -> Self {
        Self {
            name: agreement.name,
            description: agreement.description,
            markdown: agreement.individual_markdown,
            html: agreement.individual_html,
        }
    }

    /// The corporate side of an agreement.
    pub fn corporate(agreement: Agreement) -> Self {
        Self {
            name: agreement.name,
            description: agreement.description,
            markdown: agreement.corporate_markdown,
            html: agreement.corporate_html,
        }
    }
}

/// GET /api/v1/cla/{name}/icla
pub async fn view_icla(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<AgreementView>> {
    let agreement = cla::resolve_agreement(&state, &name).await?;
    Ok(Json(AgreementView::individual(agreement)))
}

/// GET /api/v1/cla/{name}/ccla
pub async fn view_ccla(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<AgreementView>> {
    let agreement = cla::resolve_agreement(&state, &name).await?;
    Ok(Json(AgreementView::corporate(agreement)))
}
