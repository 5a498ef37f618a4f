//! Admin handlers for agreement management and repository linking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clasign_core::error::CoreError;
use clasign_core::types::DbId;
use clasign_db::models::agreement::{Agreement, CreateAgreement, UpdateAgreement};
use clasign_db::models::linked_repository::{CreateLinkedRepository, LinkedRepository};
use clasign_db::repositories::agreement_repo::AgreementRepo;
use clasign_db::repositories::corporate_signature_repo::CorporateSignatureRepo;
use clasign_db::repositories::individual_signature_repo::IndividualSignatureRepo;
use clasign_db::repositories::linked_repository_repo::LinkedRepositoryRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for linking repositories to an agreement.
#[derive(Debug, Deserialize)]
pub struct LinkRepositoriesRequest {
    /// Repositories in `owner/name` form.
    pub repositories: Vec<String>,
    /// The primary agreement name the repositories require.
    pub agreement_name: String,
    /// Token used to create the webhooks and post commit statuses.
    pub access_token: String,
}

/// GET /api/v1/admin/cla
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<Vec<Agreement>>> {
    let agreements = AgreementRepo::list(&state.pool).await?;
    Ok(Json(agreements))
}

/// POST /api/v1/admin/cla
///
/// Markdown content is rendered to HTML through the GitHub markdown API
/// unless the caller supplied pre-rendered HTML.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(mut input): Json<CreateAgreement>,
) -> AppResult<(StatusCode, Json<Agreement>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Agreement name must not be empty".into(),
        )));
    }

    let token = &state.config.oauth.service_token;
    if input.individual_html.is_none() {
        input.individual_html = Some(
            state
                .github
                .render_markdown(token, &input.individual_markdown)
                .await?,
        );
    }
    if input.corporate_html.is_none() {
        input.corporate_html = Some(
            state
                .github
                .render_markdown(token, &input.corporate_markdown)
                .await?,
        );
    }

    let agreement = AgreementRepo::create(&state.pool, &input).await?;
    tracing::info!(agreement = %agreement.name, id = agreement.id, "Agreement created");
    Ok((StatusCode::CREATED, Json(agreement)))
}

/// GET /api/v1/admin/cla/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Agreement>> {
    let agreement = AgreementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "agreement",
            id,
        }))?;
    Ok(Json(agreement))
}

/// PUT /api/v1/admin/cla/{id}
///
/// Re-renders HTML for any markdown field the caller changed without
/// supplying matching HTML.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAgreement>,
) -> AppResult<Json<Agreement>> {
    let token = &state.config.oauth.service_token;
    if let (Some(markdown), None) = (&input.individual_markdown, &input.individual_html) {
        input.individual_html = Some(state.github.render_markdown(token, markdown).await?);
    }
    if let (Some(markdown), None) = (&input.corporate_markdown, &input.corporate_html) {
        input.corporate_html = Some(state.github.render_markdown(token, markdown).await?);
    }

    let agreement = AgreementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "agreement",
            id,
        }))?;
    Ok(Json(agreement))
}

/// DELETE /api/v1/admin/cla/{id}
///
/// Refuses to delete an agreement that has signatures or is referenced as
/// another agreement's superseding agreement.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let individual = IndividualSignatureRepo::count_for_agreement(&state.pool, id).await?;
    let corporate = CorporateSignatureRepo::count_for_agreement(&state.pool, id).await?;
    if individual > 0 || corporate > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Agreement has signatures and cannot be deleted".into(),
        )));
    }
    if AgreementRepo::is_referenced_as_superseding(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Agreement is referenced as a superseding agreement".into(),
        )));
    }

    let deleted = AgreementRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "agreement",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/cla/link
pub async fn list_links(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<Vec<LinkedRepository>>> {
    let links = LinkedRepositoryRepo::list(&state.pool).await?;
    Ok(Json(links))
}

/// POST /api/v1/admin/cla/link
///
/// Stores the link rows and creates a `pull_request` webhook on each
/// repository pointed at this service's hook endpoint.
pub async fn create_links(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<LinkRepositoriesRequest>,
) -> AppResult<(StatusCode, Json<Vec<LinkedRepository>>)> {
    if input.repositories.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one repository is required".into(),
        )));
    }

    // The agreement must exist before repositories start demanding it.
    if AgreementRepo::find_primary_by_name(&state.pool, &input.agreement_name)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::AgreementNotFound(
            input.agreement_name.clone(),
        )));
    }

    let hook_url = format!(
        "{}/github/hooks/pull_request/{}",
        state.config.base_url, input.agreement_name
    );

    let mut links = Vec::with_capacity(input.repositories.len());
    for repository in &input.repositories {
        // Install the webhook first: a stored link without a hook would
        // silently never receive pull-request events.
        state
            .github
            .create_pull_request_hook(
                &input.access_token,
                repository,
                &hook_url,
                &state.config.webhook_secret,
            )
            .await?;

        let link = LinkedRepositoryRepo::upsert(
            &state.pool,
            &CreateLinkedRepository {
                repository: repository.clone(),
                agreement_name: input.agreement_name.clone(),
                access_token: input.access_token.clone(),
            },
        )
        .await?;

        tracing::info!(
            admin = %admin.login,
            repository,
            agreement = %input.agreement_name,
            "Repository linked"
        );
        links.push(link);
    }

    Ok((StatusCode::CREATED, Json(links)))
}
