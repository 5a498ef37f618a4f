//! Signing-status resolution and pull request commit status updates.
//!
//! An agreement may be superseded by a newer one. Resolution therefore works
//! on the whole superseding chain: a contributor who signed any agreement
//! along the chain counts as signed, while new signatures always target the
//! chain tail.

use clasign_core::emails::email_domains;
use clasign_core::error::CoreError;
use clasign_core::status::{
    sign_url, COMMIT_STATUS_CONTEXT, SIGNED_DESCRIPTION, UNSIGNED_DESCRIPTION,
};
use clasign_core::types::DbId;
use clasign_db::models::agreement::Agreement;
use clasign_db::repositories::agreement_repo::AgreementRepo;
use clasign_db::repositories::corporate_signature_repo::CorporateSignatureRepo;
use clasign_db::repositories::individual_signature_repo::IndividualSignatureRepo;
use clasign_db::repositories::linked_repository_repo::LinkedRepositoryRepo;
use clasign_github::types::{CommitState, CommitStatus};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The identity a signing check runs against.
///
/// Built from the session user for the sign endpoints, or from whatever the
/// webhook payload and stored user rows provide for pull request events.
#[derive(Debug, Clone)]
pub struct Contributor {
    pub github_login: String,
    /// Verified email addresses, primary first.
    pub emails: Vec<String>,
    /// GitHub token used to list the contributor's organizations. Absent for
    /// contributors who never logged in here.
    pub access_token: Option<String>,
}

/// Resolve the agreement presented for signing or viewing. 404 when no
/// primary agreement with that name exists.
pub async fn resolve_agreement(state: &AppState, name: &str) -> AppResult<Agreement> {
    AgreementRepo::resolve_current(&state.pool, name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::AgreementNotFound(name.to_string())))
}

/// The superseding chain ids for a named agreement. 404 when the name does
/// not resolve.
async fn chain_for(state: &AppState, name: &str) -> AppResult<Vec<DbId>> {
    let ids = AgreementRepo::chain_ids(&state.pool, name).await?;
    if ids.is_empty() {
        return Err(AppError::Core(CoreError::AgreementNotFound(
            name.to_string(),
        )));
    }
    Ok(ids)
}

/// Whether the contributor has signed the named agreement (or any agreement
/// along its superseding chain), individually or through a corporate
/// signature.
pub async fn is_signed(state: &AppState, name: &str, contributor: &Contributor) -> AppResult<bool> {
    let ids = chain_for(state, name).await?;

    let individual = IndividualSignatureRepo::find_first_for(
        &state.pool,
        &contributor.github_login,
        &contributor.emails,
        &ids,
    )
    .await?;
    if individual.is_some() {
        return Ok(true);
    }

    // Corporate coverage: by organization membership or verified email
    // domain. Organization lookup needs a token; without one only the
    // domain check applies.
    let organizations = match &contributor.access_token {
        Some(token) => state.github.organizations(token).await.unwrap_or_else(|err| {
            tracing::warn!(
                login = %contributor.github_login,
                error = %err,
                "Failed to list organizations; falling back to email domains"
            );
            Vec::new()
        }),
        None => Vec::new(),
    };
    let domains = email_domains(contributor.emails.iter().map(String::as_str));

    let corporate =
        CorporateSignatureRepo::find_first_for(&state.pool, &organizations, &domains, &ids).await?;
    Ok(corporate.is_some())
}

/// Post a `license/cla` commit status to a pull request's head commit.
///
/// The token comes from the linked repository row when one exists, otherwise
/// the service account token is used. The status target links back to the
/// sign page with the repository and pull request threaded through so a
/// later signing can update this same pull request.
pub async fn save_pull_request_status(
    state: &AppState,
    agreement_name: &str,
    repository: &str,
    pull_request_id: i32,
    head_sha: &str,
    signed: bool,
) -> AppResult<()> {
    let linked = LinkedRepositoryRepo::find_by_repository(&state.pool, repository).await?;
    let token = match &linked {
        Some(link) => link.access_token.clone(),
        None => state.config.oauth.service_token.clone(),
    };

    let status = CommitStatus {
        state: if signed {
            CommitState::Success
        } else {
            CommitState::Failure
        },
        target_url: sign_url(
            &state.config.base_url,
            agreement_name,
            Some(repository),
            Some(pull_request_id),
        ),
        description: if signed {
            SIGNED_DESCRIPTION.to_string()
        } else {
            UNSIGNED_DESCRIPTION.to_string()
        },
        context: COMMIT_STATUS_CONTEXT.to_string(),
    };

    state
        .github
        .create_commit_status(&token, repository, head_sha, &status)
        .await?;

    tracing::info!(
        repository,
        pull_request_id,
        signed,
        "Updated pull request commit status"
    );
    Ok(())
}

/// Look up a pull request's head SHA and post its commit status. Used after
/// a signing that originated from a pull request, where the event payload
/// (and its SHA) is not at hand.
pub async fn update_pull_request(
    state: &AppState,
    agreement_name: &str,
    repository: &str,
    pull_request_id: i32,
    signed: bool,
) -> AppResult<()> {
    let linked = LinkedRepositoryRepo::find_by_repository(&state.pool, repository).await?;
    let token = match &linked {
        Some(link) => link.access_token.clone(),
        None => state.config.oauth.service_token.clone(),
    };

    let head_sha = state
        .github
        .pull_request_head_sha(&token, repository, pull_request_id)
        .await?;

    save_pull_request_status(
        state,
        agreement_name,
        repository,
        pull_request_id,
        &head_sha,
        signed,
    )
    .await
}
