//! Handlers for the authenticated sign pages.
//!
//! GET returns the chain-resolved agreement together with the caller's
//! current signing status; POST records a signature against the chain tail
//! and, when the signing originated from a pull request, pushes a success
//! commit status back to GitHub.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clasign_core::error::CoreError;
use clasign_db::models::signature::{
    CorporateSignature, CreateCorporateSignature, CreateIndividualSignature, IndividualSignature,
};
use clasign_db::models::user::User;
use clasign_db::repositories::corporate_signature_repo::CorporateSignatureRepo;
use clasign_db::repositories::individual_signature_repo::IndividualSignatureRepo;
use clasign_db::repositories::user_repo::UserRepo;
use serde::{Deserialize, Serialize};

use crate::cla::{self, Contributor};
use crate::error::{AppError, AppResult};
use crate::handlers::agreements::AgreementView;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response of the sign-form GETs: the agreement plus the caller's status.
#[derive(Debug, Serialize)]
pub struct SignForm {
    pub agreement: AgreementView,
    pub signed: bool,
}

/// Request body for recording an individual signature.
#[derive(Debug, Deserialize)]
pub struct SignIclaRequest {
    pub name: String,
    pub email: String,
    pub mailing_address: Option<String>,
    pub country: Option<String>,
    pub telephone: Option<String>,
    /// `owner/name` of the pull request's repository, when signing was
    /// reached from a pull request status link.
    pub repository: Option<String>,
    pub pull_request_id: Option<i32>,
}

/// Request body for recording a corporate signature.
#[derive(Debug, Deserialize)]
pub struct SignCclaRequest {
    pub organization: String,
    pub github_organization: Option<String>,
    pub email_domain: Option<String>,
    pub signer_name: String,
    pub signer_email: String,
    pub signer_title: Option<String>,
    pub repository: Option<String>,
    pub pull_request_id: Option<i32>,
}

/// Load the full user row behind the session and build the identity the
/// signing checks run against.
async fn load_contributor(state: &AppState, auth: &AuthUser) -> AppResult<(User, Contributor)> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: auth.user_id,
        }))?;

    let contributor = Contributor {
        github_login: user.github_login.clone(),
        emails: user.emails.clone(),
        access_token: user.access_token.clone(),
    };
    Ok((user, contributor))
}

/// GET /api/v1/sign/{name}/icla
pub async fn icla_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<SignForm>> {
    let (_, contributor) = load_contributor(&state, &auth).await?;
    let agreement = cla::resolve_agreement(&state, &name).await?;
    let signed = cla::is_signed(&state, &name, &contributor).await?;

    Ok(Json(SignForm {
        agreement: AgreementView::individual(agreement),
        signed,
    }))
}

/// POST /api/v1/sign/{name}/icla
pub async fn sign_icla(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(input): Json<SignIclaRequest>,
) -> AppResult<(StatusCode, Json<IndividualSignature>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }

    let (user, _) = load_contributor(&state, &auth).await?;
    if !user.emails.contains(&input.email) {
        return Err(AppError::Core(CoreError::Validation(
            "Email must be one of your verified GitHub email addresses".into(),
        )));
    }

    let agreement = cla::resolve_agreement(&state, &name).await?;

    let signature = IndividualSignatureRepo::create(
        &state.pool,
        &CreateIndividualSignature {
            agreement_id: agreement.id,
            name: input.name,
            email: input.email,
            mailing_address: input.mailing_address,
            country: input.country,
            telephone: input.telephone,
            github_login: user.github_login.clone(),
        },
    )
    .await?;

    tracing::info!(login = %user.github_login, agreement = %name, "Individual signature recorded");

    if let (Some(repository), Some(pull_request_id)) = (&input.repository, input.pull_request_id) {
        cla::update_pull_request(&state, &name, repository, pull_request_id, true).await?;
    }

    Ok((StatusCode::CREATED, Json(signature)))
}

/// GET /api/v1/sign/{name}/ccla
pub async fn ccla_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<SignForm>> {
    let (_, contributor) = load_contributor(&state, &auth).await?;
    let agreement = cla::resolve_agreement(&state, &name).await?;
    let signed = cla::is_signed(&state, &name, &contributor).await?;

    Ok(Json(SignForm {
        agreement: AgreementView::corporate(agreement),
        signed,
    }))
}

/// POST /api/v1/sign/{name}/ccla
///
/// The signer must be a member of the GitHub organization they sign for.
pub async fn sign_ccla(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(name): Path<String>,
    Json(input): Json<SignCclaRequest>,
) -> AppResult<(StatusCode, Json<CorporateSignature>)> {
    if input.organization.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Organization must not be empty".into(),
        )));
    }
    if input.github_organization.is_none() && input.email_domain.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "A GitHub organization or an email domain is required".into(),
        )));
    }

    let (user, contributor) = load_contributor(&state, &auth).await?;

    if let Some(github_organization) = &input.github_organization {
        let token = contributor.access_token.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("No GitHub token on record".into()))
        })?;
        let memberships = state.github.organizations(token).await?;
        if !memberships.contains(github_organization) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "You are not a member of the GitHub organization '{github_organization}'"
            ))));
        }
    }

    let agreement = cla::resolve_agreement(&state, &name).await?;

    let signature = CorporateSignatureRepo::create(
        &state.pool,
        &CreateCorporateSignature {
            agreement_id: agreement.id,
            organization: input.organization,
            github_organization: input.github_organization,
            // Stored lowercased: coverage checks compare against the
            // lowercased domains of verified emails.
            email_domain: input.email_domain.map(|d| d.to_ascii_lowercase()),
            signer_name: input.signer_name,
            signer_email: input.signer_email,
            signer_title: input.signer_title,
            signer_github_login: user.github_login.clone(),
        },
    )
    .await?;

    tracing::info!(
        login = %user.github_login,
        organization = %signature.organization,
        agreement = %name,
        "Corporate signature recorded"
    );

    if let (Some(repository), Some(pull_request_id)) = (&input.repository, input.pull_request_id) {
        cla::update_pull_request(&state, &name, repository, pull_request_id, true).await?;
    }

    Ok((StatusCode::CREATED, Json(signature)))
}
