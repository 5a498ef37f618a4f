//! REST client for the GitHub API endpoints the CLA service uses.
//!
//! All methods take the access token explicitly: most calls act on behalf of
//! the signed-in user, while commit statuses and webhooks use a stored
//! repository token or the service account token.

use serde::Deserialize;

use crate::oauth::OAuthConfig;
use crate::types::{CommitStatus, EmailEntry, GitHubUser};

/// User agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("clasign/", env!("CARGO_PKG_VERSION"));

/// Errors from the GitHub REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The OAuth token exchange was rejected.
    #[error("OAuth token exchange failed: {0}")]
    OAuth(String),
}

/// HTTP client for the GitHub REST API.
pub struct GitHubApi {
    client: reqwest::Client,
    config: OAuthConfig,
}

/// Response of `POST /login/oauth/access_token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// `GET /repos/{repo}/pulls/{number}`, reduced to the head SHA.
#[derive(Debug, Deserialize)]
struct PullRequestDetail {
    head: HeadRef,
}

#[derive(Debug, Deserialize)]
struct HeadRef {
    sha: String,
}

/// One entry from `GET /user/orgs`.
#[derive(Debug, Deserialize)]
struct OrgEntry {
    login: String,
}

impl GitHubApi {
    /// Create a new client for the configured GitHub endpoints.
    pub fn new(config: OAuthConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// The OAuth configuration this client was built with.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // OAuth
    // -----------------------------------------------------------------

    /// Exchange an OAuth authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        let body = serde_json::json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
            "code": code,
        });

        let response = self
            .client
            .post(format!(
                "{}/login/oauth/access_token",
                self.config.web_base_url
            ))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let token: TokenResponse = Self::ensure_success(response).await?.json().await?;
        match token.access_token {
            Some(access_token) => Ok(access_token),
            None => Err(GitHubError::OAuth(
                token
                    .error_description
                    .or(token.error)
                    .unwrap_or_else(|| "no access token in response".into()),
            )),
        }
    }

    // -----------------------------------------------------------------
    // User identity
    // -----------------------------------------------------------------

    /// Fetch the authenticated user (`GET /user`).
    pub async fn current_user(&self, token: &str) -> Result<GitHubUser, GitHubError> {
        let response = self
            .client
            .get(format!("{}/user", self.config.api_base_url))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(Self::ensure_success(response).await?.json().await?)
    }

    /// Fetch the user's verified email addresses (`GET /user/emails`).
    ///
    /// Unverified addresses are dropped; the primary address sorts first.
    pub async fn verified_emails(&self, token: &str) -> Result<Vec<String>, GitHubError> {
        let response = self
            .client
            .get(format!("{}/user/emails", self.config.api_base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let mut entries: Vec<EmailEntry> = Self::ensure_success(response).await?.json().await?;
        entries.retain(|e| e.verified);
        entries.sort_by_key(|e| !e.primary);
        Ok(entries.into_iter().map(|e| e.email).collect())
    }

    /// Fetch the logins of the organizations the user belongs to
    /// (`GET /user/orgs`).
    pub async fn organizations(&self, token: &str) -> Result<Vec<String>, GitHubError> {
        let response = self
            .client
            .get(format!("{}/user/orgs", self.config.api_base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let orgs: Vec<OrgEntry> = Self::ensure_success(response).await?.json().await?;
        Ok(orgs.into_iter().map(|o| o.login).collect())
    }

    // -----------------------------------------------------------------
    // Pull requests / commit statuses
    // -----------------------------------------------------------------

    /// Look up the head SHA of a pull request
    /// (`GET /repos/{repository}/pulls/{number}`).
    pub async fn pull_request_head_sha(
        &self,
        token: &str,
        repository: &str,
        number: i32,
    ) -> Result<String, GitHubError> {
        let response = self
            .client
            .get(format!(
                "{}/repos/{}/pulls/{}",
                self.config.api_base_url, repository, number
            ))
            .bearer_auth(token)
            .send()
            .await?;

        let detail: PullRequestDetail = Self::ensure_success(response).await?.json().await?;
        Ok(detail.head.sha)
    }

    /// Post a commit status (`POST /repos/{repository}/statuses/{sha}`).
    pub async fn create_commit_status(
        &self,
        token: &str,
        repository: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), GitHubError> {
        let response = self
            .client
            .post(format!(
                "{}/repos/{}/statuses/{}",
                self.config.api_base_url, repository, sha
            ))
            .bearer_auth(token)
            .json(status)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Webhooks
    // -----------------------------------------------------------------

    /// Create a `pull_request` webhook on a repository
    /// (`POST /repos/{repository}/hooks`).
    pub async fn create_pull_request_hook(
        &self,
        token: &str,
        repository: &str,
        hook_url: &str,
        secret: &str,
    ) -> Result<(), GitHubError> {
        let body = serde_json::json!({
            "name": "web",
            "active": true,
            "events": ["pull_request"],
            "config": {
                "url": hook_url,
                "content_type": "json",
                "secret": secret,
            },
        });

        let response = self
            .client
            .post(format!(
                "{}/repos/{}/hooks",
                self.config.api_base_url, repository
            ))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Markdown
    // -----------------------------------------------------------------

    /// Render GitHub-flavored markdown to HTML (`POST /markdown`).
    pub async fn render_markdown(&self, token: &str, text: &str) -> Result<String, GitHubError> {
        let body = serde_json::json!({
            "text": text,
            "mode": "gfm",
        });

        let response = self
            .client
            .post(format!("{}/markdown", self.config.api_base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Ok(Self::ensure_success(response).await?.text().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`GitHubError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GitHubError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
