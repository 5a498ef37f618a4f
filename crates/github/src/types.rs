//! Wire types for the GitHub REST API and webhook payloads.

use serde::{Deserialize, Serialize};

/// The authenticated GitHub user, as returned by `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// One entry from `GET /user/emails`.
#[derive(Debug, Deserialize)]
pub struct EmailEntry {
    pub email: String,
    pub verified: bool,
    pub primary: bool,
}

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Success,
    Failure,
    Pending,
}

/// A commit status to post via `POST /repos/{repo}/statuses/{sha}`.
#[derive(Debug, Clone, Serialize)]
pub struct CommitStatus {
    pub state: CommitState,
    pub target_url: String,
    pub description: String,
    pub context: String,
}

// ---------------------------------------------------------------------------
// Webhook payloads
// ---------------------------------------------------------------------------

/// A `pull_request` webhook event delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// `opened`, `reopened`, `synchronize`, `closed`, ...
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

/// The pull request embedded in a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: i32,
    pub html_url: String,
    pub head: CommitRef,
    pub user: Account,
}

/// A git ref + SHA pair.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// A GitHub account (user or organization).
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub login: String,
}

/// The repository a webhook delivery concerns.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// `owner/name` form, e.g. `octo/widgets`.
    pub full_name: String,
}
