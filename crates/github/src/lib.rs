//! Outbound GitHub integration.
//!
//! Wraps the subset of the GitHub REST API the CLA service needs (current
//! user, verified emails, organizations, pull requests, commit statuses,
//! webhooks, markdown rendering) plus OAuth authorization-code token
//! exchange and webhook payload signature verification.

pub mod api;
pub mod oauth;
pub mod types;
pub mod webhook;

pub use api::{GitHubApi, GitHubError};
pub use oauth::OAuthConfig;
