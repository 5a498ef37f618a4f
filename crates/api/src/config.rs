use clasign_github::oauth::{OAuthConfig, DEFAULT_API_BASE_URL, DEFAULT_WEB_BASE_URL};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the GitHub OAuth credentials and the JWT secret have
/// defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Public base URL of this service, used for sign links and webhook URLs.
    pub base_url: String,
    /// GitHub logins granted the admin role at login.
    pub admin_logins: Vec<String>,
    /// Shared secret for GitHub webhook signature verification.
    pub webhook_secret: String,
    /// JWT session token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// GitHub OAuth application credentials and endpoints.
    pub oauth: OAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `BASE_URL`              | `http://localhost:3000`    |
    /// | `ADMIN_LOGINS`          | (empty)                    |
    /// | `GITHUB_WEBHOOK_SECRET` | **required**               |
    /// | `GITHUB_CLIENT_ID`      | **required**               |
    /// | `GITHUB_CLIENT_SECRET`  | **required**               |
    /// | `GITHUB_SERVICE_TOKEN`  | **required**               |
    /// | `GITHUB_WEB_BASE_URL`   | `https://github.com`       |
    /// | `GITHUB_API_BASE_URL`   | `https://api.github.com`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let admin_logins: Vec<String> = std::env::var("ADMIN_LOGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let webhook_secret = std::env::var("GITHUB_WEBHOOK_SECRET")
            .expect("GITHUB_WEBHOOK_SECRET must be set in the environment");

        let oauth = OAuthConfig {
            client_id: std::env::var("GITHUB_CLIENT_ID")
                .expect("GITHUB_CLIENT_ID must be set in the environment"),
            client_secret: std::env::var("GITHUB_CLIENT_SECRET")
                .expect("GITHUB_CLIENT_SECRET must be set in the environment"),
            service_token: std::env::var("GITHUB_SERVICE_TOKEN")
                .expect("GITHUB_SERVICE_TOKEN must be set in the environment"),
            web_base_url: std::env::var("GITHUB_WEB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WEB_BASE_URL.into()),
            api_base_url: std::env::var("GITHUB_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            base_url,
            admin_logins,
            webhook_secret,
            jwt,
            oauth,
        }
    }
}
