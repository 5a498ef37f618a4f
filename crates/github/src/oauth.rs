//! OAuth client configuration and authorize-URL building.
//!
//! Base URLs are configurable so tests can point the client at a local mock
//! server instead of `github.com` / `api.github.com`.

/// Default GitHub web base URL (OAuth authorize + token endpoints).
pub const DEFAULT_WEB_BASE_URL: &str = "https://github.com";

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// OAuth scopes requested at login: identity plus read access to email
/// addresses and organization membership.
pub const LOGIN_SCOPES: &str = "user:email,read:org";

/// GitHub OAuth application credentials and endpoint configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// OAuth application client id.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: String,
    /// Access token of the service account used to post commit statuses
    /// and manage webhooks on linked repositories.
    pub service_token: String,
    /// Base URL for `github.com` endpoints (no trailing slash).
    pub web_base_url: String,
    /// Base URL for `api.github.com` endpoints (no trailing slash).
    pub api_base_url: String,
}

impl OAuthConfig {
    /// Build the authorize URL the browser is redirected to at login.
    /// Query values are percent-encoded.
    ///
    /// # Panics
    ///
    /// Panics if `web_base_url` is not a valid URL.
    pub fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        let mut url =
            reqwest::Url::parse(&self.web_base_url).expect("web_base_url must be a valid URL");
        url.set_path("/login/oauth/authorize");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", LOGIN_SCOPES)
            .append_pair("state", state)
            .append_pair("redirect_uri", redirect_uri);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            service_token: "service-token".into(),
            web_base_url: DEFAULT_WEB_BASE_URL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }

    #[test]
    fn test_authorize_url_encodes_query_values() {
        let url = config().authorize_url("abc123", "https://cla.example.com/callback");
        assert_eq!(
            url,
            "https://github.com/login/oauth/authorize?client_id=client-id&scope=user%3Aemail%2Cread%3Aorg&state=abc123&redirect_uri=https%3A%2F%2Fcla.example.com%2Fcallback"
        );
    }
}
