//! Order service client configuration.
//!
//! Loaded from environment variables in the binary; constructed
//! explicitly in tests so they can point at a mock server.

use url::Url;

/// Configuration for connecting to the order service.
///
/// Custom `Debug` implementation redacts `api_token` to keep the bearer
/// token out of log output.
#[derive(Clone)]
pub struct OrderApiConfig {
    /// Base URL of the order service, e.g. `https://api.worklane.dev`.
    /// Routes live under its `/api` scope.
    pub base_url: Url,
    /// Bearer token for the authenticated viewer. Auth itself (token
    /// issuance, validation) is outside this crate.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OrderApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OrderApiConfig {
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: api_token.into(),
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `WORKLANE_API_URL` (default: `http://localhost:8080`)
    /// - `WORKLANE_API_TOKEN` (required)
    /// - `WORKLANE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token =
            std::env::var("WORKLANE_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        let raw_url =
            std::env::var("WORKLANE_API_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("WORKLANE_API_URL".into(), e.to_string()))?;

        let timeout_secs = std::env::var("WORKLANE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            api_token,
            timeout_secs,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WORKLANE_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("WORKLANE_API_TOKEN contains characters not allowed in an Authorization header")]
    InvalidToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
