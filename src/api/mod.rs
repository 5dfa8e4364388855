//! HTTP client for the order service.
//!
//! One `OrderApi` per authenticated viewer: the bearer token is set as a
//! default header on the shared `reqwest::Client`. Order operations live
//! in [`orders`].

pub mod orders;

use std::time::Duration;

use crate::config::{ConfigError, OrderApiConfig};
use crate::error::OrderClientError;

/// Client for the order service's `/api` scope.
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: reqwest::Client,
    base_url: url::Url,
}

impl OrderApi {
    /// Build a client from configuration.
    pub fn new(config: OrderApiConfig) -> Result<Self, OrderClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| OrderClientError::Config(ConfigError::InvalidToken))?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| OrderClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        // Route building appends to the base's Display form, so the path
        // must end with a slash (`https://host/v2` would otherwise yield
        // `https://host/v2api/orders`).
        let mut base_url = config.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    /// Base URL of the order service, also used to resolve deliverable
    /// file paths via [`crate::models::orders::DeliverableFile::download_url`].
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }
}
