use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiKey, DomainError};
use crate::ports::HttpClient;

/// reqwest-backed HTTP client with a fixed per-request timeout.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent(format!("itinerary/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))?;

        debug!(timeout_secs = timeout.as_secs(), "HTTP client initialized");

        Ok(Self { client })
    }

    /// Only http(s) URLs with a host are sent.
    fn check_url(url: &str) -> Result<(), DomainError> {
        let parsed = Url::parse(url).map_err(|e| DomainError::HttpRequest(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            warn!(url = url, "Request blocked: unsupported scheme");
            return Err(DomainError::HttpRequest(format!(
                "Unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(DomainError::HttpRequest("Invalid URL: no host".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json<T: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        url: &str,
        token: &ApiKey,
        body: &T,
    ) -> Result<R, DomainError> {
        Self::check_url(url)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token.expose())
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = url, status = status.as_u16(), "HTTP request rejected");
            return Err(DomainError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::HttpRequest(e.to_string()))
    }
}
