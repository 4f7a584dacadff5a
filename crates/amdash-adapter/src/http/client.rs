/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::http::{AmdashError, Result};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://amapi.amfoss.in";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the mentorship API
#[derive(Debug, Clone)]
pub struct AmdashClient {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
}

impl AmdashClient {
    /// Create a new client against the production API
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit API host (mock servers, staging)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)?;
        if base_url.cannot_be_a_base() {
            return Err(AmdashError::Config(format!(
                "API base URL cannot carry paths: {trimmed}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL from raw path segments; each segment is percent-encoded.
    ///
    /// A trailing `""` segment produces a trailing slash (`/tracks/`).
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AmdashError::Config("API base URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder for an endpoint URL
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(ACCEPT, "application/json")
    }

    /// Send the request and decode a JSON body, mapping non-2xx to errors
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                AmdashError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                AmdashError::Http(err)
            }
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "api response");

        if !status.is_success() {
            return Err(AmdashError::api_error(status, body));
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_encodes_segments() {
        let client =
            AmdashClient::with_config_and_base_url(ClientConfig::default(), "http://localhost:9/")
                .unwrap();

        let url = client.endpoint_url(&["auth", "user", "a b@example.com"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/auth/user/a%20b@example.com");

        let url = client.endpoint_url(&["tracks", ""]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/tracks/");
    }

    #[test]
    fn endpoint_url_keeps_base_path_prefix() {
        let client = AmdashClient::with_config_and_base_url(
            ClientConfig::default(),
            "http://localhost:9/api//",
        )
        .unwrap();

        let url = client.endpoint_url(&["leaderboard", "3"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/api/leaderboard/3");
    }

    #[test]
    fn rejects_non_base_urls() {
        let err = AmdashClient::with_config_and_base_url(ClientConfig::default(), "mailto:x@y.z")
            .unwrap_err();
        assert!(matches!(err, AmdashError::Config(_)));
    }
}
