//! HTTP client for calendar reads.
//!
//! This module provides the low-level client that handles:
//! - GET requests with a configured timeout and user agent
//! - Mapping of HTTP status codes to provider errors

use reqwest::{Client, Response, StatusCode};
use tracing::{trace, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::source::{BoxFuture, CalendarSource};

use super::config::HttpSourceConfig;

/// Name reported by [`HttpCalendarSource::name`] and attached to its errors.
const SOURCE_NAME: &str = "http";

/// HTTP calendar source.
pub struct HttpCalendarSource {
    /// The underlying HTTP client.
    client: Client,
    /// Configuration.
    config: HttpSourceConfig,
}

impl HttpCalendarSource {
    /// Creates a new HTTP source with the given configuration.
    pub fn new(config: HttpSourceConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("Failed to create HTTP client: {}", e))
                    .with_provider(SOURCE_NAME)
            })?;

        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    /// Sends the GET request and returns the body of a successful response.
    async fn fetch(&self, url: &str) -> ProviderResult<String> {
        trace!(url = %url, "Sending request");

        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request timed out after {:?}", self.config.timeout)
            } else {
                format!("Request failed: {}", e)
            };
            ProviderError::network(message)
                .with_provider(SOURCE_NAME)
                .with_source(e)
        })?;

        self.handle_response(response)
            .await
            .map_err(|e| e.with_provider(SOURCE_NAME))
    }

    /// Handles the HTTP response and extracts the body.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        match status {
            s if s.is_success() => response
                .text()
                .await
                .map_err(|e| ProviderError::network(format!("Failed to read response: {}", e))),
            StatusCode::NOT_FOUND => Err(ProviderError::not_found(format!(
                "Calendar not found at {}",
                response.url()
            ))),
            StatusCode::TOO_MANY_REQUESTS => {
                Err(ProviderError::rate_limited("Too many requests to server"))
            }
            s if s.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(ProviderError::server(format!(
                    "Server error ({}): {}",
                    s, body
                )))
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %s, body = %body, "Unexpected response status");
                Err(ProviderError::invalid_response(format!(
                    "Unexpected status {}: {}",
                    s, body
                )))
            }
        }
    }
}

impl CalendarSource for HttpCalendarSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(self.fetch(url))
    }
}
