//! HTTP Parameter Client
//!
//! Talks to the backing parameter store over its HTTP API. One client is
//! bound to one region; the region is part of the request path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::client::ParameterClient;
use crate::config::Config;
use crate::error::ClientError;

// == Wire Payloads ==
/// Successful response body for a parameter lookup.
#[derive(Debug, Deserialize)]
struct ParameterPayload {
    /// The raw string value of the parameter
    value: String,
}

/// Error response body returned by the store.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    /// Error message describing what went wrong
    error: String,
}

// == HTTP Parameter Client ==
/// `ParameterClient` backed by the store's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpParameterClient {
    /// Underlying HTTP client with the configured timeout
    http: reqwest::Client,
    /// Base URL of the backing store, no trailing slash
    base_url: String,
    /// Backend region this client is bound to
    region: String,
}

impl HttpParameterClient {
    // == Constructor ==
    /// Creates a client bound to one region of the backing store.
    ///
    /// # Arguments
    /// * `config` - Endpoint and timeout settings
    /// * `region` - The backend region to fetch from
    pub fn new(config: &Config, region: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            region: region.into(),
        })
    }

    /// Returns the region this client is bound to.
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ParameterClient for HttpParameterClient {
    async fn fetch(&self, key: &str, decrypt: bool) -> Result<String, ClientError> {
        let url = format!("{}/v1/{}/parameter", self.base_url, self.region);

        debug!(key, region = %self.region, "fetching parameter from backing store");

        let response = self
            .http
            .get(&url)
            .query(&[("name", key), ("decrypt", if decrypt { "true" } else { "false" })])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::ParameterNotFound {
                key: key.to_owned(),
            });
        }
        if !status.is_success() {
            let message = match response.json::<ErrorPayload>().await {
                Ok(payload) => payload.error,
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ParameterPayload = response.json().await?;
        Ok(payload.value)
    }
}
