//! HTTP transport for the profile document.

use std::{error::Error as StdError, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{error::TransportError, protocol::ApiResponse};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::ClientBuildError};

/// Source of the raw profile envelope.
#[async_trait]
pub trait ProfileTransport: Send + Sync {
    async fn fetch_profile_document(&self) -> Result<ApiResponse, TransportError>;
}

pub struct HttpProfileClient {
    http: Client,
    endpoint: Url,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl HttpProfileClient {
    /// Builds the underlying HTTP client with the given timeouts, so the
    /// durations reported in [`TransportError::Timeout`] are the ones enforced.
    pub fn new(
        endpoint: Url,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            request_timeout,
            connect_timeout,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientBuildError> {
        let endpoint = settings.endpoint()?;
        Ok(Self::new(
            endpoint,
            settings.request_timeout(),
            settings.connect_timeout(),
        )?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            if err.is_connect() {
                TransportError::Timeout(self.connect_timeout)
            } else {
                TransportError::Timeout(self.request_timeout)
            }
        } else if err.is_connect() {
            TransportError::Connect(root_cause(&err))
        } else if err.is_decode() || err.is_body() {
            TransportError::Decode(root_cause(&err))
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl ProfileTransport for HttpProfileClient {
    async fn fetch_profile_document(&self) -> Result<ApiResponse, TransportError> {
        debug!(endpoint = %self.endpoint, "fetching profile document");

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|err| self.map_error(err))?;

        let status = response.status();
        debug!(%status, "profile endpoint responded");
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response.bytes().await.map_err(|err| self.map_error(err))?;
        serde_json::from_slice(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

/// Innermost message of an error chain, which for connect failures is the OS error text.
fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
