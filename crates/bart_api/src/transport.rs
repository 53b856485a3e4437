//! HTTP transport
//!
//! [`HttpExecutor`] is the seam between the client and the network. The
//! stock implementation wraps a `reqwest::Client`; tests and callers that need
//! to intercept traffic can supply their own.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::BartError;
use crate::request::ApiRequest;

/// A fully-read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code. Not interpreted by the client.
    pub status: u16,
    /// Complete response body
    pub body: Bytes,
}

/// Capability to perform an HTTP GET and read the whole body
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Fetch `url`, returning the status and the full body
    async fn get(&self, url: &str) -> Result<HttpResponse, BartError>;
}

/// Default [`HttpExecutor`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create an executor with an optional request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, BartError> {
        let mut builder =
            Client::builder().user_agent(concat!("bart_api/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BartError::ConfigurationError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn get(&self, url: &str) -> Result<HttpResponse, BartError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Stand-in for a stock executor whose `reqwest` client failed to build.
/// Every request fails with the build error.
#[derive(Debug, Clone)]
pub(crate) struct UnavailableExecutor {
    reason: String,
}

impl UnavailableExecutor {
    pub(crate) const fn new(reason: String) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl HttpExecutor for UnavailableExecutor {
    async fn get(&self, _url: &str) -> Result<HttpResponse, BartError> {
        Err(BartError::ConfigurationError(self.reason.clone()))
    }
}

/// Stock executor without a timeout, or an [`UnavailableExecutor`] if the
/// HTTP client cannot be initialized
pub(crate) fn stock_executor() -> Arc<dyn HttpExecutor> {
    match ReqwestExecutor::new(None) {
        Ok(executor) => Arc::new(executor),
        Err(e) => {
            warn!(error = %e, "HTTP client unavailable, requests will fail");
            Arc::new(UnavailableExecutor::new(e.to_string()))
        },
    }
}

/// Shared request pipeline used by every façade: build URL, fetch, decode
#[derive(Debug, Clone)]
pub struct Transport {
    config: Arc<ClientConfig>,
}

impl Transport {
    pub(crate) const fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Point the pipeline at another origin, leaving the rest of the
    /// configuration untouched
    pub(crate) fn with_base_url(&self, base_url: String) -> Self {
        let mut config = (*self.config).clone();
        config.base_url = base_url;
        Self::new(Arc::new(config))
    }

    /// Run one request and decode the response's `root` into `T`
    #[instrument(skip(self, request), fields(path = request.path(), cmd = request.cmd()))]
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, BartError> {
        let url = request.url(&self.config.base_url, &self.config.key);
        debug!(options = ?request, "Requesting BART API");

        let response = self.config.http.get(&url).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "BART API responded"
        );

        envelope::decode(&response.body)
    }
}
