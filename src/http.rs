//! Transport: request execution with per-call timeout cancellation.
//!
//! A single shared [`reqwest::Client`] issues every request. The deadline
//! is enforced per call by wrapping the send future in
//! [`tokio::time::timeout`]: when the timer expires the future is dropped,
//! which cancels the in-flight request, and the caller receives the
//! synthesized 408 [`ApiError`]. The timer is scoped to the call and
//! released on every exit path.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, Method, Response};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Build the shared HTTP client.
///
/// No builder-level timeout is set; the deadline is applied per call so
/// request options can override it.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client() -> Result<Client> {
    ClientBuilder::new()
        .user_agent(format!("uplink/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::transport(&e))
}

/// Executes requests against the configured backend.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl Transport {
    /// Create a transport from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            default_headers: config.default_headers.clone(),
            timeout: config.timeout,
        })
    }

    /// Execute one request with a bounded wall-clock deadline.
    ///
    /// Default headers are merged with `headers`, caller values taking
    /// precedence on key collision. `timeout` overrides the configured
    /// deadline for this call only.
    ///
    /// # Errors
    ///
    /// - The 408 timeout error when the deadline expires (or the HTTP
    ///   library itself reports a timeout).
    /// - A status-less transport error for any other failure to obtain a
    ///   response; the underlying error text is carried unchanged.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> Result<Response> {
        let deadline = timeout.unwrap_or(self.timeout);

        let mut merged = self.default_headers.clone();
        for (name, value) in headers {
            merged.insert(name, value.clone());
        }

        let mut request = self.client.request(method.clone(), url).headers(merged);
        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        tracing::debug!(%method, url, ?deadline, "sending request");

        match tokio::time::timeout(deadline, request.send()).await {
            Err(_elapsed) => {
                tracing::warn!(%method, url, "request timed out, cancelling");
                Err(ApiError::timeout())
            }
            Ok(Err(e)) if e.is_timeout() => {
                tracing::warn!(%method, url, "request timed out, cancelling");
                Err(ApiError::timeout())
            }
            Ok(Err(e)) => {
                tracing::warn!(%method, url, error = %e, "transport failure");
                Err(ApiError::transport(&e))
            }
            Ok(Ok(response)) => {
                tracing::debug!(%method, url, status = response.status().as_u16(), "response received");
                Ok(response)
            }
        }
    }
}
