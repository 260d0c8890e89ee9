//! Client facade: one operation per HTTP method.
//!
//! Each operation resolves the absolute URL, JSON-serializes the body when
//! one is given, delegates to the [`Transport`], and pipes the result
//! through the response decoder. Errors propagate unchanged — the facade
//! performs no additional wrapping.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::decode::{Payload, decode};
use crate::error::{ApiError, Result};
use crate::http::Transport;

// =============================================================================
// Request Options
// =============================================================================

/// Per-call overrides for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers merged over the configured defaults; these win on key
    /// collision.
    pub headers: HeaderMap,
    /// Deadline override for this call only.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Empty options: default headers and the configured timeout apply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header that overrides any default with the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the deadline for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Conventional response envelope used by the backend for structured
/// payloads. Provided for consumers whose endpoints wrap data this way;
/// the client itself does not require it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub success: bool,
}

// =============================================================================
// Client
// =============================================================================

/// Typed client for the configured backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    transport: Transport,
}

impl ApiClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = Transport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET a resource.
    ///
    /// # Errors
    ///
    /// Propagates the transport or decode [`ApiError`] unchanged.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<Payload<T>> {
        self.request(Method::GET, path, None, opts).await
    }

    /// POST with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Propagates the transport or decode [`ApiError`] unchanged; body
    /// serialization failure raises a status-less error.
    pub async fn post<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(encode_body).transpose()?;
        self.request(Method::POST, path, body, opts).await
    }

    /// PUT with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Propagates the transport or decode [`ApiError`] unchanged; body
    /// serialization failure raises a status-less error.
    pub async fn put<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(encode_body).transpose()?;
        self.request(Method::PUT, path, body, opts).await
    }

    /// PATCH with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Propagates the transport or decode [`ApiError`] unchanged; body
    /// serialization failure raises a status-less error.
    pub async fn patch<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        opts: RequestOptions,
    ) -> Result<Payload<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map(encode_body).transpose()?;
        self.request(Method::PATCH, path, body, opts).await
    }

    /// DELETE a resource.
    ///
    /// # Errors
    ///
    /// Propagates the transport or decode [`ApiError`] unchanged.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<Payload<T>> {
        self.request(Method::DELETE, path, None, opts).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        opts: RequestOptions,
    ) -> Result<Payload<T>> {
        let url = self.config.endpoint(path);
        let response = self
            .transport
            .execute(method, &url, &opts.headers, body, opts.timeout)
            .await?;
        decode(response).await
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| ApiError::decode(format!("failed to encode request body as JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder_sets_header_and_timeout() {
        let opts = RequestOptions::new()
            .with_header(
                HeaderName::from_static("x-api-key"),
                HeaderValue::from_static("secret"),
            )
            .with_timeout(Duration::from_millis(250));

        assert_eq!(opts.headers.get("x-api-key").unwrap(), "secret");
        assert_eq!(opts.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn envelope_roundtrips() {
        let envelope = ApiEnvelope {
            data: vec![1, 2, 3],
            message: Some("ok".to_string()),
            success: true,
        };

        let json = serde_json::to_string(&envelope).unwrap();
        let back: ApiEnvelope<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn envelope_omits_absent_message() {
        let envelope = ApiEnvelope {
            data: 1,
            message: None,
            success: false,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("message"));
    }

    #[test]
    fn encode_body_rejects_unserializable_values() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], "non-string keys cannot be JSON object keys");
        let err = encode_body(&map).unwrap_err();
        assert!(err.message().starts_with("failed to encode request body"));
        assert_eq!(err.status(), None);
    }
}
