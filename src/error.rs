//! The uniform error value for all request failures.
//!
//! Every failure in this crate — timeout, HTTP error status, decode
//! failure, or underlying transport failure — is represented by the single
//! [`ApiError`] value. There is no variant hierarchy: callers branch on the
//! presence or absence of [`ApiError::status`] and [`ApiError::code`]
//! rather than on error identity.
//!
//! ## Taxonomy
//!
//! - **Timeout**: the per-call deadline expired; status fixed at 408.
//! - **HTTP**: the server answered with a non-2xx status; `status` carries
//!   the server's code, `message` comes from the response body when the
//!   body provides one.
//! - **Decode**: the response body could not be parsed in the form implied
//!   by its content type; no status.
//! - **Transport**: the request never produced a response (connection
//!   refused, DNS failure); the underlying error text is carried unchanged.

use thiserror::Error;

/// Status code synthesized for client-side timeouts. Never actually
/// received from the backend.
pub const TIMEOUT_STATUS: u16 = 408;

/// Uniform error value carrying a human-readable message, an optional HTTP
/// status, and an optional machine-readable code.
///
/// Immutable once constructed; created at the failure point and passed by
/// value up the call chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<u16>,
    code: Option<String>,
}

impl ApiError {
    fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            // Invariant: the message is always non-empty.
            message = "request failed".to_string();
        }
        Self {
            message,
            status,
            code: None,
        }
    }

    /// Timer expiry before a response arrived.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new("request timed out", Some(TIMEOUT_STATUS))
    }

    /// Response received with a non-2xx status.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(message, Some(status))
    }

    /// Response body could not be parsed in its declared form.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    /// Underlying network failure unrelated to timeout. The source's text
    /// is carried unchanged, not reclassified.
    #[must_use]
    pub fn transport(source: &impl std::fmt::Display) -> Self {
        Self::new(source.to_string(), None)
    }

    /// Attach a machine-readable code (e.g. extracted from an error body).
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The human-readable message. Never empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status, when this failure has one. 408 marks a client-side
    /// timeout.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// The machine-readable code, when the backend supplied one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether this error is the synthesized timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.status, Some(TIMEOUT_STATUS))
    }
}

/// Result type alias for uplink operations.
pub type Result<T> = std::result::Result<T, ApiError>;
