//! Response decoding: status and content-type negotiation.
//!
//! [`decode`] turns a completed response into a typed [`Payload`] or a
//! classified [`ApiError`]. The order matters: error statuses are handled
//! first (they always raise), then 204, then content-type dispatch —
//! so a plain-text success body is never force-parsed as JSON.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Successfully decoded response payload. Exactly one form is produced per
/// response, never a partial decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    /// Parsed `application/json` body.
    Json(T),
    /// Raw text body (`text/plain`, or the fallback for unrecognized
    /// content types).
    Text(String),
    /// Absence-of-content marker for HTTP 204.
    Empty,
}

impl<T> Payload<T> {
    /// The parsed JSON value, if this payload is one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&T> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The raw text, if this payload is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is the absence-of-content marker.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Conventional error body shape: both fields are optional, anything else
/// in the body is ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Decode a completed response into a typed payload.
///
/// # Errors
///
/// - Non-2xx status: always raises, carrying the response status and the
///   body's `message` field when the body is JSON with one, otherwise a
///   generic `"Error {status}: {reason}"` message. A `code` member in the
///   body is attached when present.
/// - Parse failure on a success response: raises a status-less decode
///   error.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<Payload<T>> {
    let status = response.status();

    if !status.is_success() {
        return Err(error_from_response(response).await);
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(Payload::Empty);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if content_type.contains("application/json") {
        response.json::<T>().await.map(Payload::Json).map_err(|e| {
            tracing::debug!(error = %e, "JSON body rejected");
            ApiError::decode("failed to decode JSON response")
        })
    } else if content_type.contains("text/plain") {
        response
            .text()
            .await
            .map(Payload::Text)
            .map_err(|_| ApiError::decode("failed to decode text response"))
    } else {
        // Unset or unrecognized content type: fall back to raw text.
        response
            .text()
            .await
            .map(Payload::Text)
            .map_err(|_| ApiError::decode("failed to decode response"))
    }
}

/// Build the error for a non-2xx response, preferring the body's own
/// message over the generic fallback.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let fallback = format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("unknown error")
    );

    match response.json::<ErrorBody>().await {
        Ok(body) => {
            let message = body.message.unwrap_or(fallback);
            let error = ApiError::http(status.as_u16(), message);
            match body.code {
                Some(code) => error.with_code(code),
                None => error,
            }
        }
        Err(_) => ApiError::http(status.as_u16(), fallback),
    }
}
