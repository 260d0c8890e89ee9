//! uplink - Typed HTTP client for a single configured backend.
//!
//! Issues requests with per-call timeout cancellation, negotiates response
//! decoding by content type, classifies every failure into the uniform
//! [`ApiError`] value, and exposes request lifecycle as observable state
//! for a UI layer.
//!
//! ```no_run
//! use uplink::{ApiClient, ApiConfig, RequestOptions, RequestTracker};
//!
//! # async fn run() -> uplink::Result<()> {
//! let client = ApiClient::new(ApiConfig::from_env())?;
//! let tracker: RequestTracker<serde_json::Value> = RequestTracker::new(client);
//!
//! let status = tracker.get("/status", RequestOptions::new()).await?;
//! assert!(tracker.is_success());
//! assert!(status.as_json().is_some());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod state;

pub use client::{ApiClient, ApiEnvelope, RequestOptions};
pub use config::ApiConfig;
pub use decode::Payload;
pub use error::{ApiError, Result};
pub use state::{Lifecycle, RequestSnapshot, RequestTracker};
