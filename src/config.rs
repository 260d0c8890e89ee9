//! Backend configuration and endpoint resolution.
//!
//! Settings are resolved once at construction time with the following
//! precedence (highest first):
//!
//! 1. Values set explicitly on [`ApiConfig`]
//! 2. Environment variables
//! 3. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `UPLINK_BASE_URL`: Backend base URL (e.g. `https://api.example.com`)
//! - `UPLINK_TIMEOUT_MS`: Request timeout in milliseconds

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the backend base URL.
pub const ENV_BASE_URL: &str = "UPLINK_BASE_URL";
/// Environment variable for the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "UPLINK_TIMEOUT_MS";

// =============================================================================
// Defaults
// =============================================================================

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

// =============================================================================
// Configuration
// =============================================================================

/// Resolved client configuration: where to send requests, how long to wait,
/// and which headers every request carries by default.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend all requests are issued against.
    pub base_url: String,
    /// Wall-clock deadline applied to each request.
    pub timeout: Duration,
    /// Headers merged into every request; caller-supplied headers take
    /// precedence on key collision.
    pub default_headers: HeaderMap,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: default_headers(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration for the given base URL with default timeout
    /// and headers.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Resolve configuration from the environment, falling back to the
    /// built-in defaults. Values are read once; there is no hot reload.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = read_env(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = read_env(ENV_TIMEOUT_MS)
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_millis);

        Self {
            base_url,
            timeout,
            default_headers: default_headers(),
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve a relative path into an absolute request URL.
    ///
    /// Exactly one separator joins the two parts: a single trailing slash
    /// on the base and a single leading slash on the path are stripped
    /// before joining.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{base}/{path}")
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[allow(unsafe_code)]
    fn with_env_var(key: &str, value: &str, f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap();
        let prior = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        f();
        match prior {
            Some(val) => unsafe {
                std::env::set_var(key, val);
            },
            None => unsafe {
                std::env::remove_var(key);
            },
        }
    }

    #[test]
    fn defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(
            config.default_headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn endpoint_joins_with_single_separator() {
        let config = ApiConfig::new("http://localhost:3001");
        assert_eq!(config.endpoint("/status"), "http://localhost:3001/status");
        assert_eq!(config.endpoint("status"), "http://localhost:3001/status");

        let config = ApiConfig::new("http://localhost:3001/");
        assert_eq!(config.endpoint("/status"), "http://localhost:3001/status");
        assert_eq!(config.endpoint("status"), "http://localhost:3001/status");
    }

    #[test]
    fn endpoint_strips_only_one_slash() {
        let config = ApiConfig::new("http://localhost:3001//");
        assert_eq!(config.endpoint("//status"), "http://localhost:3001///status");
    }

    #[test]
    fn endpoint_with_nested_path() {
        let config = ApiConfig::new("https://api.example.com/v1");
        assert_eq!(config.endpoint("/item/1"), "https://api.example.com/v1/item/1");
    }

    #[test]
    fn from_env_reads_base_url() {
        with_env_var(ENV_BASE_URL, "https://backend.test", || {
            let config = ApiConfig::from_env();
            assert_eq!(config.base_url, "https://backend.test");
        });
    }

    #[test]
    fn from_env_reads_timeout_ms() {
        with_env_var(ENV_TIMEOUT_MS, "2500", || {
            let config = ApiConfig::from_env();
            assert_eq!(config.timeout, Duration::from_millis(2500));
        });
    }

    #[test]
    fn from_env_ignores_invalid_timeout() {
        with_env_var(ENV_TIMEOUT_MS, "soon", || {
            let config = ApiConfig::from_env();
            assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        });
    }
}
