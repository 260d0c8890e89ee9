//! Test logging infrastructure for structured test output and debugging.
#![allow(dead_code)]
//!
//! Provides a `TestLogger` for structured logging during tests with
//! per-test duration tracking and phase tracking (setup, execute, verify).
//!
//! # Environment Variables
//!
//! - `TEST_LOG_LEVEL` - Set log level: debug, info (default: info)

use std::fmt::Display;
use std::sync::Mutex;
use std::time::Instant;

use chrono::Utc;

/// Log severity for test output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

fn min_level() -> LogLevel {
    match std::env::var("TEST_LOG_LEVEL").ok().as_deref() {
        Some("debug" | "trace") => LogLevel::Debug,
        _ => LogLevel::Info,
    }
}

/// Per-test logger with structured output and duration tracking.
///
/// Create one `TestLogger` per test function to track timing and phases.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
    current_phase: Mutex<String>,
}

impl TestLogger {
    /// Create a new test logger named after the test function.
    #[must_use]
    pub fn new(test_name: &str) -> Self {
        let logger = Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
            current_phase: Mutex::new("init".to_string()),
        };
        logger.log(LogLevel::Info, "Test starting");
        logger
    }

    /// Set the current test phase. Common phases: "setup", "execute",
    /// "verify".
    pub fn phase(&self, phase: &str) {
        if let Ok(mut current) = self.current_phase.lock() {
            *current = phase.to_string();
        }
        self.log(LogLevel::Debug, &format!("Phase: {phase}"));
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log an HTTP request (for HTTP tests).
    pub fn http_request(&self, method: &str, url: &str) {
        self.debug(&format!("HTTP {method} {url}"));
    }

    /// Mark test as passed with duration.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish_ok(&self) {
        let duration_ms = self.start_time.elapsed().as_millis() as u64;
        self.log(LogLevel::Info, &format!("Test passed (duration: {duration_ms}ms)"));
    }

    /// Mark test as failed with reason.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish_err(&self, reason: &str) {
        let duration_ms = self.start_time.elapsed().as_millis() as u64;
        self.log(
            LogLevel::Error,
            &format!("Test FAILED: {reason} (duration: {duration_ms}ms)"),
        );
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < min_level() {
            return;
        }
        let ts = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        eprintln!("[{ts}] [{level}] [{}] {message}", self.test_name);
    }
}
