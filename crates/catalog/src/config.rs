use std::{env, num::NonZeroUsize, time::Duration};

use catalog_core::retry::RetryPolicy;

use crate::decorators::FallbackPolicy;

/// Pipeline configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote catalog service (default: "http://localhost:3000")
    pub catalog_url: String,
    /// Bearer token sent to the remote, if any
    pub api_token: Option<String>,
    /// Remote request timeout in milliseconds (default: 5,000)
    pub timeout_ms: u64,
    /// Maximum number of cached products, 0 for unbounded (default: 0)
    pub cache_max_entries: usize,
    /// Total attempts per operation, including the first (default: 3)
    pub retry_max_attempts: u32,
    /// Delay before the first retry in milliseconds (default: 100)
    pub retry_base_delay_ms: u64,
    /// Upper bound on any retry delay in milliseconds (default: 2,000)
    pub retry_max_delay_ms: u64,
    /// Serve reads from the local store when the remote fails (default: true)
    pub offline_fallback: bool,
    /// Path to the SQLite local store (default: "catalog.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    pub sqlite_path: String,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CATALOG_URL` - Remote base URL (default: "http://localhost:3000")
    /// - `CATALOG_API_TOKEN` - Bearer token (default: unset)
    /// - `CATALOG_TIMEOUT_MS` - Remote request timeout (default: 5000)
    /// - `CACHE_MAX_ENTRIES` - Cache bound, 0 for unbounded (default: 0)
    /// - `RETRY_MAX_ATTEMPTS` - Attempts per operation (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - First retry delay (default: 100)
    /// - `RETRY_MAX_DELAY_MS` - Retry delay cap (default: 2000)
    /// - `OFFLINE_FALLBACK` - Fall back to local reads on remote failure (default: true)
    /// - `SQLITE_PATH` - SQLite local store path (default: "catalog.db")
    pub fn from_env() -> Self {
        Self {
            catalog_url: env::var("CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            api_token: env::var("CATALOG_API_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_ms: parse_var("CATALOG_TIMEOUT_MS", 5_000),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", 0),
            retry_max_attempts: parse_var("RETRY_MAX_ATTEMPTS", 3),
            retry_base_delay_ms: parse_var("RETRY_BASE_DELAY_MS", 100),
            retry_max_delay_ms: parse_var("RETRY_MAX_DELAY_MS", 2_000),
            offline_fallback: parse_var("OFFLINE_FALLBACK", true),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "catalog.db".to_string()),
        }
    }

    /// Get the remote request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache bound, `None` meaning unbounded.
    pub fn cache_capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.cache_max_entries)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.retry_max_attempts)
            .with_base_delay(Duration::from_millis(self.retry_base_delay_ms))
            .with_max_delay(Duration::from_millis(self.retry_max_delay_ms))
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.offline_fallback {
            FallbackPolicy::LocalOnTransportError
        } else {
            FallbackPolicy::Disabled
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
