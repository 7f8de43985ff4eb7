//! Client configuration resolved from the environment.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Non-forced snapshot refreshes inside this window are suppressed.
pub const DEFAULT_REFRESH_DEBOUNCE_MS: u64 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
    pub refresh_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            refresh_debounce: Duration::from_millis(DEFAULT_REFRESH_DEBOUNCE_MS),
        }
    }
}

impl ClientConfig {
    /// Read `KINGDOM_*` variables, falling back to defaults for anything unset
    /// or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let millis = |name: &str, default: u64| {
            non_blank(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(default))
        };

        Self {
            api_base_url: non_blank("KINGDOM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            auth_token: non_blank("KINGDOM_AUTH_TOKEN"),
            request_timeout: millis("KINGDOM_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS),
            refresh_debounce: millis("KINGDOM_REFRESH_DEBOUNCE_MS", DEFAULT_REFRESH_DEBOUNCE_MS),
        }
    }
}
