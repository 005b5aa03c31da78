//! Runtime configuration for the refund service
//!
//! Defaults can be overridden through environment variables:
//!   RATES_PATH, COMPARABLES_URL, COMPARABLES_TIMEOUT_SECS

use crate::rates::DEFAULT_RATES_PATH;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the comparables service
pub const DEFAULT_COMPARABLES_URL: &str = "http://localhost:8082";

/// Default timeout for a comparables request
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct RefundConfig {
    /// CSV file with `Year,Rate` rows
    pub rates_path: PathBuf,

    /// Base URL of the comparables service (`{url}/comp?pin=...`)
    pub comparables_url: String,

    pub request_timeout_secs: u64,
}

impl Default for RefundConfig {
    fn default() -> Self {
        Self {
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            comparables_url: DEFAULT_COMPARABLES_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RefundConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("RATES_PATH").filter(|s| !s.trim().is_empty()) {
            config.rates_path = PathBuf::from(path);
        }

        if let Some(url) = lookup("COMPARABLES_URL").filter(|s| !s.trim().is_empty()) {
            config.comparables_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("COMPARABLES_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => config.request_timeout_secs = secs,
                Err(_) => log::warn!(
                    "Ignoring COMPARABLES_TIMEOUT_SECS={:?}; using {}s",
                    raw,
                    config.request_timeout_secs
                ),
            }
        }

        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
