//! Runtime configuration resolved from the environment and the store.

use std::time::Duration;

use log::{LevelFilter, warn};

use crate::store::{Store, StoreError, keys};

pub const API_URL_ENV: &str = "CAMPUS_API_URL";
pub const LOG_LEVEL_ENV: &str = "CAMPUS_LOG";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolve from `CAMPUS_API_URL`, then the store, then the defaults.
    pub async fn resolve(store: &Store) -> Result<Self, StoreError> {
        Self::resolve_with(store, std::env::var(API_URL_ENV).ok()).await
    }

    /// Resolve with an explicit environment override.
    pub async fn resolve_with(store: &Store, env_url: Option<String>) -> Result<Self, StoreError> {
        let api_url = match env_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None => store
                .get::<String>(keys::API_BASE_URL)
                .await?
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };
        let secs = store
            .get_or(keys::API_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)
            .await?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(secs),
        })
    }
}

/// Log level named by `value` (`error`..`trace`, `off`), default `debug`.
pub fn log_level(value: Option<&str>) -> LevelFilter {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => LevelFilter::Debug,
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!("Unknown {LOG_LEVEL_ENV} value {v:?}, using debug");
            LevelFilter::Debug
        }),
    }
}
