//! Collection store configuration.
//!
//! - `STORE_BASE_URL`: Base URL of the backend (default: `http://127.0.0.1:3000`)
//! - `STORE_LIST_PATH`: Path of the paginated list endpoint (default: `/api/collection/list`)
//! - `STORE_STATUS_PATH`: Path of the bulk status endpoint (default: `/api/collection/status`)
//! - `STORE_TIMEOUT_SECONDS`: Request timeout (default: 30)

use std::time::Duration;

use crate::{parse_or, string_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
    pub list_path: String,
    pub status_path: String,
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            list_path: "/api/collection/list".to_string(),
            status_path: "/api/collection/status".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            base_url: string_or(&lookup, "STORE_BASE_URL", &defaults.base_url),
            list_path: string_or(&lookup, "STORE_LIST_PATH", &defaults.list_path),
            status_path: string_or(&lookup, "STORE_STATUS_PATH", &defaults.status_path),
            timeout_seconds: parse_or(&lookup, "STORE_TIMEOUT_SECONDS", defaults.timeout_seconds),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn list_url(&self) -> String {
        join_url(&self.base_url, &self.list_path)
    }

    pub fn status_url(&self) -> String {
        join_url(&self.base_url, &self.status_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.list_url(), "http://127.0.0.1:3000/api/collection/list");
        assert_eq!(
            config.status_url(),
            "http://127.0.0.1:3000/api/collection/status"
        );
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = StoreConfig::from_lookup(|key| match key {
            "STORE_BASE_URL" => Some("https://shop.example.com/".to_string()),
            "STORE_LIST_PATH" => Some("v2/list".to_string()),
            "STORE_TIMEOUT_SECONDS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.list_url(), "https://shop.example.com/v2/list");
        assert_eq!(config.status_path, "/api/collection/status");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = StoreConfig::from_lookup(|key| {
            (key == "STORE_TIMEOUT_SECONDS").then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_debug() {
        let debug_str = format!("{:?}", StoreConfig::default());
        assert!(debug_str.contains("StoreConfig"));
        assert!(debug_str.contains("base_url"));
    }
}
