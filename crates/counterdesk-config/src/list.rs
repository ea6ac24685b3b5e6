//! List controller configuration.
//!
//! # Configuration
//!
//! - `LIST_DEFAULT_LIMIT`: Page size when a screen does not set one (default: 10)
//! - `LIST_MAX_LIMIT`: Largest page size a user may pick (default: 100)
//! - `LIST_PAGE_WINDOW`: Page links shown by the pagination control (default: 5)
//! - `LIST_CONDITION_FIELD`: Record field a condition view filters on (default: `status`)

use counterdesk_core::pagination::DEFAULT_PAGE_WINDOW;

use crate::{parse_or, string_or};

/// Defaults applied to every list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub default_limit: u64,
    pub max_limit: u64,
    pub page_window: u64,

    /// Field matched against the selected condition view, e.g. `status = "deleted"`.
    pub condition_field: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            page_window: DEFAULT_PAGE_WINDOW,
            condition_field: "status".to_string(),
        }
    }
}

impl ListConfig {
    /// Creates a new `ListConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// Zero sizes fall back to their defaults and the default limit is
    /// capped at `max_limit`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_limit = match parse_or(&lookup, "LIST_MAX_LIMIT", defaults.max_limit) {
            0 => defaults.max_limit,
            n => n,
        };
        let default_limit = match parse_or(&lookup, "LIST_DEFAULT_LIMIT", defaults.default_limit) {
            0 => defaults.default_limit,
            n => n,
        }
        .min(max_limit);
        let page_window = match parse_or(&lookup, "LIST_PAGE_WINDOW", defaults.page_window) {
            0 => defaults.page_window,
            n => n,
        };

        Self {
            default_limit,
            max_limit,
            page_window,
            condition_field: string_or(&lookup, "LIST_CONDITION_FIELD", &defaults.condition_field),
        }
    }

    /// Clamps a requested page size to `1..=max_limit`.
    pub fn clamp_limit(&self, limit: u64) -> u64 {
        limit.clamp(1, self.max_limit)
    }
}
