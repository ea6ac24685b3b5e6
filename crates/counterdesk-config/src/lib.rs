//! # Counterdesk Config
//!
//! Configuration types for counterdesk list screens.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`list`]: list controller defaults (page size, page window, view field)
//! - [`store`]: location and timeout of the collection store
//!
//! # Example
//!
//! ```ignore
//! use counterdesk_config::{ListConfig, StoreConfig};
//!
//! // Load all configs from environment
//! let list_config = ListConfig::from_env();
//! let store_config = StoreConfig::from_env();
//! ```

pub mod list;
pub mod store;

// Re-export commonly used types at crate root
pub use list::ListConfig;
pub use store::StoreConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when unset or unparseable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Like [`parse_or`] for string values; blank values count as unset.
pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
