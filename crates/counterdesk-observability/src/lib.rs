//! Counterdesk Observability Module
//!
//! Provides:
//! - Console logging via `tracing-subscriber`
//! - Business counters through the `metrics` facade
//!
//! Counters are recorded against whatever recorder the host installs; with
//! none installed they are no-ops. Set `OBSERVABILITY_ENABLED=false` to skip
//! them entirely.
//!
//! # Examples
//!
//! ```no_run
//! use counterdesk_observability::{init_basic_console_logging, track_list_fetch};
//!
//! init_basic_console_logging();
//! track_list_fetch("sales", true);
//! ```

pub mod basic_logging;
pub mod metrics;

pub use basic_logging::init_basic_console_logging;
pub use metrics::{
    is_observability_enabled, track_access_decision, track_bulk_status_change, track_list_fetch,
};
