//! # Counterdesk
//!
//! Shared core of the counterdesk back-office screens: who may do what, and
//! how a list screen queries its collection.
//!
//! ## Overview
//!
//! - **Permissions**: a closed catalog of permission identifiers grouped into
//!   modules ([`counterdesk_core::permissions`])
//! - **Access evaluation**: [`counterdesk_auth::AccessEvaluator`] decides a
//!   permission for a session, including branch scoping of `edit_*` actions
//! - **List screens**: [`list::ListQueryController`] drives filtering,
//!   pagination, search, selection and bulk status changes against a
//!   [`list::CollectionStore`]
//! - **Controls**: the filter accordion and page links ([`controls`])
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # `counterdesk` command line
//! ├── controls/         # FilterControl, PaginationControl
//! └── list/             # Controller, state, store seam, HTTP adapter
//! crates/
//! ├── counterdesk-core/          # Permission catalog, page window, serde helpers
//! ├── counterdesk-models/        # Ids, records, list query wire model
//! ├── counterdesk-auth/          # Session types, access evaluator
//! ├── counterdesk-config/        # Environment configuration
//! └── counterdesk-observability/ # Logging and counters
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! STORE_BASE_URL=http://localhost:3000
//! LIST_DEFAULT_LIMIT=10
//! ```
//!
//! ```bash
//! counterdesk can edit_product --admin --branch north
//! counterdesk list sale --condition active --search "acme" --role-file clerk.json
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface
//! - [`controls`]: Filter and pagination controls
//! - [`list`]: List query controller and collection stores

pub mod cli;
pub mod controls;
pub mod list;

// Re-export workspace crates for convenience
pub use counterdesk_auth;
pub use counterdesk_config;
pub use counterdesk_core;
pub use counterdesk_models;
pub use counterdesk_observability;
