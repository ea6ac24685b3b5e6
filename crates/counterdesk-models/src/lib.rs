//! # Counterdesk Models
//!
//! Domain models and DTOs shared by the counterdesk list screens.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed string ids
//! - [`records`]: Rows fetched from a collection
//! - [`query`]: Wire model of the collection-listing endpoint
//! - [`options`]: Validated mount options and the filter tuple
//! - [`status`]: Bulk status transitions
//!
//! # Example
//!
//! ```
//! use counterdesk_models::{ListQuery, Predicate, Projection, SortOrder, SortSpec};
//!
//! let query = ListQuery {
//!     schema: "customer".into(),
//!     condition: Predicate::new().with("status", "active"),
//!     select: Projection::All,
//!     sort: SortSpec::new("createdAt", SortOrder::Descending),
//!     page: 1,
//!     limit: 10,
//!     join_foreign_keys: false,
//! };
//! let pairs = query.to_query_pairs().unwrap();
//! assert_eq!(pairs[0], ("schema", "customer".to_string()));
//! ```

pub mod ids;
pub mod options;
pub mod query;
pub mod records;
pub mod status;

// Re-export commonly used types at crate root for convenience
pub use ids::{BranchId, EntityId, RoleId};
pub use options::{ALL_VIEW, FilterSelection, ListOptions, is_unfiltered_view};
pub use query::{
    InvalidSortOrder, ListPage, ListQuery, Predicate, Projection, SortOrder, SortSpec,
    StatusChange, StatusChangeResponse,
};
pub use records::Record;
pub use status::{DELETED_VIEW, StatusTransition, UnknownStatus};
