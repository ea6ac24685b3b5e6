//! Strongly-typed ID newtypes for collection entities.
//!
//! The collection store identifies every record with an opaque string
//! (`_id`). These newtypes keep a branch id from being passed where a record
//! id is expected.
//!
//! # Example
//!
//! ```
//! use counterdesk_models::ids::{BranchId, EntityId};
//!
//! fn load_row(id: &EntityId) -> &str { id.as_str() }
//!
//! let row = EntityId::from("64b7f0c2a1");
//! let branch = BranchId::from("main");
//!
//! assert_eq!(load_row(&row), "64b7f0c2a1");
//! // load_row(&branch); // Compile error! Type mismatch.
//! # let _ = branch;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to define a strongly-typed string ID newtype.
///
/// Generates the wrapper plus the conversions, formatting and transparent
/// serde representation every id needs.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Get the inner string value.
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Borrow the id as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check if this is an empty ID.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for records fetched from a collection.
    EntityId
);

define_id!(
    /// Strongly-typed ID for Branch entities.
    BranchId
);

define_id!(
    /// Strongly-typed ID for Role entities.
    RoleId
);
