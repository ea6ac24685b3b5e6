//! # Counterdesk Core
//!
//! Core types and utilities shared by every counterdesk crate.
//!
//! - [`permissions`]: The closed permission catalog ([`Permission`], [`Module`])
//! - [`pagination`]: Page-window derivation for list screens
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```
//! use counterdesk_core::{PageWindow, Permission};
//!
//! let window = PageWindow::derive(1, 10, 25, 5);
//! assert_eq!(window.next_page, Some(2));
//!
//! assert_eq!(Permission::ListCustomerCount.module().as_str(), "customer");
//! ```

pub mod pagination;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use pagination::{DEFAULT_PAGE_WINDOW, PageWindow};
pub use permissions::{Module, Permission, UnknownModule, UnknownPermission};
