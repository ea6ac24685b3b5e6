//! # Counterdesk Auth
//!
//! Session types and the access evaluator for counterdesk screens.
//!
//! This crate provides:
//!
//! - [`session`]: [`SessionContext`], [`User`], [`Role`] and [`BranchRef`]
//! - [`evaluator`]: [`AccessEvaluator`] and its [`Decision`] / [`AccessError`] types
//!
//! The session is passed to the evaluator explicitly; nothing here reads
//! process-wide state.
//!
//! # Example
//!
//! ```
//! use counterdesk_auth::{AccessEvaluator, BranchRef, Role, SessionContext, User};
//! use counterdesk_core::Permission;
//!
//! let role = Role::with_permissions("clerk", [Permission::ListCustomer, Permission::EditCustomer]);
//! let user = User::with_role(role).in_branch(BranchRef::new("north", "North"));
//! let session = SessionContext::authenticated(user);
//!
//! let evaluator = AccessEvaluator::new(&session);
//! assert!(evaluator.can(Permission::EditCustomer));
//! assert!(!evaluator.can(Permission::DeleteCustomer));
//! ```

pub mod evaluator;
pub mod session;

// Re-export commonly used types at crate root
pub use evaluator::{AccessError, AccessEvaluator, Decision, DenialReason, EDIT_BRANCH_EXEMPT_MODULES};
pub use session::{BranchRef, Role, SessionContext, User};
