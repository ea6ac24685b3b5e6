//! Access decisions for the current session.
//!
//! [`AccessEvaluator`] answers "may this session perform this action?" for a
//! [`Permission`]. It never fails: anything that prevents a decision (no
//! user, an identifier outside the catalog) is a denial.
//!
//! # Policy
//!
//! Edit permissions are branch-scoped. Ordinary users need the permission
//! in their role *and* a branch for any `edit_*` action. Administrators are
//! broader:
//!
//! | Actor | Permission | Result |
//! |-------|------------|--------|
//! | no user | any | deny |
//! | administrator, no role | non-edit, or edit in `branch`/`role`/`user` | allow |
//! | administrator, no role | other edit | allow iff branch set |
//! | administrator with role | not in role | allow |
//! | administrator with role | in role | same as "no role" |
//! | user | not in role / no role | deny |
//! | user | non-edit in role | allow |
//! | user | edit in role | allow iff branch set |
//!
//! # Example
//!
//! ```
//! use counterdesk_auth::{AccessEvaluator, SessionContext, User};
//! use counterdesk_core::Permission;
//!
//! let session = SessionContext::authenticated(User::administrator());
//! let evaluator = AccessEvaluator::new(&session);
//!
//! assert!(evaluator.can(Permission::EditRole));
//! assert!(!evaluator.can(Permission::EditProduct)); // needs a branch
//! ```

use counterdesk_core::permissions::{Module, Permission, UnknownPermission};
use counterdesk_observability::track_access_decision;
use std::fmt;
use tracing::{debug, warn};

use crate::session::{SessionContext, User};

/// Modules whose edit permissions administrators hold without a branch.
pub const EDIT_BRANCH_EXEMPT_MODULES: &[Module] = &[Module::Branch, Module::Role, Module::User];

/// Why a permission was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    /// There is no authenticated user.
    Unauthenticated,
    /// The user is not an administrator and has no role.
    NoRole,
    /// The user's role does not contain the permission.
    NotInRole,
    /// An edit permission was requested without a branch.
    BranchRequired,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DenialReason::Unauthenticated => "no authenticated user",
            DenialReason::NoRole => "user has no role",
            DenialReason::NotInRole => "permission is not in the user's role",
            DenialReason::BranchRequired => "edit actions require a branch",
        };
        f.write_str(reason)
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    Deny(DenialReason),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn denial_reason(self) -> Option<DenialReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(reason),
        }
    }
}

/// Failures distinct from a plain policy denial.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The identifier is not in the permission catalog.
    #[error(transparent)]
    UnknownPermission(#[from] UnknownPermission),

    /// The policy denied the permission (returned by [`AccessEvaluator::require`]).
    #[error("access denied for {permission}: {reason}")]
    Forbidden {
        permission: Permission,
        reason: DenialReason,
    },
}

/// Decides permissions for one session.
#[derive(Debug, Clone, Copy)]
pub struct AccessEvaluator<'a> {
    session: &'a SessionContext,
}

impl<'a> AccessEvaluator<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'a SessionContext {
        self.session
    }

    /// Evaluates the policy for `permission`.
    pub fn evaluate(&self, permission: Permission) -> Decision {
        let decision = decide(self.session, permission);

        match decision {
            Decision::Allow => debug!(permission = %permission, "Access allowed"),
            Decision::Deny(reason) => {
                debug!(permission = %permission, reason = %reason, "Access denied")
            }
        }
        track_access_decision(permission.as_str(), decision.is_allowed());

        decision
    }

    /// Whether the session may perform `permission`.
    pub fn can(&self, permission: Permission) -> bool {
        self.evaluate(permission).is_allowed()
    }

    /// Evaluates an identifier given as a string.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::UnknownPermission`] if the catalog does not
    /// contain `identifier`.
    pub fn check(&self, identifier: &str) -> Result<Decision, AccessError> {
        let permission: Permission = identifier.parse()?;
        Ok(self.evaluate(permission))
    }

    /// Fail-closed string entry point: any error is logged and denied.
    pub fn can_identifier(&self, identifier: &str) -> bool {
        match self.check(identifier) {
            Ok(decision) => decision.is_allowed(),
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "Access check failed, denying");
                false
            }
        }
    }

    /// Requires `permission`, for guards that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] with the denial reason.
    pub fn require(&self, permission: Permission) -> Result<(), AccessError> {
        match self.evaluate(permission) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AccessError::Forbidden { permission, reason }),
        }
    }

    /// The subset of `permissions` the session holds, in input order.
    pub fn allowed<I>(&self, permissions: I) -> Vec<Permission>
    where
        I: IntoIterator<Item = Permission>,
    {
        permissions.into_iter().filter(|p| self.can(*p)).collect()
    }
}

fn decide(session: &SessionContext, permission: Permission) -> Decision {
    let Some(user) = session.user.as_ref() else {
        return Decision::Deny(DenialReason::Unauthenticated);
    };

    if user.is_administrator {
        return match &user.role {
            // The administrator flag overrides role membership.
            Some(role) if !role.grants(permission) => Decision::Allow,
            _ => branch_scope(user, permission, true),
        };
    }

    let Some(role) = user.role.as_ref() else {
        return Decision::Deny(DenialReason::NoRole);
    };
    if !role.grants(permission) {
        return Decision::Deny(DenialReason::NotInRole);
    }

    branch_scope(user, permission, false)
}

fn branch_scope(user: &User, permission: Permission, module_exempt: bool) -> Decision {
    if !permission.is_edit() {
        return Decision::Allow;
    }
    if module_exempt && EDIT_BRANCH_EXEMPT_MODULES.contains(&permission.module()) {
        return Decision::Allow;
    }
    if user.has_branch() {
        Decision::Allow
    } else {
        Decision::Deny(DenialReason::BranchRequired)
    }
}
