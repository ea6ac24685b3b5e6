//! Session types read by the access evaluator.
//!
//! A [`SessionContext`] is built by the login collaborator when a session is
//! resolved and dropped at logout. The evaluator only ever borrows it.
//!
//! - [`User`]: the authenticated actor, with an optional [`Role`] and branch
//! - [`Role`]: a named set of [`Permission`]s
//! - [`BranchRef`]: a weak reference to the branch a user operates in

use counterdesk_core::Permission;
use counterdesk_models::ids::{BranchId, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A weak reference to a branch: its id plus what screens display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub id: BranchId,
    #[serde(default)]
    pub name: String,
}

impl BranchRef {
    pub fn new(id: impl Into<BranchId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A role definition.
///
/// Deserializing a role that names an identifier outside the catalog fails,
/// so a role in memory only ever holds known permissions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RoleId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// A role granting exactly `permissions`.
    pub fn with_permissions<I>(name: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        Self {
            id: None,
            name: name.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Whether the role's permission set contains `permission`.
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// The authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub branch: Option<BranchRef>,
    #[serde(default)]
    pub is_administrator: bool,
}

impl User {
    /// An ordinary user holding `role`, not attached to any branch.
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            branch: None,
            is_administrator: false,
        }
    }

    /// An administrator without an assigned role record.
    pub fn administrator() -> Self {
        Self {
            role: None,
            branch: None,
            is_administrator: true,
        }
    }

    #[must_use]
    pub fn in_branch(mut self, branch: BranchRef) -> Self {
        self.branch = Some(branch);
        self
    }

    #[must_use]
    pub fn as_administrator(mut self) -> Self {
        self.is_administrator = true;
        self
    }

    pub fn has_branch(&self) -> bool {
        self.branch.is_some()
    }
}

/// The session the evaluator decides against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: Option<User>,
}

impl SessionContext {
    /// A session with no authenticated user.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialize_known_permissions() {
        let json = r#"{"name":"cashier","permissions":["list_sale","create_sale"]}"#;
        let role: Role = serde_json::from_str(json).unwrap();
        assert!(role.grants(Permission::ListSale));
        assert!(role.grants(Permission::CreateSale));
        assert!(!role.grants(Permission::DeleteSale));
    }

    #[test]
    fn test_role_deserialize_rejects_unknown_permissions() {
        let json = r#"{"name":"cashier","permissions":["list_sale","sell_moon"]}"#;
        let err = serde_json::from_str::<Role>(json).unwrap_err();
        assert!(err.to_string().contains("sell_moon"));
    }

    #[test]
    fn test_user_deserialize_defaults() {
        let user: User = serde_json::from_str(r#"{"is_administrator":true}"#).unwrap();
        assert!(user.is_administrator);
        assert!(user.role.is_none());
        assert!(!user.has_branch());
    }

    #[test]
    fn test_user_builders() {
        let user = User::with_role(Role::new("clerk"))
            .in_branch(BranchRef::new("north", "North Branch"))
            .as_administrator();
        assert!(user.is_administrator);
        assert_eq!(
            user.branch.as_ref().map(|b| b.id.as_str()),
            Some("north")
        );
    }

    #[test]
    fn test_session_context() {
        assert!(!SessionContext::anonymous().is_authenticated());
        assert!(SessionContext::authenticated(User::administrator()).is_authenticated());
    }
}
