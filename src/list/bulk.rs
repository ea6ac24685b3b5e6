//! Which bulk status transitions a screen offers, and the permission each needs.

use counterdesk_auth::AccessEvaluator;
use counterdesk_core::{Module, Permission};
use counterdesk_models::StatusTransition;

/// Maps each offered transition to the permission that gates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkActionPolicy {
    entries: Vec<(StatusTransition, Permission)>,
}

impl BulkActionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual mapping for a module's list screen:
    ///
    /// - `deleted` needs `delete_<module>`
    /// - `restored` needs `restore_deleted`
    /// - `canceled` needs `cancel_<module>`
    /// - every other transition needs `edit_<module>`
    ///
    /// Transitions whose permission is not in the catalog are left out.
    pub fn conventional(module: Module) -> Self {
        let entries = StatusTransition::ACTIONS
            .iter()
            .filter_map(|&transition| {
                let permission = match transition {
                    StatusTransition::Restored => Some(Permission::RestoreDeleted),
                    StatusTransition::Deleted => module.permission("delete"),
                    StatusTransition::Canceled => module.permission("cancel"),
                    _ => module.permission("edit"),
                }?;
                Some((transition, permission))
            })
            .collect();
        Self { entries }
    }

    /// Adds or replaces the permission for `transition`.
    #[must_use]
    pub fn with(mut self, transition: StatusTransition, permission: Permission) -> Self {
        match self.entries.iter_mut().find(|(t, _)| *t == transition) {
            Some(entry) => entry.1 = permission,
            None => self.entries.push((transition, permission)),
        }
        self
    }

    #[must_use]
    pub fn without(mut self, transition: StatusTransition) -> Self {
        self.entries.retain(|(t, _)| *t != transition);
        self
    }

    pub fn permission_for(&self, transition: StatusTransition) -> Option<Permission> {
        self.entries
            .iter()
            .find(|(t, _)| *t == transition)
            .map(|(_, p)| *p)
    }

    /// Transitions the session may run while viewing `condition`, in catalog order.
    pub fn available(&self, evaluator: &AccessEvaluator<'_>, condition: &str) -> Vec<StatusTransition> {
        StatusTransition::ACTIONS
            .iter()
            .copied()
            .filter(|t| t.offered_in(condition))
            .filter(|t| self.permission_for(*t).is_some_and(|p| evaluator.can(p)))
            .collect()
    }
}
