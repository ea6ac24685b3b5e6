mod common;

use std::collections::HashSet;

use common::{admin_session, north, session_with_role};
use counterdesk::counterdesk_auth::{
    AccessError, AccessEvaluator, Decision, DenialReason, EDIT_BRANCH_EXEMPT_MODULES, Role,
    SessionContext,
};
use counterdesk::counterdesk_core::permissions::list_all;
use counterdesk::counterdesk_core::{Module, Permission};

#[test]
fn test_catalog_identifiers_unique_across_modules() {
    let mut seen = HashSet::new();
    for module in Module::ALL {
        for permission in module.permissions() {
            assert!(seen.insert(permission.as_str()), "duplicate {}", permission);
            assert_eq!(permission.module(), *module);
        }
    }
    assert_eq!(seen.len(), list_all().count());
}

#[test]
fn test_anonymous_denied_everything() {
    let session = SessionContext::anonymous();
    let evaluator = AccessEvaluator::new(&session);
    for permission in Permission::ALL {
        assert_eq!(
            evaluator.evaluate(*permission),
            Decision::Deny(DenialReason::Unauthenticated)
        );
    }
}

#[test]
fn test_admin_without_role_exempt_edits_ignore_branch() {
    for branch in [None, Some(north())] {
        let session = admin_session(None, branch);
        let evaluator = AccessEvaluator::new(&session);
        assert!(evaluator.can(Permission::EditBranch));
        assert!(evaluator.can(Permission::EditRole));
        assert!(evaluator.can(Permission::EditUser));
        assert!(evaluator.can(Permission::ListProduct));
    }
}

#[test]
fn test_admin_without_role_other_edits_need_branch() {
    let session = admin_session(None, None);
    assert_eq!(
        AccessEvaluator::new(&session).evaluate(Permission::EditProduct),
        Decision::Deny(DenialReason::BranchRequired)
    );

    let session = admin_session(None, Some(north()));
    assert!(AccessEvaluator::new(&session).can(Permission::EditProduct));
}

#[test]
fn test_admin_with_role_allowed_outside_role() {
    let role = Role::with_permissions("auditor", [Permission::ListAuditLog]);
    let session = admin_session(Some(role), None);
    let evaluator = AccessEvaluator::new(&session);

    // not in the role: allowed even for an edit without a branch
    assert!(evaluator.can(Permission::EditProduct));
    assert!(evaluator.can(Permission::DeleteSale));
}

#[test]
fn test_admin_with_role_in_role_edit_is_branch_scoped() {
    let role = Role::with_permissions("manager", [Permission::EditProduct, Permission::EditUser]);

    let session = admin_session(Some(role.clone()), None);
    let evaluator = AccessEvaluator::new(&session);
    assert_eq!(
        evaluator.evaluate(Permission::EditProduct),
        Decision::Deny(DenialReason::BranchRequired)
    );
    assert!(evaluator.can(Permission::EditUser));

    let session = admin_session(Some(role), Some(north()));
    assert!(AccessEvaluator::new(&session).can(Permission::EditProduct));
}

#[test]
fn test_user_role_membership() {
    for branch in [None, Some(north())] {
        let session = session_with_role(&[Permission::ListCustomer], branch);
        let evaluator = AccessEvaluator::new(&session);
        assert!(evaluator.can(Permission::ListCustomer));
        assert!(!evaluator.can(Permission::CreateCustomer));
        assert_eq!(
            evaluator.evaluate(Permission::EditCustomer),
            Decision::Deny(DenialReason::NotInRole)
        );
    }
}

#[test]
fn test_user_edit_flips_with_branch() {
    let session = session_with_role(&[Permission::EditCustomer], None);
    assert!(!AccessEvaluator::new(&session).can(Permission::EditCustomer));

    let session = session_with_role(&[Permission::EditCustomer], Some(north()));
    assert!(AccessEvaluator::new(&session).can(Permission::EditCustomer));
}

#[test]
fn test_user_has_no_module_exemption() {
    let session = session_with_role(&[Permission::EditBranch], None);
    assert_eq!(
        AccessEvaluator::new(&session).evaluate(Permission::EditBranch),
        Decision::Deny(DenialReason::BranchRequired)
    );
}

#[test]
fn test_user_without_role_denied() {
    let session = SessionContext::authenticated(Default::default());
    assert_eq!(
        AccessEvaluator::new(&session).evaluate(Permission::ListSale),
        Decision::Deny(DenialReason::NoRole)
    );
}

#[test]
fn test_exempt_modules() {
    assert_eq!(
        EDIT_BRANCH_EXEMPT_MODULES,
        &[Module::Branch, Module::Role, Module::User]
    );
}

#[test]
fn test_string_identifiers_fail_closed() {
    let session = admin_session(None, Some(north()));
    let evaluator = AccessEvaluator::new(&session);

    assert!(evaluator.can_identifier("edit_product"));
    assert!(!evaluator.can_identifier("launch_rocket"));
    assert!(!evaluator.can_identifier(""));
    assert!(matches!(
        evaluator.check("launch_rocket"),
        Err(AccessError::UnknownPermission(_))
    ));
}

#[test]
fn test_require_distinguishes_denial() {
    let session = session_with_role(&[Permission::ListSale], None);
    let evaluator = AccessEvaluator::new(&session);
    assert!(evaluator.require(Permission::ListSale).is_ok());
    assert!(matches!(
        evaluator.require(Permission::DeleteSale),
        Err(AccessError::Forbidden {
            permission: Permission::DeleteSale,
            reason: DenialReason::NotInRole,
        })
    ));
}
