#![allow(dead_code)]

use std::sync::Arc;

use counterdesk::counterdesk_auth::{BranchRef, Role, SessionContext, User};
use counterdesk::counterdesk_config::ListConfig;
use counterdesk::counterdesk_core::Permission;
use counterdesk::counterdesk_models::Record;
use counterdesk::list::{InMemoryStore, ListQueryController, RecordingNotifier};

pub const SCHEMA: &str = "products";

pub type TestController = ListQueryController<Arc<InMemoryStore>, Arc<RecordingNotifier>>;

/// Handles a test keeps on the controller's collaborators.
pub struct TestList {
    pub controller: TestController,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

/// `count` products: ids `p01..`, names `Product 01..`, `price` = index.
/// Every fifth one is deleted, the rest active.
pub fn products(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            let status = if i % 5 == 0 { "deleted" } else { "active" };
            Record::new(format!("p{:02}", i))
                .with("name", format!("Product {:02}", i))
                .with("price", i as u64)
                .with("status", status)
                .with("createdAt", format!("2024-01-{:02}", i.min(28)))
        })
        .collect()
}

pub fn test_list(store: InMemoryStore) -> TestList {
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = ListQueryController::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        ListConfig::default(),
    );
    TestList {
        controller,
        store,
        notifier,
    }
}

pub fn product_list(count: usize) -> TestList {
    test_list(InMemoryStore::new().with_records(SCHEMA, products(count)))
}

pub fn north() -> BranchRef {
    BranchRef::new("north", "North Branch")
}

pub fn session_with_role(permissions: &[Permission], branch: Option<BranchRef>) -> SessionContext {
    let user = User {
        role: Some(Role::with_permissions("test", permissions.iter().copied())),
        branch,
        is_administrator: false,
    };
    SessionContext::authenticated(user)
}

pub fn admin_session(role: Option<Role>, branch: Option<BranchRef>) -> SessionContext {
    SessionContext::authenticated(User {
        role,
        branch,
        is_administrator: true,
    })
}
