use anyhow::{Context, bail};
use dialoguer::Confirm;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use counterdesk_auth::{AccessEvaluator, Decision, SessionContext};
use counterdesk_config::{ListConfig, StoreConfig};
use counterdesk_core::{Module, Permission};
use counterdesk_models::{EntityId, ListOptions, Projection, StatusChange};

use crate::controls::{PaginationControl, PaginationView};
use crate::list::{BulkActionPolicy, CollectionStore, HttpCollectionStore, ListQueryController};

use super::args::{BulkArgs, Cli, Commands, ListArgs, SessionArgs};

/// Runs one CLI command inside a span tagged with a fresh run id.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let run_id = Uuid::new_v4();
    let span = info_span!("command", run.id = %run_id);

    async move {
        match cli.command {
            Commands::Permissions { module } => print_permissions(module.as_deref()),
            Commands::Can {
                permission,
                session,
            } => print_decision(&permission, &session),
            Commands::List(args) => list(args).await,
            Commands::Bulk(args) => bulk(args).await,
        }
    }
    .instrument(span)
    .await
}

fn print_permissions(module: Option<&str>) -> anyhow::Result<()> {
    let modules: Vec<Module> = match module {
        Some(name) => vec![name.parse()?],
        None => Module::ALL.to_vec(),
    };
    for module in modules {
        println!("{}:", module);
        for permission in module.permissions() {
            println!("  {}", permission);
        }
    }
    Ok(())
}

fn print_decision(identifier: &str, session: &SessionArgs) -> anyhow::Result<()> {
    let session = session.load()?;
    let decision = AccessEvaluator::new(&session).check(identifier)?;
    match decision {
        Decision::Allow => println!("✅ {identifier}: allowed"),
        Decision::Deny(reason) => println!("❌ {identifier}: denied ({reason})"),
    }
    Ok(())
}

/// The permission guarding `<verb>_<module>`, if the catalog has one.
fn module_permission(module: Module, verb: &str) -> anyhow::Result<Permission> {
    module
        .permission(verb)
        .with_context(|| format!("Module {} has no {verb} permission", module.as_str()))
}

fn require(session: &SessionContext, permission: Permission) -> anyhow::Result<()> {
    AccessEvaluator::new(session).require(permission)?;
    Ok(())
}

async fn list(args: ListArgs) -> anyhow::Result<()> {
    let module: Module = args.module.parse()?;
    let session = args.session.load()?;
    require(&session, module_permission(module, "list")?)?;

    let list_config = ListConfig::from_env();
    let store = HttpCollectionStore::new(&StoreConfig::from_env())?;
    let controller = ListQueryController::with_store(store, list_config.clone());

    let schema = args.schema.unwrap_or_else(|| module.as_str().to_string());
    let select = if args.fields.is_empty() {
        Projection::All
    } else {
        Projection::Include(args.fields)
    };
    let options = ListOptions::new(schema)
        .with_condition(args.condition)
        .with_sort(args.sort, args.order)
        .with_limit(args.limit.unwrap_or(list_config.default_limit))
        .with_select(select)
        .with_join_foreign_keys(args.join)
        .with_searchable_fields(args.search_fields);

    controller.mount(options).await?;
    if args.page != 1 {
        controller.paginate_data(args.page).await?;
    }
    if let Some(keyword) = args.search.as_deref() {
        controller.search_data(keyword).await?;
    }

    let state = controller.state().await;
    for record in &state.items {
        println!("{}", serde_json::to_string(record)?);
    }
    println!(
        "\n{} of {} records, page {}",
        state.items.len(),
        state.pagination.total,
        state.pagination.page
    );
    if let Some(view) = PaginationControl::view(&state.pagination) {
        println!("{}", render_pagination(&view));
    }

    let evaluator = AccessEvaluator::new(&session);
    let actions = controller
        .bulk_actions(&evaluator, &BulkActionPolicy::conventional(module))
        .await;
    if !actions.is_empty() {
        let names: Vec<&str> = actions.iter().map(|a| a.as_str()).collect();
        println!("Bulk actions: {}", names.join(", "));
    }
    Ok(())
}

async fn bulk(args: BulkArgs) -> anyhow::Result<()> {
    if !args.status.is_pending() {
        bail!("A status is required");
    }
    let module: Module = args.module.parse()?;
    let session = args.session.load()?;
    let permission = BulkActionPolicy::conventional(module)
        .permission_for(args.status)
        .with_context(|| format!("{} cannot be applied to {}", args.status, module.as_str()))?;
    require(&session, permission)?;

    let schema = args.schema.unwrap_or_else(|| module.as_str().to_string());
    let change = StatusChange {
        schema,
        ids: args.ids.into_iter().map(EntityId::from).collect(),
        status: args.status,
    };

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Mark {} {} record(s) as {}?",
                change.ids.len(),
                change.schema,
                change.status
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = HttpCollectionStore::new(&StoreConfig::from_env())?;
    let response = store.update_status(&change).await?;
    if !response.success {
        bail!("Store refused the change: {}", response.message);
    }

    info!(schema = %change.schema, status = %change.status, count = change.ids.len(), "Bulk status change sent");
    println!("\n✅ {} record(s) marked as {}", change.ids.len(), change.status);
    if !response.message.is_empty() {
        println!("   {}", response.message);
    }
    Ok(())
}

/// `« [1] 2 3 »`, with disabled arrows shown as `·`.
pub fn render_pagination(view: &PaginationView) -> String {
    view.links()
        .map(|link| {
            if link.is_disabled() {
                "·".to_string()
            } else if link.active {
                format!("[{}]", link.label())
            } else {
                link.label()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use counterdesk_core::PageWindow;

    #[test]
    fn test_render_pagination() {
        let view = PaginationControl::view(&PageWindow::derive(2, 10, 35, 5)).unwrap();
        assert_eq!(render_pagination(&view), "« 1 [2] 3 4 »");

        let view = PaginationControl::view(&PageWindow::derive(1, 10, 5, 5)).unwrap();
        assert_eq!(render_pagination(&view), "· [1] ·");
    }

    #[test]
    fn test_module_permission() {
        assert_eq!(
            module_permission(Module::Sale, "list").unwrap(),
            Permission::ListSale
        );
        let err = module_permission(Module::Dashboard, "list").unwrap_err();
        assert!(err.to_string().contains("has no list permission"));
    }

    #[test]
    fn test_print_permissions_unknown_module() {
        assert!(print_permissions(Some("spaceship")).is_err());
        assert!(print_permissions(Some("branch")).is_ok());
    }

    #[test]
    fn test_require_denies_anonymous() {
        let err = require(&SessionContext::anonymous(), Permission::ListSale).unwrap_err();
        assert!(err.to_string().contains("no authenticated user"));
    }
}
