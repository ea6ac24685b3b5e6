mod common;

use common::{SCHEMA, product_list};
use counterdesk::controls::{
    FilterChoice, FilterControl, FilterInputs, PageLinkKind, PaginationControl, Section,
    is_sort_active, sort_label,
};
use counterdesk::counterdesk_models::{ListOptions, SortOrder};
use counterdesk::list::FetchOutcome;

#[tokio::test]
async fn test_choose_condition_refilters_and_closes() {
    let list = product_list(25);
    list.controller.mount(ListOptions::new(SCHEMA)).await.unwrap();
    list.controller.paginate_data(2).await.unwrap();

    let mut control = FilterControl::new();
    control.toggle(Section::Condition);
    assert_eq!(control.active_tag(), 1);

    control
        .choose(FilterChoice::Condition("deleted".to_string()), &list.controller)
        .await
        .unwrap();

    assert_eq!(control.active_tag(), 0);
    let state = list.controller.state().await;
    assert_eq!(state.condition, "deleted");
    assert_eq!(state.page, 1);
    assert_eq!(state.pagination.total, 5);
    assert!(
        state
            .items
            .iter()
            .all(|r| r.get_str("status") == Some("deleted"))
    );
}

#[tokio::test]
async fn test_choose_keeps_other_dimensions() {
    let list = product_list(25);
    list.controller
        .mount(
            ListOptions::new(SCHEMA)
                .with_condition("active")
                .with_sort("price", SortOrder::Ascending),
        )
        .await
        .unwrap();

    let mut control = FilterControl::new();
    control
        .choose(FilterChoice::Limit(5), &list.controller)
        .await
        .unwrap();

    let query = list.store.last_query().await.unwrap();
    assert_eq!(query.limit, 5);
    assert_eq!(query.sort.field, "price");
    assert_eq!(query.sort.order, SortOrder::Ascending);

    control
        .choose(FilterChoice::Order(SortOrder::Descending), &list.controller)
        .await
        .unwrap();
    let state = list.controller.state().await;
    assert_eq!(state.order, SortOrder::Descending);
    assert_eq!(state.limit, 5);
    assert_eq!(state.condition, "active");
    assert_eq!(state.items[0].id.as_str(), "p24");
}

#[tokio::test]
async fn test_created_time_label_round_trips() {
    let list = product_list(5);
    list.controller
        .mount(ListOptions::new(SCHEMA).with_sort("price", SortOrder::Descending))
        .await
        .unwrap();

    let label = sort_label("createdAt");
    assert_eq!(label, "created time");

    let mut control = FilterControl::new();
    control.toggle(Section::Sort);
    control
        .choose(FilterChoice::Sort(label.clone()), &list.controller)
        .await
        .unwrap();

    let state = list.controller.state().await;
    assert_eq!(state.sort, "createdAt");
    assert!(is_sort_active(&label, &state.sort));
    assert!(!is_sort_active("price", &state.sort));
}

#[tokio::test]
async fn test_picked_sort_label_maps_back_to_offered_field() {
    let list = product_list(5);
    list.controller.mount(ListOptions::new(SCHEMA)).await.unwrap();

    let inputs = FilterInputs::new(["all"], ["created_at", "unitPrice", "SKU"], vec![10]);
    let mut control = FilterControl::new();
    control.sync_inputs(&inputs);

    for field in ["created_at", "unitPrice", "SKU"] {
        control.toggle(Section::Sort);
        control
            .choose(FilterChoice::Sort(sort_label(field)), &list.controller)
            .await
            .unwrap();
        let state = list.controller.state().await;
        assert_eq!(state.sort, field);
        assert_eq!(list.store.last_query().await.unwrap().sort.field, field);
    }
}

#[test]
fn test_option_lists_sorted_without_mutating_inputs() {
    let inputs = FilterInputs::new(
        ["completed", "all", "deleted", "active"],
        ["createdAt", "price", "name"],
        vec![10, 25, 50],
    );
    let original = inputs.clone();

    assert_eq!(
        inputs.sorted_conditions(),
        vec!["all", "active", "deleted", "completed"]
    );
    assert_eq!(inputs.sorted_sorts(), vec!["name", "price", "createdAt"]);
    assert_eq!(inputs, original);
}

#[test]
fn test_accordion_switches_exclusively() {
    let mut control = FilterControl::new();
    control.toggle(Section::Order);
    control.toggle(Section::Limit);
    assert!(control.is_open(Section::Limit));
    assert!(!control.is_open(Section::Order));
    control.toggle(Section::Limit);
    assert_eq!(control.active_tag(), 0);
}

#[tokio::test]
async fn test_pagination_links_drive_controller() {
    let list = product_list(25);
    list.controller.mount(ListOptions::new(SCHEMA)).await.unwrap();

    let view = PaginationControl::view(&list.controller.state().await.pagination).unwrap();
    assert_eq!(view.previous.kind, PageLinkKind::Previous);
    assert!(view.previous.is_disabled());
    assert_eq!(
        PaginationControl::click(&view.previous, &list.controller)
            .await
            .unwrap(),
        FetchOutcome::Unchanged
    );

    let current = view.pages.iter().find(|l| l.active).unwrap();
    assert_eq!(
        PaginationControl::click(current, &list.controller)
            .await
            .unwrap(),
        FetchOutcome::Unchanged
    );

    assert_eq!(
        PaginationControl::click(&view.next, &list.controller)
            .await
            .unwrap(),
        FetchOutcome::Applied
    );
    let state = list.controller.state().await;
    assert_eq!(state.page, 2);

    let view = PaginationControl::view(&state.pagination).unwrap();
    assert_eq!(view.previous.page, Some(1));
    assert_eq!(view.next.page, Some(3));
    let active: Vec<u64> = view
        .pages
        .iter()
        .filter(|l| l.active)
        .filter_map(|l| l.page)
        .collect();
    assert_eq!(active, vec![2]);
}

#[tokio::test]
async fn test_pagination_hidden_for_empty_result() {
    let list = product_list(0);
    list.controller.mount(ListOptions::new(SCHEMA)).await.unwrap();
    assert!(PaginationControl::view(&list.controller.state().await.pagination).is_none());
}
