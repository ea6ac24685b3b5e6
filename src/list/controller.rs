//! The list query controller.
//!
//! One [`ListQueryController`] backs one list screen. It owns the screen's
//! [`ListQueryState`], builds queries from it, talks to a
//! [`CollectionStore`] and reports user-visible failures to a [`Notifier`].
//!
//! The state lock is never held across a store call. Each fetch takes a
//! request ticket before awaiting; when several fetches overlap, only the
//! latest issued one is applied.

use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use counterdesk_auth::AccessEvaluator;
use counterdesk_config::ListConfig;
use counterdesk_models::{EntityId, FilterSelection, ListOptions, StatusTransition};
use counterdesk_observability::{track_bulk_status_change, track_list_fetch};

use super::bulk::BulkActionPolicy;
use super::error::ListError;
use super::notify::{Notice, Notifier, TracingNotifier};
use super::state::{FetchOutcome, ListQueryState};
use super::store::{CollectionStore, StoreError};

/// What a fetch does with the row selection once its page is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionRule {
    /// Leave the selection alone.
    Keep,
    /// Keep only ids that are on the new page.
    Reconcile,
}

pub struct ListQueryController<S, N = TracingNotifier> {
    store: S,
    notifier: N,
    config: ListConfig,
    state: Mutex<ListQueryState>,
}

impl<S> ListQueryController<S, TracingNotifier>
where
    S: CollectionStore,
{
    /// A controller that logs notices instead of showing them.
    pub fn with_store(store: S, config: ListConfig) -> Self {
        Self::new(store, TracingNotifier, config)
    }
}

impl<S, N> ListQueryController<S, N>
where
    S: CollectionStore,
    N: Notifier,
{
    pub fn new(store: S, notifier: N, config: ListConfig) -> Self {
        let state = ListQueryState::new(&config);
        Self {
            store,
            notifier,
            config,
            state: Mutex::new(state),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> ListQueryState {
        self.state.lock().await.clone()
    }

    /// Sets up the screen from `options` and loads page 1.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` if validation fails (nothing is fetched), `Store` if
    /// the load fails (previous items are kept).
    #[instrument(skip(self, options), fields(list.schema = %options.schema))]
    pub async fn mount(&self, mut options: ListOptions) -> Result<FetchOutcome, ListError> {
        options.validate()?;
        options.limit = self.config.clamp_limit(options.limit);

        self.state.lock().await.reset(options);
        self.fetch(1, SelectionRule::Reconcile).await
    }

    /// Replaces condition, order, sort and page size, then reloads page 1.
    ///
    /// The row selection is left as it is, even for ids the new page does
    /// not show; only an explicit toggle or a bulk change clears it.
    #[instrument(skip(self, selection), fields(list.condition = %selection.condition, list.sort = %selection.sort))]
    pub async fn filter_data(&self, selection: FilterSelection) -> Result<FetchOutcome, ListError> {
        selection.validate()?;
        {
            let mut state = self.state.lock().await;
            state.condition = selection.condition;
            state.order = selection.order;
            state.sort = selection.sort;
            state.limit = self.config.clamp_limit(selection.limit);
        }
        self.fetch(1, SelectionRule::Keep).await
    }

    /// Loads `page`. Does nothing for the current page or one outside `1..=last_page`.
    ///
    /// Selected ids that are not on the loaded page are dropped.
    #[instrument(skip(self))]
    pub async fn paginate_data(&self, page: u64) -> Result<FetchOutcome, ListError> {
        {
            let state = self.state.lock().await;
            if page == state.page || !state.pagination.contains(page) {
                debug!(current = state.page, last_page = state.pagination.last_page, "Page request ignored");
                return Ok(FetchOutcome::Unchanged);
            }
        }
        self.fetch(page, SelectionRule::Reconcile).await
    }

    /// Toggles one row, or every row on the page when `id` is `None`.
    pub async fn select_list(&self, id: Option<&EntityId>) -> Result<FetchOutcome, ListError> {
        Ok(self.state.lock().await.toggle_selection(id))
    }

    /// Stores `keyword` and reloads the current page with it.
    ///
    /// Selected ids that no longer match are dropped.
    #[instrument(skip(self))]
    pub async fn search_data(&self, keyword: &str) -> Result<FetchOutcome, ListError> {
        let page = {
            let mut state = self.state.lock().await;
            state.keyword = keyword.trim().to_string();
            state.page
        };
        self.fetch(page, SelectionRule::Reconcile).await
    }

    /// Records the transition the confirmation dialog is asking about.
    ///
    /// # Errors
    ///
    /// `NotOffered` if the current view does not offer `status`, e.g.
    /// restoring while not viewing deleted records.
    pub async fn open_dialog(&self, status: StatusTransition) -> Result<FetchOutcome, ListError> {
        let mut state = self.state.lock().await;
        if state.pending_status == status {
            return Ok(FetchOutcome::Unchanged);
        }
        if status.is_pending() && !status.offered_in(&state.condition) {
            return Err(ListError::NotOffered {
                status,
                condition: state.condition.clone(),
            });
        }
        state.pending_status = status;
        Ok(FetchOutcome::Applied)
    }

    /// Sends the pending transition for the selected rows.
    ///
    /// # Errors
    ///
    /// `NoPendingStatus` or `EmptySelection` when there is nothing to send;
    /// `NotOffered` when the view changed since the dialog opened; `Store`
    /// when the store fails or refuses. On any error the state is left as
    /// it was.
    #[instrument(skip(self))]
    pub async fn update_backend_status(&self) -> Result<FetchOutcome, ListError> {
        let change = {
            let state = self.state.lock().await;
            if !state.pending_status.is_pending() {
                return Err(ListError::NoPendingStatus);
            }
            if !state.pending_status.offered_in(&state.condition) {
                return Err(ListError::NotOffered {
                    status: state.pending_status,
                    condition: state.condition.clone(),
                });
            }
            state.status_change().ok_or(ListError::EmptySelection)?
        };

        let result = match self.store.update_status(&change).await {
            Ok(response) if response.success => Ok(response.message),
            Ok(response) => Err(StoreError::Rejected(response.message)),
            Err(e) => Err(e),
        };

        match result {
            Ok(message) => {
                track_bulk_status_change(&change.schema, change.status.as_str(), true);
                self.state.lock().await.apply_status_change(&change);
                info!(
                    list.schema = %change.schema,
                    status = %change.status,
                    count = change.ids.len(),
                    "Status change applied"
                );
                if !message.is_empty() {
                    self.notifier.notify(Notice::info(message));
                }
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                track_bulk_status_change(&change.schema, change.status.as_str(), false);
                warn!(list.schema = %change.schema, status = %change.status, error = %e, "Status change failed");
                self.notifier.notify(Notice::error(notice_message(&e)));
                Err(ListError::Store(e))
            }
        }
    }

    /// Transitions the session may apply in the current view.
    pub async fn bulk_actions(
        &self,
        evaluator: &AccessEvaluator<'_>,
        policy: &BulkActionPolicy,
    ) -> Vec<StatusTransition> {
        let condition = self.state.lock().await.condition.clone();
        policy.available(evaluator, &condition)
    }

    async fn fetch(&self, page: u64, selection: SelectionRule) -> Result<FetchOutcome, ListError> {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            (state.begin_request(), state.build_query(page))
        };

        match self.store.list(&query).await {
            Ok(response) => {
                track_list_fetch(&query.schema, true);
                let rows = response.data.len();
                let outcome = {
                    let mut state = self.state.lock().await;
                    let outcome = state.apply_page(ticket, page, response);
                    if outcome == FetchOutcome::Applied && selection == SelectionRule::Reconcile {
                        state.retain_visible_selection();
                    }
                    outcome
                };
                match outcome {
                    FetchOutcome::Stale => debug!(list.schema = %query.schema, page, "Discarded stale response"),
                    _ => debug!(list.schema = %query.schema, page, rows, "List page applied"),
                }
                Ok(outcome)
            }
            Err(e) => {
                track_list_fetch(&query.schema, false);
                if self.state.lock().await.fail_request(ticket) == FetchOutcome::Stale {
                    debug!(list.schema = %query.schema, error = %e, "Stale request failed");
                    return Ok(FetchOutcome::Stale);
                }
                error!(list.schema = %query.schema, page, error = %e, "Failed to load list");
                self.notifier.notify(Notice::error(notice_message(&e)));
                Err(ListError::Store(e))
            }
        }
    }
}

fn notice_message(error: &StoreError) -> String {
    match error {
        StoreError::Status { message, .. } | StoreError::Rejected(message) if !message.is_empty() => {
            message.clone()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::memory::InMemoryStore;
    use crate::list::notify::RecordingNotifier;
    use counterdesk_models::Record;

    fn controller() -> ListQueryController<InMemoryStore, RecordingNotifier> {
        let records = (1..=3)
            .map(|i| Record::new(i.to_string()).with("status", "active").with("n", i))
            .collect();
        ListQueryController::new(
            InMemoryStore::new().with_records("units", records),
            RecordingNotifier::new(),
            ListConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_mount_rejects_invalid_options() {
        let controller = controller();
        let err = controller
            .mount(ListOptions::new("units").with_limit(0))
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::InvalidOptions(_)));
        assert!(controller.store().queries().await.is_empty());
    }

    #[tokio::test]
    async fn test_mount_clamps_limit() {
        let controller = controller();
        controller
            .mount(ListOptions::new("units").with_limit(5000))
            .await
            .unwrap();
        assert_eq!(controller.state().await.limit, 100);
    }

    #[tokio::test]
    async fn test_open_dialog_same_status_unchanged() {
        let controller = controller();
        assert_eq!(
            controller.open_dialog(StatusTransition::None).await.unwrap(),
            FetchOutcome::Unchanged
        );
        assert_eq!(
            controller.open_dialog(StatusTransition::Deleted).await.unwrap(),
            FetchOutcome::Applied
        );
    }

    #[tokio::test]
    async fn test_open_dialog_rejects_transition_outside_view() {
        let controller = controller();
        controller
            .mount(ListOptions::new("units").with_condition("active"))
            .await
            .unwrap();
        let err = controller
            .open_dialog(StatusTransition::Restored)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListError::NotOffered {
                status: StatusTransition::Restored,
                ..
            }
        ));
        assert_eq!(controller.state().await.pending_status, StatusTransition::None);
    }

    #[tokio::test]
    async fn test_update_backend_status_rechecks_view() {
        let controller = controller();
        controller
            .mount(ListOptions::new("units").with_condition("active"))
            .await
            .unwrap();
        controller.select_list(None).await.unwrap();
        controller.open_dialog(StatusTransition::Deleted).await.unwrap();
        controller
            .filter_data(FilterSelection {
                condition: "deleted".to_string(),
                order: counterdesk_models::SortOrder::Descending,
                sort: "createdAt".to_string(),
                limit: 10,
            })
            .await
            .unwrap();

        let err = controller.update_backend_status().await.unwrap_err();
        assert!(matches!(err, ListError::NotOffered { .. }));
        assert!(controller.store().status_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_condition_field_reaches_store_and_rows() {
        let config = ListConfig {
            condition_field: "state".to_string(),
            ..ListConfig::default()
        };
        let records = (1..=2)
            .map(|i| Record::new(i.to_string()).with("state", "active"))
            .collect();
        let store = InMemoryStore::new()
            .with_records("units", records)
            .with_status_field(config.condition_field.clone());
        let controller = ListQueryController::new(store, RecordingNotifier::new(), config);

        controller
            .mount(ListOptions::new("units").with_condition("active"))
            .await
            .unwrap();
        assert_eq!(controller.state().await.items.len(), 2);

        controller.select_list(Some(&EntityId::from("1"))).await.unwrap();
        controller.open_dialog(StatusTransition::Disabled).await.unwrap();
        controller.update_backend_status().await.unwrap();

        let stored = controller.store().records("units").await;
        assert_eq!(stored[0].get_str("state"), Some("disabled"));
        assert_eq!(stored[0].get("status"), None);
        let state = controller.state().await;
        assert_eq!(state.items[0].get_str("state"), Some("disabled"));
    }

    #[test]
    fn test_notice_message_prefers_store_message() {
        let err = StoreError::Rejected("Locked by another user".to_string());
        assert_eq!(notice_message(&err), "Locked by another user");
        let err = StoreError::Status {
            status: 502,
            message: String::new(),
        };
        assert_eq!(notice_message(&err), "Store returned 502: ");
    }
}
