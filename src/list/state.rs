//! Per-screen list state.
//!
//! [`ListQueryState`] holds everything a list screen shows: the query
//! dimensions, the current page of items, derived pagination and the row
//! selection. It is plain data; the controller owns it behind a mutex and
//! drives every transition through the methods here.

use serde_json::{Value, json};

use counterdesk_config::ListConfig;
use counterdesk_core::PageWindow;
use counterdesk_models::{
    EntityId, ListOptions, ListPage, ListQuery, Predicate, Projection, Record, SortOrder,
    SortSpec, StatusChange, StatusTransition, is_unfiltered_view,
};

/// Result of an operation that may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
    /// A response (or a local change) was applied to the state.
    Applied,
    /// A newer request was issued before this one resolved; its response was dropped.
    Stale,
    /// Nothing to do.
    Unchanged,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ListQueryState {
    pub schema: String,
    pub base_condition: Predicate,
    /// Selected view, e.g. `active`, `deleted` or `all`.
    pub condition: String,
    pub sort: String,
    pub order: SortOrder,
    pub page: u64,
    pub limit: u64,
    pub select: Projection,
    pub join_foreign_keys: bool,
    pub searchable_fields: Vec<String>,
    pub keyword: String,

    pub items: Vec<Record>,
    pub pagination: PageWindow,
    pub selected_ids: Vec<EntityId>,
    pub pending_status: StatusTransition,
    pub loading: bool,

    condition_field: String,
    page_window: u64,
    latest_request: u64,
}

impl ListQueryState {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            schema: String::new(),
            base_condition: Predicate::new(),
            condition: String::new(),
            sort: "createdAt".to_string(),
            order: SortOrder::Descending,
            page: 1,
            limit: config.default_limit,
            select: Projection::All,
            join_foreign_keys: false,
            searchable_fields: Vec::new(),
            keyword: String::new(),
            items: Vec::new(),
            pagination: PageWindow::default(),
            selected_ids: Vec::new(),
            pending_status: StatusTransition::None,
            loading: false,
            condition_field: config.condition_field.clone(),
            page_window: config.page_window,
            latest_request: 0,
        }
    }

    /// Resets the query dimensions for a newly mounted screen.
    ///
    /// Items and pagination are left alone until the first response lands.
    pub fn reset(&mut self, options: ListOptions) {
        self.schema = options.schema;
        self.base_condition = options.base_condition;
        self.condition = options.condition;
        self.sort = options.sort;
        self.order = options.order;
        self.limit = options.limit;
        self.select = options.select;
        self.join_foreign_keys = options.join_foreign_keys;
        self.searchable_fields = options.searchable_fields;
        self.page = 1;
        self.keyword.clear();
        self.selected_ids.clear();
        self.pending_status = StatusTransition::None;
    }

    pub fn condition_field(&self) -> &str {
        &self.condition_field
    }

    /// The predicate sent to the store: base condition, view and search.
    ///
    /// The search never replaces a clause of the base condition; it is
    /// always an extra restriction on top of it.
    pub fn predicate(&self) -> Predicate {
        let mut predicate = self.base_condition.clone();
        if !is_unfiltered_view(&self.condition) {
            predicate = predicate.with(self.condition_field.clone(), self.condition.clone());
        }
        match self.search_clause() {
            Some(search) => with_search(predicate, search),
            None => predicate,
        }
    }

    fn search_clause(&self) -> Option<Value> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() || self.searchable_fields.is_empty() {
            return None;
        }
        let pattern = regex::escape(keyword);
        let clauses = self
            .searchable_fields
            .iter()
            .map(|field| json!({ field: { "$regex": pattern, "$options": "i" } }))
            .collect();
        Some(Value::Array(clauses))
    }

    pub fn build_query(&self, page: u64) -> ListQuery {
        ListQuery {
            schema: self.schema.clone(),
            condition: self.predicate(),
            select: self.select.clone(),
            sort: SortSpec::new(self.sort.clone(), self.order),
            page,
            limit: self.limit,
            join_foreign_keys: self.join_foreign_keys,
        }
    }

    /// Issues a new request id; any earlier id becomes stale.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest_request += 1;
        self.loading = true;
        RequestTicket(self.latest_request)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest_request
    }

    /// Applies a list response if `ticket` is still the latest request.
    pub fn apply_page(
        &mut self,
        ticket: RequestTicket,
        requested_page: u64,
        response: ListPage,
    ) -> FetchOutcome {
        if !self.is_latest(ticket) {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        self.page = response.page.filter(|p| *p > 0).unwrap_or(requested_page);
        self.items = response.data;
        self.pagination = PageWindow::derive(self.page, self.limit, response.total, self.page_window);
        FetchOutcome::Applied
    }

    /// Drops selected ids that are not among the current items.
    pub fn retain_visible_selection(&mut self) {
        let items = &self.items;
        self.selected_ids
            .retain(|id| items.iter().any(|item| &item.id == id));
    }

    /// Marks a failed request as finished, keeping the last good items.
    pub fn fail_request(&mut self, ticket: RequestTicket) -> FetchOutcome {
        if !self.is_latest(ticket) {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        FetchOutcome::Unchanged
    }

    /// Toggles one row, or every row when `id` is `None`.
    ///
    /// Ids not present in `items` are ignored.
    pub fn toggle_selection(&mut self, id: Option<&EntityId>) -> FetchOutcome {
        match id {
            Some(id) => {
                if !self.items.iter().any(|item| &item.id == id) {
                    return FetchOutcome::Unchanged;
                }
                if let Some(pos) = self.selected_ids.iter().position(|s| s == id) {
                    self.selected_ids.remove(pos);
                } else {
                    self.selected_ids.push(id.clone());
                }
            }
            None => {
                if self.all_selected() {
                    self.selected_ids.clear();
                } else {
                    self.selected_ids = self.items.iter().map(|item| item.id.clone()).collect();
                }
            }
        }
        FetchOutcome::Applied
    }

    /// True when every item on the page is selected and nothing else is.
    pub fn all_selected(&self) -> bool {
        self.selected_ids.len() == self.items.len()
            && self
                .items
                .iter()
                .all(|item| self.selected_ids.contains(&item.id))
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Builds the request for the pending transition over the selection.
    pub fn status_change(&self) -> Option<StatusChange> {
        if !self.pending_status.is_pending() || self.selected_ids.is_empty() {
            return None;
        }
        Some(StatusChange {
            schema: self.schema.clone(),
            ids: self.selected_ids.clone(),
            status: self.pending_status,
        })
    }

    /// Reflects a confirmed status change locally.
    ///
    /// Transitions that move rows out of the current view remove them and
    /// shrink the total; the rest rewrite the condition field in place.
    pub fn apply_status_change(&mut self, change: &StatusChange) {
        if change.status.removes_rows() {
            let before = self.items.len();
            self.items.retain(|item| !change.ids.contains(&item.id));
            let removed = (before - self.items.len()) as u64;
            let total = self.pagination.total.saturating_sub(removed);
            self.pagination = PageWindow::derive(self.page, self.limit, total, self.page_window);
        } else if let Some(status) = change.status.resulting_status() {
            let field = self.condition_field.clone();
            for item in self
                .items
                .iter_mut()
                .filter(|item| change.ids.contains(&item.id))
            {
                item.set(field.clone(), status);
            }
        }
        self.selected_ids.clear();
        self.pending_status = StatusTransition::None;
    }
}

/// Adds the search `$or`. When the base already has an `$or`, both go
/// under `$and` next to any `$and` clauses the base carries.
fn with_search(mut predicate: Predicate, search: Value) -> Predicate {
    let Some(scope) = predicate.remove("$or") else {
        return predicate.with("$or", search);
    };
    let mut clauses = match predicate.remove("$and") {
        Some(Value::Array(clauses)) => clauses,
        Some(other) => vec![other],
        None => Vec::new(),
    };
    clauses.push(json!({ "$or": scope }));
    clauses.push(json!({ "$or": search }));
    predicate.with("$and", clauses)
}
