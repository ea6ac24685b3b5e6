//! Options a list screen mounts with, and the filter tuple it changes later.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::query::{Predicate, Projection, SortOrder};

/// View name that applies no condition clause.
pub const ALL_VIEW: &str = "all";

/// Everything a list screen tells the controller when it mounts.
///
/// # Example
///
/// ```
/// use counterdesk_models::{ListOptions, Projection, SortOrder};
/// use validator::Validate;
///
/// let options = ListOptions::new("customer")
///     .with_condition("active")
///     .with_sort("createdAt", SortOrder::Descending)
///     .with_limit(25)
///     .with_select(Projection::Include(vec!["name".into(), "phone".into()]))
///     .with_searchable_fields(["name", "phone"]);
///
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ListOptions {
    /// Collection (schema) to list
    #[validate(length(min = 1, message = "Schema must not be empty"))]
    pub schema: String,
    /// Screen-specific clauses sent with every request (e.g. a branch filter)
    #[serde(default)]
    pub base_condition: Predicate,
    /// Named view, e.g. `active` or `deleted`; empty or `all` adds no clause
    #[serde(default)]
    pub condition: String,
    #[validate(length(min = 1, message = "Sort field must not be empty"))]
    pub sort: String,
    #[serde(default)]
    pub order: SortOrder,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: u64,
    #[serde(default)]
    pub select: Projection,
    #[serde(default)]
    pub join_foreign_keys: bool,
    /// Fields matched by free-text search
    #[serde(default)]
    pub searchable_fields: Vec<String>,
}

impl ListOptions {
    /// Options for `schema` with newest-first ordering and ten rows per page.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            base_condition: Predicate::new(),
            condition: String::new(),
            sort: "createdAt".to_string(),
            order: SortOrder::Descending,
            limit: 10,
            select: Projection::All,
            join_foreign_keys: false,
            searchable_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base_condition(mut self, predicate: Predicate) -> Self {
        self.base_condition = predicate;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = field.into();
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_select(mut self, select: Projection) -> Self {
        self.select = select;
        self
    }

    #[must_use]
    pub fn with_join_foreign_keys(mut self, join: bool) -> Self {
        self.join_foreign_keys = join;
        self
    }

    #[must_use]
    pub fn with_searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// The four dimensions the filter control edits together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilterSelection {
    pub condition: String,
    pub order: SortOrder,
    #[validate(length(min = 1, message = "Sort field must not be empty"))]
    pub sort: String,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub limit: u64,
}

/// Whether a view name narrows the query at all.
pub fn is_unfiltered_view(condition: &str) -> bool {
    condition.is_empty() || condition == ALL_VIEW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(ListOptions::new("product").validate().is_ok());
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        let options = ListOptions::new("");
        let errors = options.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("schema"));
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let options = ListOptions::new("product").with_limit(0);
        let errors = options.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("limit"));
    }

    #[test]
    fn test_filter_selection_validation() {
        let selection = FilterSelection {
            condition: "active".to_string(),
            order: SortOrder::Ascending,
            sort: String::new(),
            limit: 10,
        };
        assert!(selection.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let options: ListOptions =
            serde_json::from_str(r#"{"schema":"sale","sort":"total","limit":20}"#).unwrap();
        assert_eq!(options.order, SortOrder::Descending);
        assert_eq!(options.select, Projection::All);
        assert!(options.searchable_fields.is_empty());
    }

    #[test]
    fn test_unfiltered_views() {
        assert!(is_unfiltered_view(""));
        assert!(is_unfiltered_view(ALL_VIEW));
        assert!(!is_unfiltered_view("deleted"));
    }
}
