//! The filter accordion.
//!
//! Four sections (condition, order, sort, limit) of which at most one is
//! open. Choosing an option closes the accordion and re-filters the list.

use counterdesk_models::{FilterSelection, SortOrder};

use crate::list::{CollectionStore, FetchOutcome, ListError, ListQueryController, Notifier};

const CREATED_AT_FIELD: &str = "createdAt";
const CREATED_AT_LABEL: &str = "created time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Section {
    Condition = 1,
    Order = 2,
    Sort = 3,
    Limit = 4,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Condition, Section::Order, Section::Sort, Section::Limit];

    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }
}

/// The option lists a screen hands to the filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterInputs {
    pub conditions: Vec<String>,
    pub sorts: Vec<String>,
    pub limits: Vec<u64>,
}

impl FilterInputs {
    pub fn new<C, S>(conditions: C, sorts: S, limits: Vec<u64>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            conditions: conditions.into_iter().map(Into::into).collect(),
            sorts: sorts.into_iter().map(Into::into).collect(),
            limits,
        }
    }

    /// Conditions ordered shortest first; ties keep their input order.
    pub fn sorted_conditions(&self) -> Vec<String> {
        sorted_by_length(&self.conditions)
    }

    /// Sort fields ordered shortest first; ties keep their input order.
    pub fn sorted_sorts(&self) -> Vec<String> {
        sorted_by_length(&self.sorts)
    }

    /// The sort field a picked label or field stands for.
    pub fn sort_field(&self, label: &str) -> String {
        sort_field(label, &self.sorts)
    }
}

fn sorted_by_length(values: &[String]) -> Vec<String> {
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| v.chars().count());
    sorted
}

/// One option picked in an open section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChoice {
    Condition(String),
    Order(SortOrder),
    Sort(String),
    Limit(u64),
}

impl FilterChoice {
    pub fn section(&self) -> Section {
        match self {
            FilterChoice::Condition(_) => Section::Condition,
            FilterChoice::Order(_) => Section::Order,
            FilterChoice::Sort(_) => Section::Sort,
            FilterChoice::Limit(_) => Section::Limit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterControl {
    active: Option<Section>,
    last_inputs: Option<FilterInputs>,
}

impl FilterControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Section> {
        self.active
    }

    /// The open section's tag, or 0 when all are closed.
    pub fn active_tag(&self) -> u8 {
        self.active.map_or(0, Section::tag)
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.active == Some(section)
    }

    /// Opens `section`, closing any other; closes it if it was already open.
    pub fn toggle(&mut self, section: Section) {
        self.active = if self.is_open(section) { None } else { Some(section) };
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    /// Closes the accordion when the screen's option lists change.
    ///
    /// Returns true if the inputs differed from the last ones seen.
    pub fn sync_inputs(&mut self, inputs: &FilterInputs) -> bool {
        if self.last_inputs.as_ref() == Some(inputs) {
            return false;
        }
        self.last_inputs = Some(inputs.clone());
        self.active = None;
        true
    }

    /// Applies `choice` on top of the controller's current filter.
    pub async fn choose<S, N>(
        &mut self,
        choice: FilterChoice,
        controller: &ListQueryController<S, N>,
    ) -> Result<FetchOutcome, ListError>
    where
        S: CollectionStore,
        N: Notifier,
    {
        let state = controller.state().await;
        let mut selection = FilterSelection {
            condition: state.condition,
            order: state.order,
            sort: state.sort,
            limit: state.limit,
        };
        match choice {
            FilterChoice::Condition(condition) => selection.condition = condition,
            FilterChoice::Order(order) => selection.order = order,
            FilterChoice::Sort(sort) => {
                let sorts = self.last_inputs.as_ref().map_or(&[][..], |inputs| &inputs.sorts[..]);
                selection.sort = sort_field(&sort, sorts);
            }
            FilterChoice::Limit(limit) => selection.limit = limit,
        }
        self.close();
        controller.filter_data(selection).await
    }
}

/// Display label for a sort field: `createdAt` is "created time", other
/// fields are split into lowercase words at case changes and underscores.
pub fn sort_label(field: &str) -> String {
    if field == CREATED_AT_FIELD {
        return CREATED_AT_LABEL.to_string();
    }
    let mut label = String::with_capacity(field.len() + 4);
    let mut previous_lower = false;
    for c in field.chars() {
        if c == '_' {
            if !label.is_empty() && !label.ends_with(' ') {
                label.push(' ');
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower {
            label.push(' ');
        }
        label.extend(c.to_lowercase());
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    label
}

/// Maps a picked label back to the field it was made from.
///
/// `sorts` are the fields the screen offers. A label is looked up against
/// them rather than rebuilt, so `created_at` or `URL` come back unchanged.
/// Field names, and labels matching no offered field, pass through.
pub fn sort_field(label: &str, sorts: &[String]) -> String {
    if label == CREATED_AT_LABEL {
        return CREATED_AT_FIELD.to_string();
    }
    if sorts.iter().any(|field| field == label) {
        return label.to_string();
    }
    sorts
        .iter()
        .find(|field| sort_label(field) == label)
        .cloned()
        .unwrap_or_else(|| label.to_string())
}

/// Whether the option (a field or its label) names the current sort field.
pub fn is_sort_active(option: &str, current: &str) -> bool {
    option == current || sort_label(current) == option
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_exclusive() {
        let mut control = FilterControl::new();
        assert_eq!(control.active_tag(), 0);
        control.toggle(Section::Sort);
        assert_eq!(control.active_tag(), 3);
        control.toggle(Section::Condition);
        assert_eq!(control.active(), Some(Section::Condition));
        control.toggle(Section::Condition);
        assert_eq!(control.active_tag(), 0);
    }

    #[test]
    fn test_section_tags() {
        assert_eq!(Section::from_tag(4), Some(Section::Limit));
        assert_eq!(Section::from_tag(0), None);
        assert_eq!(FilterChoice::Limit(5).section(), Section::Limit);
    }

    #[test]
    fn test_sync_inputs_resets_on_change() {
        let mut control = FilterControl::new();
        let inputs = FilterInputs::new(["active"], ["name"], vec![10]);
        assert!(control.sync_inputs(&inputs));
        control.toggle(Section::Limit);
        assert!(!control.sync_inputs(&inputs));
        assert_eq!(control.active(), Some(Section::Limit));

        let changed = FilterInputs::new(["active", "deleted"], ["name"], vec![10]);
        assert!(control.sync_inputs(&changed));
        assert_eq!(control.active_tag(), 0);
    }

    #[test]
    fn test_sorted_by_length_is_stable_and_non_mutating() {
        let inputs = FilterInputs::new(["deleted", "all", "active", "draft"], ["createdAt", "name"], vec![]);
        assert_eq!(
            inputs.sorted_conditions(),
            vec!["all", "draft", "active", "deleted"]
        );
        assert_eq!(inputs.sorted_sorts(), vec!["name", "createdAt"]);
        assert_eq!(inputs.conditions[0], "deleted");
    }

    #[test]
    fn test_sort_label() {
        assert_eq!(sort_label("createdAt"), "created time");
        assert_eq!(sort_label("grandTotal"), "grand total");
        assert_eq!(sort_label("name"), "name");
        assert_eq!(sort_label("created_at"), "created at");
        assert_eq!(sort_label("URL"), "url");
        assert_eq!(sort_label("customerID"), "customer id");
    }

    #[test]
    fn test_sort_field_round_trips_through_label() {
        let sorts: Vec<String> = ["createdAt", "grandTotal", "created_at", "URL", "customerID", "name"]
            .into_iter()
            .map(String::from)
            .collect();
        for field in &sorts {
            assert_eq!(&sort_field(&sort_label(field), &sorts), field);
            assert_eq!(&sort_field(field, &sorts), field);
        }
        assert_eq!(sort_field("created time", &[]), "createdAt");
        assert_eq!(sort_field("unknown label", &sorts), "unknown label");
    }

    #[test]
    fn test_is_sort_active() {
        assert!(is_sort_active("created time", "createdAt"));
        assert!(is_sort_active("createdAt", "createdAt"));
        assert!(is_sort_active("created at", "created_at"));
        assert!(!is_sort_active("name", "createdAt"));
        assert!(!is_sort_active("created at", "createdAt"));
    }
}
