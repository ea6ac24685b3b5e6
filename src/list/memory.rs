//! In-memory [`CollectionStore`] used by tests and demos.
//!
//! Evaluates the subset of the predicate language the controller emits:
//! equality on fields, `$and` / `$or` of clauses, case-insensitive `$regex`,
//! sort, projection and paging.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use regex::RegexBuilder;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use counterdesk_models::{
    ListPage, ListQuery, Predicate, Record, SortOrder, StatusChange, StatusChangeResponse,
};

use super::store::{CollectionStore, StoreError};

const DEFAULT_STATUS_FIELD: &str = "status";

#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    status_field: Option<String>,
    queries: Mutex<Vec<ListQuery>>,
    status_requests: Mutex<Vec<StatusChange>>,
    list_delays: Mutex<VecDeque<Duration>>,
    fail_lists: Mutex<Option<String>>,
    reject_status: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(mut self, schema: impl Into<String>, records: Vec<Record>) -> Self {
        self.collections.get_mut().insert(schema.into(), records);
        self
    }

    /// Field that status updates write; matches `ListConfig::condition_field`.
    #[must_use]
    pub fn with_status_field(mut self, field: impl Into<String>) -> Self {
        self.status_field = Some(field.into());
        self
    }

    pub fn status_field(&self) -> &str {
        self.status_field.as_deref().unwrap_or(DEFAULT_STATUS_FIELD)
    }

    /// Delays upcoming list calls, one entry per call.
    #[must_use]
    pub fn with_list_delays(mut self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.list_delays.get_mut().extend(delays);
        self
    }

    /// Makes list calls fail with a 500 carrying `message`; `None` restores them.
    pub async fn fail_lists(&self, message: Option<&str>) {
        *self.fail_lists.lock().await = message.map(str::to_string);
    }

    /// Makes status updates answer `success = false` with `message`.
    pub async fn reject_status(&self, message: Option<&str>) {
        *self.reject_status.lock().await = message.map(str::to_string);
    }

    pub async fn records(&self, schema: &str) -> Vec<Record> {
        self.collections
            .lock()
            .await
            .get(schema)
            .cloned()
            .unwrap_or_default()
    }

    /// Every list query received, oldest first.
    pub async fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().await.clone()
    }

    pub async fn last_query(&self) -> Option<ListQuery> {
        self.queries.lock().await.last().cloned()
    }

    pub async fn status_requests(&self) -> Vec<StatusChange> {
        self.status_requests.lock().await.clone()
    }
}

impl CollectionStore for InMemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<ListPage, StoreError> {
        self.queries.lock().await.push(query.clone());

        let delay = self.list_delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.fail_lists.lock().await.clone() {
            return Err(StoreError::Status {
                status: 500,
                message,
            });
        }

        let collections = self.collections.lock().await;
        let mut matched: Vec<&Record> = collections
            .get(&query.schema)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches_predicate(record, &query.condition))
                    .collect()
            })
            .unwrap_or_default();

        matched.sort_by(|a, b| {
            let ordering = compare_values(a.get(&query.sort.field), b.get(&query.sort.field));
            match query.sort.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let total = matched.len() as u64;
        let limit = query.limit.max(1);
        let page = query.page.max(1);
        let skip = (page - 1).saturating_mul(limit) as usize;

        let data = matched
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .map(|record| Record {
                id: record.id.clone(),
                fields: query.select.apply(&record.fields),
            })
            .collect();

        Ok(ListPage {
            data,
            total,
            page: Some(page),
        })
    }

    async fn update_status(&self, change: &StatusChange) -> Result<StatusChangeResponse, StoreError> {
        self.status_requests.lock().await.push(change.clone());

        if let Some(message) = self.reject_status.lock().await.clone() {
            return Ok(StatusChangeResponse {
                success: false,
                message,
            });
        }

        let status = change
            .status
            .resulting_status()
            .ok_or_else(|| StoreError::Rejected("no status given".to_string()))?;

        let mut collections = self.collections.lock().await;
        let mut updated = 0;
        if let Some(records) = collections.get_mut(&change.schema) {
            for record in records.iter_mut().filter(|r| change.ids.contains(&r.id)) {
                record.set(self.status_field(), status);
                updated += 1;
            }
        }

        Ok(StatusChangeResponse {
            success: true,
            message: format!("Updated {updated} records"),
        })
    }
}

fn matches_predicate(record: &Record, predicate: &Predicate) -> bool {
    predicate
        .as_map()
        .iter()
        .all(|(field, expected)| matches_clause(&record.fields, field, expected))
}

fn matches_object(fields: &Map<String, Value>, clause: &Value) -> bool {
    clause.as_object().is_some_and(|clause| {
        clause
            .iter()
            .all(|(field, expected)| matches_clause(fields, field, expected))
    })
}

fn matches_clause(fields: &Map<String, Value>, field: &str, expected: &Value) -> bool {
    match field {
        "$or" => {
            return expected
                .as_array()
                .is_some_and(|clauses| clauses.iter().any(|c| matches_object(fields, c)));
        }
        "$and" => {
            return expected
                .as_array()
                .is_some_and(|clauses| clauses.iter().all(|c| matches_object(fields, c)));
        }
        _ => {}
    }

    let actual = fields.get(field);
    match expected.as_object().and_then(|op| op.get("$regex").map(|re| (op, re))) {
        Some((op, pattern)) => {
            let case_insensitive = op
                .get("$options")
                .and_then(Value::as_str)
                .is_some_and(|options| options.contains('i'));
            let Some(pattern) = pattern.as_str() else {
                return false;
            };
            let Ok(regex) = RegexBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
            else {
                return false;
            };
            match actual {
                Some(Value::String(s)) => regex.is_match(s),
                Some(Value::Number(n)) => regex.is_match(&n.to_string()),
                _ => false,
            }
        }
        None => actual == Some(expected),
    }
}

/// Orders numbers numerically and strings lexically; missing values sort first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
