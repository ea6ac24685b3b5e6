//! Wire model for the collection-listing endpoint.
//!
//! A list request is a query string with these parameters:
//!
//! | Parameter | Encoding |
//! |-----------|----------|
//! | `schema` | collection name |
//! | `condition` | JSON predicate object |
//! | `select` | JSON projection, all `1` or all `0` |
//! | `sort` | JSON `{ "<field>": 1 \| -1 }` |
//! | `page`, `limit` | integers |
//! | `joinForeignKeys` | `true` / `false` |
//!
//! The response carries the matching records plus the total count and the
//! page that was served.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

use crate::ids::EntityId;
use crate::records::Record;
use crate::status::StatusTransition;

/// Sort direction, `1` ascending and `-1` descending on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// The wire value, `1` or `-1`.
    pub const fn as_i8(self) -> i8 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    /// Parses the wire value.
    pub const fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(SortOrder::Ascending),
            -1 => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// Human-readable label used by the filter control.
    pub const fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for sort order strings that are neither a label nor a wire value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort order: {0} (expected asc, desc, 1 or -1)")]
pub struct InvalidSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = InvalidSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "asc" | "ascending" => Ok(SortOrder::Ascending),
            "-1" | "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(InvalidSortOrder(s.to_string())),
        }
    }
}

impl Serialize for SortOrder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        SortOrder::from_i64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid sort order: {value}")))
    }
}

/// A sort field and direction, serialized as `{ "<field>": 1 | -1 }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl Serialize for SortSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = Map::new();
        map.insert(self.field.clone(), json!(self.order.as_i8()));
        map.serialize(serializer)
    }
}

/// A JSON predicate object selecting a subset of a collection.
///
/// Keys are field names (or operators such as `$or`) and values are what the
/// store matches them against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicate(Map<String, Value>);

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a clause.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Combines two predicates; clauses in `other` win on key collisions.
    #[must_use]
    pub fn and(mut self, other: Predicate) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Removes a clause, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Parses a serialized predicate.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl From<Map<String, Value>> for Predicate {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Field projection for a list request.
///
/// The store accepts either an include-list or an exclude-list, never both,
/// so the two styles are separate variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Projection {
    /// Return every field.
    #[default]
    All,
    /// Return only these fields.
    Include(Vec<String>),
    /// Return every field except these.
    Exclude(Vec<String>),
}

impl Projection {
    /// The projection object sent as `select`.
    pub fn to_value(&self) -> Value {
        let (fields, flag) = match self {
            Projection::All => return Value::Object(Map::new()),
            Projection::Include(fields) => (fields, 1),
            Projection::Exclude(fields) => (fields, 0),
        };
        Value::Object(
            fields
                .iter()
                .map(|field| (field.clone(), json!(flag)))
                .collect(),
        )
    }

    /// Applies the projection to a record's fields (the `_id` is always kept).
    pub fn apply(&self, fields: &Map<String, Value>) -> Map<String, Value> {
        match self {
            Projection::All => fields.clone(),
            Projection::Include(keep) => fields
                .iter()
                .filter(|(name, _)| keep.iter().any(|k| k == *name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            Projection::Exclude(drop) => fields
                .iter()
                .filter(|(name, _)| !drop.iter().any(|d| d == *name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

impl Serialize for Projection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Projection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for (field, flag) in map {
            match flag.as_i64() {
                Some(1) => include.push(field),
                Some(0) => exclude.push(field),
                _ => {
                    return Err(serde::de::Error::custom(format!(
                        "projection flag for {field} must be 0 or 1"
                    )));
                }
            }
        }
        match (include.is_empty(), exclude.is_empty()) {
            (true, true) => Ok(Projection::All),
            (false, true) => Ok(Projection::Include(include)),
            (true, false) => Ok(Projection::Exclude(exclude)),
            (false, false) => Err(serde::de::Error::custom(
                "projection mixes included and excluded fields",
            )),
        }
    }
}

/// One request against the collection-listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub schema: String,
    pub condition: Predicate,
    pub select: Projection,
    pub sort: SortSpec,
    pub page: u64,
    pub limit: u64,
    pub join_foreign_keys: bool,
}

impl ListQuery {
    /// Encodes the query as the endpoint's query-string pairs.
    ///
    /// JSON-valued parameters are serialized compactly.
    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("schema", self.schema.clone()),
            ("condition", self.condition.to_json_string()?),
            ("select", serde_json::to_string(&self.select)?),
            ("sort", serde_json::to_string(&self.sort)?),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("joinForeignKeys", self.join_foreign_keys.to_string()),
        ])
    }
}

/// A page of records returned by the collection store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    #[serde(alias = "items")]
    pub data: Vec<Record>,
    /// Total matching records across all pages
    #[serde(default, alias = "count")]
    pub total: u64,
    /// Page that was served; absent when the store does not echo it
    #[serde(
        default,
        serialize_with = "counterdesk_core::serde::serialize_zero_as_none",
        deserialize_with = "counterdesk_core::serde::deserialize_zero_as_none"
    )]
    pub page: Option<u64>,
}

/// A bulk status change for a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub schema: String,
    pub ids: Vec<EntityId>,
    pub status: StatusTransition,
}

/// The store's answer to a [`StatusChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
