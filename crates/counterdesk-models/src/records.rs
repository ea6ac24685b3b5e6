//! Records fetched from a collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::EntityId;

/// A single row of a collection.
///
/// Only the `_id` is typed; every other field is kept as JSON because list
/// screens render whatever the schema carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Adds (or replaces) a field.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_deserialize_flattens_fields() {
        let record: Record =
            serde_json::from_str(r#"{"_id":"64b7","name":"Ada","total":12.5}"#).unwrap();
        assert_eq!(record.id.as_str(), "64b7");
        assert_eq!(record.get_str("name"), Some("Ada"));
        assert_eq!(record.get("total"), Some(&json!(12.5)));
        assert!(record.get("_id").is_none());
    }

    #[test]
    fn test_record_serialize() {
        let record = Record::new("a1").with("status", "active");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"_id":"a1","status":"active"}"#);
    }

    #[test]
    fn test_record_set() {
        let mut record = Record::new("a1").with("status", "active");
        record.set("status", "disabled");
        assert_eq!(record.get_str("status"), Some("disabled"));
    }
}
