use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::StoreError;

/// Fields owned by the store; client attributes never overwrite them
const SYSTEM_FIELDS: &[&str] = &["id", "_id", "owner", "created_at", "updated_at"];

/// A persisted list document
#[derive(Debug, Clone, PartialEq)]
pub struct ListRecord {
    pub id: Uuid,
    pub owner: Uuid,
    /// Application-defined attributes supplied by the client
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListRecord {
    /// Plain-data form used in response bodies.
    ///
    /// System keys are written last so they always win over attributes.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        object.insert("id".to_string(), json!(self.id));
        object.insert("owner".to_string(), json!(self.owner));
        object.insert("created_at".to_string(), json!(self.created_at));
        object.insert("updated_at".to_string(), json!(self.updated_at));
        Value::Object(object)
    }

    pub fn is_owned_by(&self, principal_id: Uuid) -> bool {
        self.owner == principal_id
    }

    /// Apply a shallow merge of `changes`, bumping `updated_at` when anything was applied
    pub(crate) fn merge(&mut self, changes: Map<String, Value>) {
        if changes.is_empty() {
            return;
        }
        for (key, value) in changes {
            self.fields.insert(key, value);
        }
        self.updated_at = Utc::now();
    }
}

/// Input for creating a list. The owner comes from the authenticated principal.
#[derive(Debug, Clone)]
pub struct NewList {
    pub owner: Uuid,
    pub fields: Map<String, Value>,
}

impl NewList {
    pub fn new(owner: Uuid, fields: Map<String, Value>) -> Self {
        Self { owner, fields }
    }
}

/// Validate client attributes at the persistence boundary.
///
/// System fields are dropped; an empty attribute name is rejected.
pub fn validate_attributes(fields: Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    let mut clean = Map::with_capacity(fields.len());

    for (key, value) in fields {
        if key.trim().is_empty() {
            return Err(StoreError::Validation {
                field: key,
                message: "attribute name must not be empty".to_string(),
            });
        }
        if SYSTEM_FIELDS.contains(&key.as_str()) {
            continue;
        }
        clean.insert(key, value);
    }

    Ok(clean)
}
