//! Record: one stored object of any [`Kind`].
//!
//! Kind-specific fields live in a schemaless attribute map so that
//! updates can introduce keys the schema never declared (a User may gain
//! a `first_name`). The JSON form flattens the attributes next to the
//! system-managed fields:
//!
//! ```json
//! {"id": "…", "__class__": "State", "created_at": "…", "updated_at": "…", "name": "Ohio"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::RecordId;
use crate::kind::Kind;
use crate::schema::Schema;
use crate::time::{self, Timestamp};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "__class__")]
    pub kind: Kind,
    #[serde(with = "crate::time::serde_format")]
    pub created_at: Timestamp,
    #[serde(with = "crate::time::serde_format")]
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// A fresh record of `kind` with a new id and both timestamps set to now.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        let now = time::now();
        Self {
            id: RecordId::new(),
            kind,
            created_at: now,
            updated_at: now,
            attributes: Map::new(),
        }
    }

    /// Set one attribute, returning the record.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    /// Borrow an attribute.
    #[must_use]
    pub fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Read an attribute holding the id of another record.
    ///
    /// Returns `None` when the attribute is absent, not a string, or not a
    /// well-formed id.
    #[must_use]
    pub fn foreign_key(&self, field: &str) -> Option<RecordId> {
        self.attribute(field)
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
    }

    /// Copy every non-protected key of `patch` onto this record.
    ///
    /// Values are taken as-is; protected keys are silently dropped.
    pub fn assign(&mut self, patch: &Map<String, Value>, schema: &Schema) {
        for (field, value) in patch {
            if !schema.is_protected(field) {
                self.attributes.insert(field.clone(), value.clone());
            }
        }
    }

    /// [`assign`](Self::assign) then refresh `updated_at`.
    pub fn merge(&mut self, patch: &Map<String, Value>, schema: &Schema) {
        self.assign(patch, schema);
        self.touch();
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = time::now();
    }
}
