//! Record service: the CRUD use-cases shared by every resource kind.
//!
//! Validation happens before any write and short-circuits on the first
//! failure: the body must be a JSON object, required fields are checked in
//! their declared order, then the parent and every referenced record must
//! exist.

use hbnb_domain::error::{HbnbError, NotFoundError, ValidationError};
use hbnb_domain::id::RecordId;
use hbnb_domain::kind::Kind;
use hbnb_domain::record::Record;
use serde_json::{Map, Value};

use crate::ports::Storage;
use crate::ports::storage::Changes;

/// Application service for record CRUD and statistics.
pub struct RecordService<S> {
    storage: S,
}

impl<S: Storage + Sync> RecordService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List every record of `kind`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    pub async fn list(&self, kind: Kind) -> Result<Vec<Record>, HbnbError> {
        self.storage.all(kind).await
    }

    /// List the records of `kind` nested under the parent `parent_id`
    /// (e.g. the places of a city).
    ///
    /// Kinds without a parent are listed unscoped.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] naming the parent kind when the
    /// parent does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn list_children(
        &self,
        kind: Kind,
        parent_id: &str,
    ) -> Result<Vec<Record>, HbnbError> {
        let Some(parent) = kind.schema().parent else {
            return self.list(kind).await;
        };
        let owner = self.resolve(parent.kind, parent_id).await?;
        self.storage.find_by(kind, parent.field, owner.id).await
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when `id` is malformed or unknown,
    /// or a storage error.
    pub async fn get(&self, kind: Kind, id: &str) -> Result<Record, HbnbError> {
        self.resolve(kind, id).await
    }

    /// Create a record of `kind` from a request body.
    ///
    /// `parent_id` is the id taken from the request path for nested kinds
    /// and is ignored for the others.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the body is not an object or a
    /// required field is missing, [`HbnbError::NotFound`] when the parent or
    /// a referenced record is missing, or a storage error.
    #[tracing::instrument(skip(self, body))]
    pub async fn create(
        &self,
        kind: Kind,
        parent_id: Option<&str>,
        body: Value,
    ) -> Result<Record, HbnbError> {
        let schema = kind.schema();
        let body = into_object(body)?;

        if let Some(missing) = schema
            .required
            .iter()
            .copied()
            .find(|field| !body.contains_key(*field))
        {
            return Err(ValidationError::Missing(missing).into());
        }

        let mut record = Record::new(kind);
        for field in schema.required {
            record.attributes.insert((*field).to_string(), body[*field].clone());
        }
        record.assign(&body, &schema);

        if let Some(parent) = schema.parent {
            let raw = parent_id.unwrap_or_default();
            let owner = self.resolve(parent.kind, raw).await?;
            record
                .attributes
                .insert(parent.field.to_string(), Value::String(owner.id.to_string()));
        }

        for reference in schema.references {
            let value = body.get(reference.field).unwrap_or(&Value::Null);
            let raw = value.as_str().map_or_else(|| value.to_string(), str::to_string);
            self.resolve(reference.kind, &raw).await?;
        }

        let mut changes = Changes::default();
        changes.insert(record.clone());
        self.storage.save(changes).await?;
        tracing::debug!(id = %record.id, "record created");
        Ok(record)
    }

    /// Apply a partial update to an existing record.
    ///
    /// Every body key except the kind's protected fields overwrites the
    /// stored attribute; protected keys are ignored without error.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the body is not an object,
    /// [`HbnbError::NotFound`] when the record is missing or is deleted
    /// before the update lands, or a storage error.
    #[tracing::instrument(skip(self, body))]
    pub async fn update(&self, kind: Kind, id: &str, body: Value) -> Result<Record, HbnbError> {
        let body = into_object(body)?;
        let mut record = self.resolve(kind, id).await?;

        record.merge(&body, &kind.schema());

        let mut changes = Changes::default();
        changes.update(record.clone());
        self.storage.save(changes).await?;
        Ok(record)
    }

    /// Delete a record. Records nested under it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the record is missing, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, kind: Kind, id: &str) -> Result<(), HbnbError> {
        let record = self.resolve(kind, id).await?;
        let mut changes = Changes::default();
        changes.delete(kind, record.id);
        self.storage.save(changes).await
    }

    /// Count the stored records of every kind, in [`Kind::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    pub async fn stats(&self) -> Result<Vec<(Kind, u64)>, HbnbError> {
        let mut counts = Vec::with_capacity(Kind::ALL.len());
        for kind in Kind::ALL {
            counts.push((kind, self.storage.count(kind).await?));
        }
        Ok(counts)
    }

    async fn resolve(&self, kind: Kind, raw: &str) -> Result<Record, HbnbError> {
        let not_found = || NotFoundError::new(kind, raw);
        let id = raw.parse::<RecordId>().map_err(|_| not_found())?;
        self.storage.get(kind, id).await?.ok_or_else(|| not_found().into())
    }
}

fn into_object(body: Value) -> Result<Map<String, Value>, ValidationError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAJson),
    }
}
