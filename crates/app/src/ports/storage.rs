//! Storage port: one generic accessor for every record kind.
//!
//! Writes are two-phase. A caller stages its writes in its own
//! [`Changes`] and hands them to [`Storage::save`], which applies all of
//! them or none. Staged changes belong to the caller, so one caller's
//! failed save never affects another caller's writes.

use std::future::Future;

use hbnb_domain::error::HbnbError;
use hbnb_domain::id::RecordId;
use hbnb_domain::kind::Kind;
use hbnb_domain::record::Record;

/// A single staged write.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Store a record that does not exist yet.
    Insert(Record),
    /// Replace a stored record. Fails with `NotFound` if it is gone.
    Update(Record),
    /// Remove a stored record. Fails with `NotFound` if it is gone.
    Delete(Kind, RecordId),
}

impl Change {
    /// The kind and id of the record this change targets.
    #[must_use]
    pub fn target(&self) -> (Kind, RecordId) {
        match self {
            Self::Insert(record) | Self::Update(record) => (record.kind, record.id),
            Self::Delete(kind, id) => (*kind, *id),
        }
    }
}

/// Writes staged by one caller, applied in order by [`Storage::save`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Changes(Vec<Change>);

impl Changes {
    /// Stage a new record.
    pub fn insert(&mut self, record: Record) -> &mut Self {
        self.0.push(Change::Insert(record));
        self
    }

    /// Stage the replacement of an existing record.
    pub fn update(&mut self, record: Record) -> &mut Self {
        self.0.push(Change::Update(record));
        self
    }

    /// Stage the removal of a record.
    pub fn delete(&mut self, kind: Kind, id: RecordId) -> &mut Self {
        self.0.push(Change::Delete(kind, id));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Changes {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Persistence for [`Record`]s of every [`Kind`].
pub trait Storage {
    /// Get a record by kind and id.
    fn get(
        &self,
        kind: Kind,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Record>, HbnbError>> + Send;

    /// Get every record of `kind`, in insertion order.
    fn all(&self, kind: Kind) -> impl Future<Output = Result<Vec<Record>, HbnbError>> + Send;

    /// Get every record of `kind` whose `field` attribute holds `id`,
    /// in insertion order.
    fn find_by(
        &self,
        kind: Kind,
        field: &'static str,
        id: RecordId,
    ) -> impl Future<Output = Result<Vec<Record>, HbnbError>> + Send;

    /// Count the records of `kind`.
    fn count(&self, kind: Kind) -> impl Future<Output = Result<u64, HbnbError>> + Send;

    /// Flush `changes` atomically: either every change is applied or none.
    ///
    /// An update or delete whose record no longer exists fails the whole
    /// save with `NotFound`.
    fn save(&self, changes: Changes) -> impl Future<Output = Result<(), HbnbError>> + Send;
}
