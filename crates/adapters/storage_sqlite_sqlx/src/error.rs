//! Failures of the `SQLite` adapter.

use hbnb_domain::error::HbnbError;

/// Anything that can go wrong between a [`Record`](hbnb_domain::record::Record)
/// and its table row.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite query failed")]
    Sqlx(#[from] sqlx::Error),

    #[error("record attributes could not be encoded")]
    Attributes(#[from] serde_json::Error),

    #[error("schema migration failed")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

// The service layer only sees an opaque storage failure.
impl From<StorageError> for HbnbError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
