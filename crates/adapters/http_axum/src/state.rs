//! Shared application state for axum handlers.

use std::sync::Arc;

use hbnb_app::ports::Storage;
use hbnb_app::services::record_service::RecordService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the storage itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Record CRUD and stats service.
    pub records: Arc<RecordService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<S> AppState<S>
where
    S: Storage + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(records: RecordService<S>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    pub fn from_arc(records: Arc<RecordService<S>>) -> Self {
        Self { records }
    }
}
