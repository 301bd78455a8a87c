//! # hbnb-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `Storage` port defined in `hbnb-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain records and per-kind table rows
//!
//! ## Dependency rule
//! Depends on `hbnb-app` (for the port trait) and `hbnb-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod record_store;

pub use error::StorageError;
pub use pool::Database;
pub use record_store::SqliteRecordStorage;
