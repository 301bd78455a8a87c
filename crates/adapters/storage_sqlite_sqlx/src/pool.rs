//! Opening the database file and keeping its schema current.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;
use crate::record_store::SqliteRecordStorage;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// An open, migrated `SQLite` database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url` (e.g. `sqlite:hbnb.db?mode=rwc` or
    /// `sqlite::memory:`), creating the file if needed, and apply pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the connection fails
    /// or a migration cannot be applied.
    pub async fn open(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        MIGRATOR.run(&pool).await?;
        tracing::info!(url, "database ready");

        Ok(Self { pool })
    }

    /// A record storage sharing this database's connection pool.
    #[must_use]
    pub fn storage(&self) -> SqliteRecordStorage {
        SqliteRecordStorage::new(self.pool.clone())
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for every pooled connection to close.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
