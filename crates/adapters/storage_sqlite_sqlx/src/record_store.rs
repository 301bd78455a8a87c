//! `SQLite` implementation of [`Storage`].
//!
//! Each [`Kind`] maps to its own table (see [`Kind::table`]). Rows hold the
//! system fields as columns and every other attribute as a JSON object in
//! the `attributes` column.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};

use hbnb_app::ports::Storage;
use hbnb_app::ports::storage::{Change, Changes};
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::RecordId;
use hbnb_domain::kind::Kind;
use hbnb_domain::record::Record;

use crate::error::StorageError;

/// Raw row, converted into a [`Record`] once the kind is known.
struct Wrapper {
    id: String,
    created_at: String,
    updated_at: String,
    attributes: String,
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            attributes: row.try_get("attributes")?,
        })
    }
}

impl Wrapper {
    fn into_record(self, kind: Kind) -> Result<Record, sqlx::Error> {
        let id = self
            .id
            .parse::<RecordId>()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&self.updated_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();
        let attributes = serde_json::from_str(&self.attributes)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Record {
            id,
            kind,
            created_at,
            updated_at,
            attributes,
        })
    }

    fn collect(rows: Vec<Self>, kind: Kind) -> Result<Vec<Record>, sqlx::Error> {
        rows.into_iter().map(|row| row.into_record(kind)).collect()
    }
}

fn select_by_id(kind: Kind) -> String {
    format!("SELECT * FROM {} WHERE id = ?", kind.table())
}

fn select_all(kind: Kind) -> String {
    format!("SELECT * FROM {} ORDER BY rowid", kind.table())
}

fn select_by_field(kind: Kind) -> String {
    format!(
        "SELECT * FROM {} WHERE json_extract(attributes, ?) = ? ORDER BY rowid",
        kind.table()
    )
}

fn count_all(kind: Kind) -> String {
    format!("SELECT COUNT(*) FROM {}", kind.table())
}

fn insert(kind: Kind) -> String {
    format!(
        "INSERT INTO {} (id, created_at, updated_at, attributes) VALUES (?, ?, ?, ?)",
        kind.table()
    )
}

// An in-place update keeps the rowid, hence the listing order.
fn update_by_id(kind: Kind) -> String {
    format!(
        "UPDATE {} SET updated_at = ?, attributes = ? WHERE id = ?",
        kind.table()
    )
}

fn delete_by_id(kind: Kind) -> String {
    format!("DELETE FROM {} WHERE id = ?", kind.table())
}

/// `SQLite`-backed record storage.
pub struct SqliteRecordStorage {
    pool: SqlitePool,
}

impl SqliteRecordStorage {
    /// Create a new storage using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Run one change, returning the number of rows it touched.
async fn apply(conn: &mut SqliteConnection, change: Change) -> Result<u64, StorageError> {
    let result = match change {
        Change::Insert(record) => {
            sqlx::query(&insert(record.kind))
                .bind(record.id.to_string())
                .bind(record.created_at.to_rfc3339())
                .bind(record.updated_at.to_rfc3339())
                .bind(serde_json::to_string(&record.attributes)?)
                .execute(conn)
                .await?
        }
        Change::Update(record) => {
            sqlx::query(&update_by_id(record.kind))
                .bind(record.updated_at.to_rfc3339())
                .bind(serde_json::to_string(&record.attributes)?)
                .bind(record.id.to_string())
                .execute(conn)
                .await?
        }
        Change::Delete(kind, id) => {
            sqlx::query(&delete_by_id(kind))
                .bind(id.to_string())
                .execute(conn)
                .await?
        }
    };
    Ok(result.rows_affected())
}

/// Apply `changes` inside one transaction. Any failure rolls back every
/// change of the batch.
async fn flush(pool: &SqlitePool, changes: Changes) -> Result<(), HbnbError> {
    if changes.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await.map_err(StorageError::from)?;
    for change in changes {
        let (kind, id) = change.target();
        if apply(&mut *tx, change).await? == 0 {
            // dropping `tx` rolls back
            return Err(NotFoundError::new(kind, id.to_string()).into());
        }
    }
    tx.commit().await.map_err(StorageError::from)?;
    Ok(())
}

impl Storage for SqliteRecordStorage {
    async fn get(&self, kind: Kind, id: RecordId) -> Result<Option<Record>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(&select_by_id(kind))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let record = row
            .map(|w| w.into_record(kind))
            .transpose()
            .map_err(StorageError::from)?;
        Ok(record)
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Record>, HbnbError> {
        let rows: Vec<Wrapper> = sqlx::query_as(&select_all(kind))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::collect(rows, kind).map_err(StorageError::from)?)
    }

    async fn find_by(
        &self,
        kind: Kind,
        field: &'static str,
        id: RecordId,
    ) -> Result<Vec<Record>, HbnbError> {
        let rows: Vec<Wrapper> = sqlx::query_as(&select_by_field(kind))
            .bind(format!("$.{field}"))
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::collect(rows, kind).map_err(StorageError::from)?)
    }

    async fn count(&self, kind: Kind) -> Result<u64, HbnbError> {
        let (count,): (i64,) = sqlx::query_as(&count_all(kind))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn save(&self, changes: Changes) -> Result<(), HbnbError> {
        let count = changes.len();
        flush(&self.pool, changes).await?;
        tracing::debug!(count, "changes saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use serde_json::json;

    async fn setup() -> SqliteRecordStorage {
        Database::open("sqlite::memory:").await.unwrap().storage()
    }

    fn state(name: &str) -> Record {
        Record::new(Kind::State).with("name", name)
    }

    async fn insert_all(storage: &SqliteRecordStorage, records: &[Record]) {
        let mut changes = Changes::default();
        for record in records {
            changes.insert(record.clone());
        }
        storage.save(changes).await.unwrap();
    }

    #[tokio::test]
    async fn should_store_and_retrieve_record_after_save() {
        let storage = setup().await;
        let record = state("California");
        insert_all(&storage, std::slice::from_ref(&record)).await;

        let fetched = storage.get(Kind::State, record.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, record.id);
        assert_eq!(fetched.kind, Kind::State);
        assert_eq!(fetched.attribute("name"), Some(&json!("California")));
        assert_eq!(fetched.created_at, record.created_at);
    }

    #[tokio::test]
    async fn should_keep_kinds_in_separate_tables() {
        let storage = setup().await;
        let record = state("Texas");
        insert_all(&storage, std::slice::from_ref(&record)).await;

        assert!(storage.get(Kind::City, record.id).await.unwrap().is_none());
        assert_eq!(storage.count(Kind::State).await.unwrap(), 1);
        assert_eq!(storage.count(Kind::City).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_list_in_insertion_order_after_update() {
        let storage = setup().await;
        let mut first = state("Alabama");
        let second = state("Zeta");
        insert_all(&storage, &[first.clone(), second.clone()]).await;

        first.attributes.insert("name".to_string(), json!("Renamed"));
        let mut changes = Changes::default();
        changes.update(first.clone());
        storage.save(changes).await.unwrap();

        let all = storage.all(Kind::State).await.unwrap();
        let ids: Vec<RecordId> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(all[0].attribute("name"), Some(&json!("Renamed")));
    }

    #[tokio::test]
    async fn should_find_children_by_foreign_key() {
        let storage = setup().await;
        let city = RecordId::new();
        let inside = Record::new(Kind::Place)
            .with("name", "Loft")
            .with("city_id", city.to_string());
        let outside = Record::new(Kind::Place)
            .with("name", "Barn")
            .with("city_id", RecordId::new().to_string());
        insert_all(&storage, &[inside.clone(), outside]).await;

        let found = storage.find_by(Kind::Place, "city_id", city).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[tokio::test]
    async fn should_delete_record_after_save() {
        let storage = setup().await;
        let record = state("Maine");
        insert_all(&storage, std::slice::from_ref(&record)).await;

        let mut changes = Changes::default();
        changes.delete(Kind::State, record.id);
        storage.save(changes).await.unwrap();

        assert!(storage.get(Kind::State, record.id).await.unwrap().is_none());
        assert_eq!(storage.count(Kind::State).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_accept_save_with_nothing_staged() {
        let storage = setup().await;
        storage.save(Changes::default()).await.unwrap();
    }

    #[tokio::test]
    async fn should_persist_own_changes_when_another_save_fails() {
        let storage = setup().await;
        sqlx::query("DROP TABLE reviews")
            .execute(&storage.pool)
            .await
            .unwrap();

        let ohio = state("Ohio");
        let mut mine = Changes::default();
        mine.insert(ohio.clone());
        let mut theirs = Changes::default();
        theirs.insert(Record::new(Kind::Review).with("text", "Great"));

        assert!(storage.save(theirs).await.is_err());
        storage.save(mine).await.unwrap();

        assert!(storage.get(Kind::State, ohio.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_roll_back_whole_batch_on_failure() {
        let storage = setup().await;
        sqlx::query("DROP TABLE reviews")
            .execute(&storage.pool)
            .await
            .unwrap();

        let iowa = state("Iowa");
        let mut changes = Changes::default();
        changes
            .insert(iowa.clone())
            .insert(Record::new(Kind::Review).with("text", "Great"));

        let err = storage.save(changes).await.unwrap_err();
        assert!(matches!(err, HbnbError::Storage(_)));
        assert!(storage.get(Kind::State, iowa.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_not_resurrect_deleted_record_on_update() {
        let storage = setup().await;
        let mut utah = state("Utah");
        insert_all(&storage, std::slice::from_ref(&utah)).await;

        let mut delete = Changes::default();
        delete.delete(Kind::State, utah.id);
        storage.save(delete).await.unwrap();

        utah.merge(
            json!({"name": "Nevada"}).as_object().unwrap(),
            &Kind::State.schema(),
        );
        let mut update = Changes::default();
        update.update(utah.clone());
        let err = storage.save(update).await.unwrap_err();

        assert!(matches!(err, HbnbError::NotFound(ref e) if e.kind == Kind::State));
        assert!(storage.get(Kind::State, utah.id).await.unwrap().is_none());
        assert_eq!(storage.count(Kind::State).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_report_not_found_when_deleting_twice() {
        let storage = setup().await;
        let record = state("Maine");
        insert_all(&storage, std::slice::from_ref(&record)).await;

        for expect_ok in [true, false] {
            let mut changes = Changes::default();
            changes.delete(Kind::State, record.id);
            assert_eq!(storage.save(changes).await.is_ok(), expect_ok);
        }
    }
}
