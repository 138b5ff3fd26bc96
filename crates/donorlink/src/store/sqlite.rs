//! `SQLite`-backed record store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use super::{migrations, Collection, RecordStore, StoredRecord};
use crate::error::{Error, Result};
use crate::record::RecordId;

/// Length of the hex identity assigned to new records.
const ID_LEN: usize = 20;

/// Record store persisted in a local `SQLite` database.
///
/// Rusqlite connections are not `Sync`, so the connection sits behind a
/// mutex. Queries run on tokio's blocking pool, never on an async worker.
#[derive(Debug)]
pub struct SqliteStore {
    path: PathBuf,
    db: Arc<Database>,
}

#[derive(Debug)]
struct Database {
    conn: Mutex<Connection>,
    /// Disambiguates identities generated within the same instant.
    counter: AtomicU64,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let mut conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&mut conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self::from_connection(path, conn))
    }

    /// Create an in-memory database, for tests and throwaway sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let mut conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        migrations::initialize_schema(&mut conn)?;
        Ok(Self::from_connection(path, conn))
    }

    fn from_connection(path: PathBuf, conn: Connection) -> Self {
        Self {
            path,
            db: Arc::new(Database {
                conn: Mutex::new(conn),
                counter: AtomicU64::new(0),
            }),
        }
    }

    /// Path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `work` against the database on the blocking pool.
    async fn run<T, F>(&self, operation: &'static str, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || work(&db))
            .await
            .map_err(|e| Error::store_unavailable(operation, format!("task join error: {e}")))?
    }
}

impl Database {
    fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::store_unavailable(operation, "database connection poisoned"))
    }

    /// Derive a fresh identity for a record about to be appended.
    fn next_id(&self, collection: Collection, body: &str) -> RecordId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(collection.as_str().as_bytes());
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&n.to_le_bytes());
        hasher.update(body.as_bytes());
        let hex = hasher.finalize().to_hex();
        RecordId::new(&hex[..ID_LEN])
    }

    fn fetch(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
        const OP: &str = "fetch";
        let conn = self.lock(OP)?;
        let unavailable = |e: rusqlite::Error| Error::store_unavailable(OP, e.to_string());

        let mut stmt = conn
            .prepare("SELECT id, body FROM records WHERE collection = ?1 ORDER BY seq")
            .map_err(unavailable)?;
        let rows = stmt
            .query_map([collection.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(unavailable)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(unavailable)?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, body) in rows {
            match serde_json::from_str(&body) {
                Ok(body) => records.push(StoredRecord {
                    id: RecordId::new(id),
                    body,
                }),
                Err(e) => warn!(%collection, %id, "Skipping record with unreadable body: {e}"),
            }
        }

        debug!(%collection, count = records.len(), "Fetched collection");
        Ok(records)
    }

    fn append(&self, collection: Collection, text: &str) -> Result<RecordId> {
        const OP: &str = "append";
        let id = self.next_id(collection, text);

        let conn = self.lock(OP)?;
        conn.execute(
            "INSERT INTO records (id, collection, body) VALUES (?1, ?2, ?3)",
            params![id.as_str(), collection.as_str(), text],
        )
        .map_err(|e| Error::store_unavailable(OP, e.to_string()))?;

        debug!(%collection, %id, "Appended record");
        Ok(id)
    }
}

#[async_trait::async_trait]
impl RecordStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
        self.run("fetch", move |db| db.fetch(collection)).await
    }

    async fn append_record(
        &self,
        collection: Collection,
        body: &serde_json::Value,
    ) -> Result<RecordId> {
        let text = serde_json::to_string(body)?;
        self.run("append", move |db| db.append(collection, &text))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().expect("failed to create in-memory store")
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let store = create_test_store();
        let records = store.fetch_collection(Collection::LivingDonors).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_append_and_fetch() {
        let store = create_test_store();
        let body = json!({"name": "John Smith", "type": "living"});

        let id = store
            .append_record(Collection::LivingDonors, &body)
            .await
            .unwrap();
        assert_eq!(id.as_str().len(), ID_LEN);

        let records = store.fetch_collection(Collection::LivingDonors).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].body, body);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = create_test_store();
        store
            .append_record(Collection::DeceasedDonors, &json!({"name": "A"}))
            .await
            .unwrap();

        assert!(store
            .fetch_collection(Collection::LivingDonors)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            store
                .fetch_collection(Collection::DeceasedDonors)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let store = create_test_store();
        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            ids.push(
                store
                    .append_record(Collection::LivingDonors, &json!({ "name": name }))
                    .await
                    .unwrap(),
            );
        }

        let fetched: Vec<_> = store
            .fetch_collection(Collection::LivingDonors)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(fetched, ids);
    }

    #[tokio::test]
    async fn test_identical_bodies_get_distinct_ids() {
        let store = create_test_store();
        let body = json!({"name": "same"});
        let a = store.append_record(Collection::LivingDonors, &body).await.unwrap();
        let b = store.append_record(Collection::LivingDonors, &body).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_appends_on_worker_pool() {
        let store = Arc::new(create_test_store());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append_record(Collection::LivingDonors, &json!({ "n": i }))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.fetch_collection(Collection::LivingDonors).await.unwrap();
        assert_eq!(records.len(), 8);
    }

    #[tokio::test]
    async fn test_unreadable_body_skipped() {
        let store = create_test_store();
        store
            .db
            .conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO records (id, collection, body) VALUES ('bad', 'livingDonors', '{nope')",
                [],
            )
            .unwrap();
        store
            .append_record(Collection::LivingDonors, &json!({"ok": true}))
            .await
            .unwrap();

        let records = store.fetch_collection(Collection::LivingDonors).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body["ok"], true);
    }

    #[tokio::test]
    async fn test_missing_table_is_unavailable() {
        let store = create_test_store();
        store
            .db
            .conn
            .lock()
            .unwrap()
            .execute("DROP TABLE records", [])
            .unwrap();

        let err = store
            .fetch_collection(Collection::LivingDonors)
            .await
            .unwrap_err();
        assert!(err.is_store_unavailable());

        let err = store
            .append_record(Collection::LivingDonors, &json!({}))
            .await
            .unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[tokio::test]
    async fn test_open_file_based_persists() {
        let db_path = std::env::temp_dir().join(format!(
            "donorlink_store_test_{}.db",
            std::process::id()
        ));

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.path(), db_path);
        let id = store
            .append_record(Collection::DeceasedDonors, &json!({"name": "kept"}))
            .await
            .unwrap();
        drop(store);

        let reopened = SqliteStore::open(&db_path).unwrap();
        let records = reopened
            .fetch_collection(Collection::DeceasedDonors)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let nested_path = std::env::temp_dir().join(format!(
            "donorlink_store_test_{}/nested/donors.db",
            std::process::id()
        ));
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let store = SqliteStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        if let Some(parent) = nested_path.parent().and_then(Path::parent) {
            let _ = std::fs::remove_dir_all(parent);
        }
    }
}
