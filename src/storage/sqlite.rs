// src/storage/sqlite.rs — SQLite-backed key-value store

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::{schema, KeyValueStore};
use crate::infra::errors::StudyError;

/// One row per key in `kv_store`. The connection lock is never held across
/// an await point.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        schema::run_migrations(&conn)?;
        debug!(path = %path.display(), "opened key-value store");
        Ok(Self::new(conn))
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> anyhow::Result<u32> {
        schema::current_version(&self.lock())
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StudyError> {
        let conn = self.lock();
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(read_err)?;
        let rows = stmt
            .query_map([], |r| r.get::<_, String>(0))
            .map_err(read_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(read_err)
    }
}

fn read_err(e: rusqlite::Error) -> StudyError {
    StudyError::StorageRead(e.to_string())
}

fn write_err(e: rusqlite::Error) -> StudyError {
    StudyError::StorageWrite(e.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StudyError> {
        let conn = self.lock();
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
        .map_err(read_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StudyError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(write_err)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StudyError> {
        let conn = self.lock();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(write_err)?;
        debug!(key, "removed value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let store = SqliteStore::in_memory().unwrap();
        store.set("user", "{}").await.unwrap();
        store.set("user", r#"{"name":"Sari"}"#).await.unwrap();
        assert_eq!(
            store.get("user").await.unwrap().as_deref(),
            Some(r#"{"name":"Sari"}"#)
        );
        assert_eq!(store.keys().unwrap(), vec!["user".to_string()]);
        assert_eq!(store.schema_version().unwrap(), schema::latest_version());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let store = SqliteStore::in_memory().unwrap();
        store.remove("nothing").await.unwrap();
        assert!(store.get("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("studydesk.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("token", "tok-1").await.unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("token").await.unwrap().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_write_after_table_dropped_is_write_error() {
        let store = SqliteStore::in_memory().unwrap();
        store.lock().execute_batch("DROP TABLE kv_store;").unwrap();
        let err = store.set("k", "v").await.unwrap_err();
        assert!(matches!(err, StudyError::StorageWrite(_)));
        let err = store.get("k").await.unwrap_err();
        assert!(matches!(err, StudyError::StorageRead(_)));
    }
}
