// src/records/mod.rs — Notes and quiz results kept on the device
//
// Each record kind is one flat JSON array under a single key. Reads filter
// by parent (chapter); writes rewrite the whole array at the JSON level so
// entries of other chapters are carried over as stored, including fields
// and entries this build does not understand.

pub mod types;

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::infra::errors::StudyError;
use crate::storage::KeyValueStore;

pub use types::{Note, QuizResult, Record, RecordId, RecordKind};

/// Append/filter/delete over per-kind collections.
///
/// Mutations are unguarded read-modify-write cycles: two overlapping
/// `append`/`remove` calls on the same kind can lose one update. Callers
/// serialize writes to a kind when that matters.
#[derive(Clone)]
pub struct RecordStore {
    kv: Arc<dyn KeyValueStore>,
}

impl RecordStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Raw entries of a kind's collection. A missing or blank value is an
    /// empty collection; a value that is not a JSON array is an error.
    async fn load_entries(&self, kind: RecordKind) -> Result<Vec<Value>, StudyError> {
        let Some(raw) = self.kv.get(kind.storage_key()).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<Vec<Value>>(&raw)
            .map_err(|e| StudyError::StorageRead(format!("stored {kind} are not a JSON array: {e}")))
    }

    /// Typed view of the collection. Unreadable storage reads as empty and
    /// individual entries that do not decode are skipped.
    async fn load<R: Record>(&self) -> Vec<R> {
        let entries = match self.load_entries(R::KIND).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(kind = %R::KIND, "Failed to read records, treating as empty: {e}");
                return Vec::new();
            }
        };
        let total = entries.len();
        let records: Vec<R> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if records.len() < total {
            warn!(
                kind = %R::KIND,
                skipped = total - records.len(),
                "Skipped stored records that do not decode"
            );
        }
        records
    }

    async fn save_entries(&self, kind: RecordKind, entries: &[Value]) -> Result<(), StudyError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StudyError::StorageWrite(format!("encode {kind}: {e}")))?;
        self.kv.set(kind.storage_key(), &json).await?;
        debug!(kind = %kind, count = entries.len(), "saved records");
        Ok(())
    }

    /// Records belonging to `parent_id`, in the order they were appended.
    pub async fn list_by_parent<R: Record>(&self, parent_id: &str) -> Vec<R> {
        self.load::<R>()
            .await
            .into_iter()
            .filter(|r| r.parent_id() == parent_id)
            .collect()
    }

    /// Every record of the kind, newest first.
    pub async fn list_all<R: Record>(&self) -> Vec<R> {
        let mut records = self.load::<R>().await;
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        records
    }

    pub async fn find<R: Record>(&self, record_id: &str) -> Option<R> {
        self.load::<R>()
            .await
            .into_iter()
            .find(|r| r.id() == record_id)
    }

    /// Number of stored entries of `kind`, decodable or not.
    pub async fn count(&self, kind: RecordKind) -> Result<usize, StudyError> {
        Ok(self.load_entries(kind).await?.len())
    }

    /// Add `record` to its kind's collection, keeping every existing entry.
    ///
    /// Refuses to write when the stored value cannot be parsed as an array,
    /// so an unreadable collection is never replaced.
    pub async fn append<R: Record>(&self, record: R) -> Result<(), StudyError> {
        let mut entries = self.load_entries(R::KIND).await?;
        if entries.iter().any(|e| entry_id(e).as_deref() == Some(record.id())) {
            return Err(StudyError::DuplicateRecord {
                kind: R::KIND.to_string(),
                id: record.id().to_string(),
            });
        }
        let value = serde_json::to_value(&record)
            .map_err(|e| StudyError::StorageWrite(format!("encode {}: {e}", R::KIND)))?;
        entries.push(value);
        self.save_entries(R::KIND, &entries).await
    }

    /// Delete the record with `record_id`. Returns whether one was removed;
    /// an unknown id leaves storage untouched.
    pub async fn remove<R: Record>(&self, record_id: &str) -> Result<bool, StudyError> {
        let mut entries = self.load_entries(R::KIND).await?;
        let before = entries.len();
        entries.retain(|e| entry_id(e).as_deref() != Some(record_id));
        if entries.len() == before {
            debug!(kind = %R::KIND, record_id, "nothing to remove");
            return Ok(false);
        }
        self.save_entries(R::KIND, &entries).await?;
        Ok(true)
    }
}

/// The `id` of a stored entry. Older clients may have written numeric ids.
fn entry_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
