// src/storage/mod.rs — Durable key-value substrate
//
// Whole-value reads and writes per string key. The session layer and the
// record layer share one store and use disjoint keys.

pub mod memory;
pub mod schema;
pub mod sqlite;

use async_trait::async_trait;

use crate::infra::errors::StudyError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`. `Ok(None)` means the key was never set.
    async fn get(&self, key: &str) -> Result<Option<String>, StudyError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StudyError>;

    /// Delete `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StudyError>;
}
