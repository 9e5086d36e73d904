//! Cache Store Module
//!
//! The key-value store boundary the cache client talks to, plus the
//! in-process implementation. The trait mirrors the handful of commands
//! the service needs from a Redis-style store: get, set with TTL, bulk
//! delete, prefix scan and flush.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, MAX_VALUE_SIZE};

// == Store Error ==
/// Failure reported by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value is larger than the store accepts
    #[error("value for key '{0}' exceeds maximum size of {MAX_VALUE_SIZE} bytes")]
    ValueTooLarge(String),

    /// The backend cannot be reached or refused the command
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// == Key-Value Store Trait ==
/// Storage backend for cached values.
///
/// All values expire; `set` always takes a TTL. `keys` matches by key
/// prefix, which is how one entity collection's views are found for
/// invalidation. Implementations must never return expired values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or None when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    /// Overwriting resets the TTL.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), StoreError>;

    /// Removes the given keys, returning how many were present.
    async fn del(&self, keys: &[String]) -> Result<usize, StoreError>;

    /// Returns all live keys starting with `prefix`.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Removes every entry.
    async fn flush_db(&self) -> Result<(), StoreError>;
}

// == Memory Store ==
/// In-process [`KeyValueStore`] backed by a HashMap.
///
/// Expired entries are dropped lazily on read and swept periodically by
/// the cleanup task.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Current number of entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), StoreError> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::ValueTooLarge(key.to_string()));
        }

        let entry = CacheEntry::new(value, ttl_seconds);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        Ok(keys
            .iter()
            .filter(|key| entries.remove(key.as_str()).is_some())
            .count())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn flush_db(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
