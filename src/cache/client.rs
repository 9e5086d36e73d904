//! Cache Client Module
//!
//! Typed access to a [`KeyValueStore`]: values go in and out as JSON, the
//! TTL defaults to the configured cache lifetime, and pattern deletion is
//! expressed as a key-prefix wipe.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::cache::store::{KeyValueStore, StoreError};

// == Cache Error ==
/// Failure while reading or writing the cache.
///
/// Callers on the request path treat every variant the same way: log and
/// fall back to the source of truth.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cached value could not be serialized or deserialized
    #[error("cache codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

// == Cache Client ==
/// JSON codec over a shared key-value store.
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn KeyValueStore>,
    default_ttl: u64,
}

impl CacheClient {
    /// # Arguments
    /// * `store` - The backing key-value store
    /// * `default_ttl` - TTL in seconds applied to every write
    pub fn new(store: Arc<dyn KeyValueStore>, default_ttl: u64) -> Self {
        Self { store, default_ttl }
    }

    // == Get ==
    /// Fetches and deserializes the value under `key`.
    ///
    /// Returns None on a miss. A value that no longer deserializes into
    /// `T` is a codec error, not a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    // == Set ==
    /// Serializes `value` and stores it under `key` with the default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw, self.default_ttl).await?;
        Ok(())
    }

    // == Delete By Prefix ==
    /// Removes every key starting with `prefix`.
    ///
    /// Scans for matching keys first and only then issues the delete, so
    /// an empty match set costs a single round trip.
    ///
    /// # Returns
    /// The number of keys removed.
    pub async fn delete_by_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let keys = self.store.keys(prefix).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        Ok(self.store.del(&keys).await?)
    }

    // == Flush ==
    /// Drops the entire cache contents.
    pub async fn flush_all(&self) -> Result<(), CacheError> {
        self.store.flush_db().await?;
        Ok(())
    }
}
