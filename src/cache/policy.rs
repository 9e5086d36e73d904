//! Cache Policy Module
//!
//! The cache-aside discipline every read endpoint follows: try the cache,
//! fall back to the loader on a miss, store what the loader produced.
//! Cache trouble never fails a request; the loader result is served and
//! the incident is logged. Loader errors are returned as-is and nothing
//! is cached for them, so a missing entity stays a miss until it exists.

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::client::CacheClient;
use crate::domain::EntityKind;

// == Entity Cache ==
/// Cache-aside wrapper used by the entity services.
#[derive(Clone)]
pub struct EntityCache {
    client: CacheClient,
}

impl EntityCache {
    pub fn new(client: CacheClient) -> Self {
        Self { client }
    }

    // == Key Builders ==
    /// Key for a single entity view, e.g. `clubs:5`.
    pub fn entity_key(kind: EntityKind, id: i64) -> String {
        format!("{}:{}", kind.key_prefix(), id)
    }

    /// Key for a page view, e.g. `players:page=1:limit=40`.
    pub fn page_key(kind: EntityKind, page: u64, limit: u64) -> String {
        format!("{}:page={}:limit={}", kind.key_prefix(), page, limit)
    }

    // == Read Through ==
    /// Serves the cached view of entity `id`, running `loader` on a miss
    /// and caching its success.
    pub async fn read_through<T, E, F, Fut>(
        &self,
        kind: EntityKind,
        id: i64,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.read_through_key(&Self::entity_key(kind, id), loader)
            .await
    }

    /// Serves the cached page view, running `loader` on a miss and
    /// caching its success.
    pub async fn read_through_page<T, E, F, Fut>(
        &self,
        kind: EntityKind,
        page: u64,
        limit: u64,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.read_through_key(&Self::page_key(kind, page, limit), loader)
            .await
    }

    async fn read_through_key<T, E, F, Fut>(&self, key: &str, loader: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.client.get::<T>(key).await {
            Ok(Some(cached)) => {
                debug!(key, "cache hit");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(key, error = %err, "cache read failed, falling back to source");
            }
        }

        let value = loader().await?;

        if let Err(err) = self.client.set(key, &value).await {
            warn!(key, error = %err, "cache write failed, serving uncached");
        }

        Ok(value)
    }

    // == Invalidate ==
    /// Drops every cached view of `kind`, single entities and pages alike.
    ///
    /// Runs after the write has been committed; a failure here means
    /// readers may see stale views until the TTL expires, which is the
    /// accepted degraded mode.
    pub async fn invalidate(&self, kind: EntityKind) {
        let prefix = kind.key_prefix();
        match self.client.delete_by_prefix(prefix).await {
            Ok(removed) if removed > 0 => debug!(prefix, removed, "cache invalidated"),
            Ok(_) => {}
            Err(err) => warn!(prefix, error = %err, "cache invalidation failed"),
        }
    }
}
