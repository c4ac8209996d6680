//! Shared Cache Module
//!
//! Thread-safe handle over a [`BoundedTtlCache`]. Each operation holds a
//! single mutex for its whole read-modify-write sequence.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{BoundedTtlCache, CacheCounters, CacheStats};

// == Shared Cache ==
/// Cloneable handle to a named cache. Clones share the same entries.
#[derive(Debug)]
pub struct SharedCache<V> {
    /// Domain name, used in logs and diagnostics
    name: Arc<str>,
    inner: Arc<Mutex<BoundedTtlCache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    // == Constructor ==
    /// Creates a named cache with the given capacity and default TTL.
    pub fn new(name: impl Into<Arc<str>>, max_size: usize, default_ttl: Duration) -> Self {
        Self::from_cache(name, BoundedTtlCache::new(max_size, default_ttl))
    }

    /// Wraps an existing cache.
    pub fn from_cache(name: impl Into<Arc<str>>, cache: BoundedTtlCache<V>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.lock().await.set(key, value, ttl);
    }

    pub async fn has(&self, key: &str) -> bool {
        self.inner.lock().await.has(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.lock().await.delete(key)
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    pub async fn cleanup(&self) -> usize {
        self.inner.lock().await.cleanup()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn counters(&self) -> CacheCounters {
        self.inner.lock().await.counters()
    }

    // == Cached Fetch ==
    /// Returns the live value for `key`, or runs `fetcher` and caches its
    /// result.
    ///
    /// The lock is released while `fetcher` runs, so two concurrent misses
    /// on the same key may both fetch; the later write wins. A failed fetch
    /// caches nothing and its error is returned as is.
    ///
    /// # Arguments
    /// * `key` - The key to look up and populate
    /// * `ttl` - Lifetime of a freshly fetched value (uses default TTL if None)
    /// * `fetcher` - Produces the value on a miss
    pub async fn cached_fetch<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetcher: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(cache = %self.name, key, "cache hit");
            return Ok(value);
        }

        debug!(cache = %self.name, key, "cache miss, fetching");
        let value = fetcher().await?;
        self.set(key, value.clone(), ttl).await;
        Ok(value)
    }
}
