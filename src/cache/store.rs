//! Cache Store Module
//!
//! Bounded cache engine: one `IndexMap` holds the entries and, through its
//! iteration order, their access recency. The front of the map is the least
//! recently used key and the back is the most recently used one.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheStats};

// == Bounded TTL Cache ==
/// Bounded cache with lazy TTL expiry and LRU eviction.
///
/// Every operation is total. A miss is reported as `None`/`false`, never as an
/// error. Expired entries are only detected when they are touched, or swept by
/// [`cleanup`](Self::cleanup).
///
/// The cache is single-owner (`&mut self`); wrap it in
/// [`SharedCache`](crate::cache::SharedCache) to share it between tasks.
#[derive(Debug, Clone)]
pub struct BoundedTtlCache<V> {
    /// Entries in recency order, least recently used first
    entries: IndexMap<String, CacheEntry<V>>,
    /// Activity counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl<V: Clone> BoundedTtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL for entries inserted without an explicit one
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: IndexMap::new(),
            counters: CacheCounters::new(),
            max_size,
            default_ttl,
        }
    }

    // == Get ==
    /// Returns a clone of the value stored under `key` if it is live.
    ///
    /// A hit bumps the entry's hit count and moves it to the most recently
    /// used position. An expired entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// [`get`](Self::get) evaluated at an explicit instant.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let Some(index) = self.entries.get_index_of(key) else {
            self.counters.record_miss();
            return None;
        };

        if self.entries[index].is_expired_at(now) {
            self.entries.shift_remove_index(index);
            self.counters.record_miss();
            self.counters.record_expirations(1);
            debug!(key, "dropped expired entry on read");
            return None;
        }

        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);

        let entry = &mut self.entries[last];
        entry.record_hit();
        self.counters.record_hit();
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` at the most recently used position.
    ///
    /// Overwriting an existing key replaces its value, expiry and hit count
    /// without changing the cache size. Inserting a new key into a full cache
    /// first evicts the least recently used entry, whether or not it is still
    /// live.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry (uses `default_ttl` if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.set_at(key, value, ttl, Instant::now());
    }

    /// [`set`](Self::set) evaluated at an explicit instant.
    pub fn set_at(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>, now: Instant) {
        let key = key.into();

        // A zero-capacity cache can never hold anything
        if self.max_size == 0 {
            return;
        }

        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl), now);

        if let Some(index) = self.entries.get_index_of(&key) {
            self.entries.shift_remove_index(index);
        } else if self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        self.entries.insert(key, entry);
    }

    // == Has ==
    /// Returns whether a live entry exists for `key`.
    ///
    /// Applies the same lazy expiry as [`get`](Self::get) but leaves recency
    /// order and hit counts untouched.
    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(key, Instant::now())
    }

    /// [`has`](Self::has) evaluated at an explicit instant.
    pub fn has_at(&mut self, key: &str, now: Instant) -> bool {
        let Some(index) = self.entries.get_index_of(key) else {
            return false;
        };

        if self.entries[index].is_expired_at(now) {
            self.entries.shift_remove_index(index);
            self.counters.record_expirations(1);
            return false;
        }

        true
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup ==
    /// Removes all expired entries and returns how many were removed.
    ///
    /// Never needed for correctness; it only releases memory held by entries
    /// that expired without being read again.
    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(Instant::now())
    }

    /// [`cleanup`](Self::cleanup) evaluated at an explicit instant.
    pub fn cleanup_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.counters.record_expirations(removed);
        removed
    }

    // == Stats ==
    /// Returns the live entry count, capacity, and live keys oldest first.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now())
    }

    /// [`stats`](Self::stats) evaluated at an explicit instant.
    pub fn stats_at(&self, now: Instant) -> CacheStats {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        CacheStats {
            size: keys.len(),
            max_size: self.max_size,
            keys,
        }
    }

    // == Counters ==
    /// Returns a snapshot of the activity counters.
    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Evict Oldest ==
    fn evict_oldest(&mut self) {
        if let Some((key, _)) = self.entries.shift_remove_index(0) {
            self.counters.record_eviction();
            debug!(key = %key, "evicted least recently used entry");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_store_new() {
        let store: BoundedTtlCache<String> = BoundedTtlCache::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_size(), 100);
        assert_eq!(store.default_ttl(), TTL);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = BoundedTtlCache::new(100, TTL);

        store.set("key1", "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: BoundedTtlCache<String> = BoundedTtlCache::new(100, TTL);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.counters().misses, 1);
    }

    #[test]
    fn test_store_delete() {
        let mut store = BoundedTtlCache::new(100, TTL);

        store.set("key1", 1, None);
        store.set("key2", 2, None);

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(2));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = BoundedTtlCache::new(100, TTL);

        store.set("key1", "value1", None);
        store.set("key1", "value2", None);

        assert_eq!(store.get("key1"), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_at_capacity_keeps_other_entries() {
        let mut store = BoundedTtlCache::new(2, TTL);

        store.set("a", 1, None);
        store.set("b", 2, None);
        store.set("a", 10, None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.counters().evictions, 0);
        // Overwrite moved "a" to the back
        assert_eq!(store.stats().keys, vec!["b", "a"]);
    }

    #[test]
    fn test_store_overwrite_resets_hit_count() {
        let now = Instant::now();
        let mut store = BoundedTtlCache::new(10, TTL);

        store.set_at("a", 1, None, now);
        store.get_at("a", now);
        store.get_at("a", now);
        assert_eq!(store.entries["a"].hit_count, 2);

        store.set_at("a", 2, None, now);
        assert_eq!(store.entries["a"].hit_count, 0);
    }

    #[test]
    fn test_store_ttl_boundary() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(10, TTL);

        store.set_at("k", "v", Some(ms(100)), t0);

        assert_eq!(store.get_at("k", t0 + ms(99)), Some("v"));
        assert_eq!(store.get_at("k", t0 + ms(100)), None);
        // Lazily removed on the expired read
        assert_eq!(store.len(), 0);
        assert_eq!(store.counters().expirations, 1);
    }

    #[test]
    fn test_store_default_ttl_applied() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(10, ms(1000));

        store.set_at("k", 1, None, t0);

        assert!(store.has_at("k", t0 + ms(999)));
        assert!(!store.has_at("k", t0 + ms(1000)));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = BoundedTtlCache::new(3, TTL);

        store.set("key1", 1, None);
        store.set("key2", 2, None);
        store.set("key3", 3, None);

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4", 4, None);

        assert_eq!(store.len(), 3);
        assert_eq!(store.counters().evictions, 1);
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(2));
        assert_eq!(store.get("key3"), Some(3));
        assert_eq!(store.get("key4"), Some(4));
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = BoundedTtlCache::new(2, TTL);

        store.set("A", 'a', None);
        store.set("B", 'b', None);
        store.get("A");
        store.set("C", 'c', None);

        assert_eq!(store.get("B"), None);
        assert_eq!(store.get("A"), Some('a'));
        assert_eq!(store.get("C"), Some('c'));
    }

    #[test]
    fn test_store_has_does_not_touch_recency() {
        let mut store = BoundedTtlCache::new(2, TTL);

        store.set("A", 1, None);
        store.set("B", 2, None);
        assert!(store.has("A"));
        store.set("C", 3, None);

        // "A" was still the oldest, so it went
        assert!(!store.has("A"));
        assert!(store.has("B"));
        assert!(store.has("C"));
        assert_eq!(store.counters().hits, 0);
    }

    #[test]
    fn test_store_has_removes_expired() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(10, TTL);

        store.set_at("k", 1, Some(ms(5)), t0);

        assert!(!store.has_at("k", t0 + ms(5)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_clear() {
        let mut store = BoundedTtlCache::new(10, TTL);
        store.set("a", 1, None);
        store.set("b", 2, None);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_store_cleanup() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(100, TTL);

        store.set_at("short1", 1, Some(Duration::ZERO), t0);
        store.set_at("long", 2, Some(ms(10_000)), t0);
        store.set_at("short2", 3, Some(Duration::ZERO), t0);

        assert_eq!(store.cleanup_at(t0), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats_at(t0).size, 1);
        assert_eq!(store.get_at("long", t0), Some(2));
        // Nothing left to sweep
        assert_eq!(store.cleanup_at(t0), 0);
    }

    #[test]
    fn test_store_stats_lists_live_keys_oldest_first() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(10, TTL);

        store.set_at("a", 1, None, t0);
        store.set_at("gone", 0, Some(ms(1)), t0);
        store.set_at("b", 2, None, t0);
        store.get_at("a", t0);

        let stats = store.stats_at(t0 + ms(5));
        assert_eq!(stats.keys, vec!["b", "a"]);
        assert_eq!(stats.size, 2);
        assert_eq!(stats.max_size, 10);
        // stats never mutates
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_store_zero_capacity_holds_nothing() {
        let mut store = BoundedTtlCache::new(0, TTL);

        store.set("a", 1, None);

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_store_eviction_prefers_recency_over_expiry() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(2, TTL);

        store.set_at("old_live", 1, Some(ms(10_000)), t0);
        store.set_at("new_short", 2, Some(ms(1)), t0);
        store.set_at("c", 3, None, t0 + ms(5));

        // The front of the order goes, even though "new_short" is expired
        assert_eq!(store.get_at("old_live", t0 + ms(5)), None);
        assert_eq!(store.get_at("c", t0 + ms(5)), Some(3));
    }

    #[test]
    fn test_store_evicting_expired_front_counts_as_eviction() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(1, TTL);

        store.set_at("stale", 1, Some(ms(1)), t0);
        store.set_at("fresh", 2, None, t0 + ms(5));

        let counters = store.counters();
        assert_eq!(counters.evictions, 1);
        assert_eq!(counters.expirations, 0);
        assert_eq!(store.get_at("fresh", t0 + ms(5)), Some(2));
    }

    #[test]
    fn test_store_huge_ttl_overwrite_keeps_entry() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(2, Duration::from_secs(u64::MAX));

        store.set_at("a", 1, Some(Duration::from_secs(1)), t0);
        store.set_at("a", 2, None, t0);
        store.set_at("b", 3, Some(Duration::MAX), t0);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_at("a", t0 + Duration::from_secs(3600)), Some(2));
        assert_eq!(store.get_at("b", t0 + Duration::from_secs(3600)), Some(3));
        // Never-expiring entries survive a sweep
        assert_eq!(store.cleanup_at(t0 + Duration::from_secs(86_400)), 0);
    }

    #[test]
    fn test_store_huge_ttl_at_capacity_still_evicts_lru() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(2, TTL);

        store.set_at("a", 1, None, t0);
        store.set_at("b", 2, None, t0);
        store.set_at("c", 3, Some(Duration::MAX), t0);

        assert_eq!(store.stats_at(t0).keys, vec!["b", "c"]);
        assert_eq!(store.counters().evictions, 1);
    }

    #[test]
    fn test_concrete_scenario() {
        let t0 = Instant::now();
        let mut store = BoundedTtlCache::new(2, ms(1000));

        store.set_at("a", 1, None, t0);
        store.set_at("b", 2, None, t0 + ms(10));
        assert_eq!(store.get_at("a", t0 + ms(20)), Some(1));
        store.set_at("c", 3, None, t0 + ms(30));

        assert_eq!(store.get_at("b", t0 + ms(40)), None);
        assert_eq!(store.get_at("a", t0 + ms(40)), Some(1));
        assert_eq!(store.get_at("c", t0 + ms(40)), Some(3));
    }
}
