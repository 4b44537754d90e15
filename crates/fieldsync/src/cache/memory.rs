//! In-memory cache backend with LRU eviction.
//!
//! Provides a thread-safe tagged cache with TTL support using tokio
//! synchronization primitives and LRU eviction policy.
//!
//! Tag tracking mirrors what a Redis backend would do with sets: each tag
//! maps to the keys stored under it, so `delete_tag` drops a whole group
//! without scanning the store.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use fieldsync_core::cache::{Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
    tags: Vec<String>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, tags: &[String], ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self {
            value,
            expires_at,
            tags: tags.to_vec(),
        }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory tagged cache with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are cleaned up on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
///
/// Tag sets are not bounded by the LRU capacity; a key evicted from the
/// store simply becomes a no-op when its tag is later invalidated.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// Main key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Tracks stored keys by tag for group invalidation.
    /// Maps tag -> Set of cache keys.
    tags: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tags: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Removes `key` from every tag set it was stored under.
    async fn untrack(&self, key: &str, entry_tags: &[String]) {
        if entry_tags.is_empty() {
            return;
        }
        let mut tags = self.tags.write().await;
        for tag in entry_tags {
            if let Some(keys) = tags.get_mut(tag) {
                keys.remove(key);
                // Clean up empty tag sets
                if keys.is_empty() {
                    tags.remove(tag);
                }
            }
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                // Entry exists but is expired - return None.
                // Cleanup is lazy; expired entries age out of the LRU.
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[String],
        ttl: Option<Duration>,
    ) -> Result<()> {
        // Store the value
        {
            let mut store = self.store.write().await;
            let entry = CacheEntry::new(value.to_vec(), tags, ttl);
            store.put(key.to_string(), entry);
        }

        // Track the key under each of its tags
        if !tags.is_empty() {
            let mut tracked = self.tags.write().await;
            for tag in tags {
                tracked
                    .entry(tag.clone())
                    .or_default()
                    .insert(key.to_string());
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let removed = {
            let mut store = self.store.write().await;
            store.pop(key)
        };

        if let Some(entry) = removed {
            self.untrack(key, &entry.tags).await;
        }

        Ok(())
    }

    async fn delete_tag(&self, tag: &str) -> Result<()> {
        let tagged_keys = {
            let mut tags = self.tags.write().await;
            tags.remove(tag).unwrap_or_default()
        };

        if tagged_keys.is_empty() {
            return Ok(());
        }

        let mut entries = Vec::with_capacity(tagged_keys.len());
        {
            let mut store = self.store.write().await;
            for key in &tagged_keys {
                if let Some(entry) = store.pop(key) {
                    entries.push((key.clone(), entry));
                }
            }
        }

        // A key can carry more than one tag; drop it from the others too.
        for (key, entry) in &entries {
            self.untrack(key, &entry.tags).await;
        }

        tracing::trace!(tag, keys = tagged_keys.len(), "Invalidated tag");
        Ok(())
    }
}
