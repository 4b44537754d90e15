//! Generic method-level caching decorator core.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{build_key, hash_tag, Cache, Result};

/// Wraps a cache backend under a fixed namespace and performs
/// get-or-compute-and-store keyed by method name and serialized arguments.
///
/// The layer itself is stateless, so one instance can serve any number of
/// concurrent calls; per-call tags travel as a `remember` argument.
///
/// Cache failures never fail the wrapped call: a failed read counts as a
/// miss and a failed write is logged and dropped. Concurrent callers on a
/// cold key both compute; there is no single-flight locking.
pub struct CacheLayer {
    cache: Arc<dyn Cache>,
    namespace: String,
}

impl CacheLayer {
    /// Creates a layer storing entries under `namespace`.
    pub fn new(cache: Arc<dyn Cache>, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
        }
    }

    /// The namespace entries are stored under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Performs get-or-compute-and-store for one method invocation.
    ///
    /// The entry is keyed by [`build_key`] over `(namespace, method,
    /// args)` and tagged with the method's hash tag plus the caller's
    /// `tags`.
    pub async fn remember<A, T, E, F, Fut>(
        &self,
        method: &str,
        args: &A,
        ttl: Duration,
        tags: &[String],
        compute: F,
    ) -> std::result::Result<T, E>
    where
        A: Serialize + Sync,
        T: Serialize + DeserializeOwned + Send,
        E: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<T, E>> + Send,
    {
        let mut all_tags = vec![hash_tag(&self.namespace, method)];
        all_tags.extend_from_slice(tags);
        let key = match build_key(&self.namespace, method, args) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(method, error = %err, "Cache key derivation failed, bypassing cache");
                return compute().await;
            }
        };

        if let Ok(Some(bytes)) = self.cache.get(&key).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    tracing::trace!(method, %key, "Cache hit");
                    return Ok(value);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => {
                    tracing::warn!(method, %key, error = %err, "Cached value deserialization failed");
                }
            }
        }

        tracing::trace!(method, %key, "Cache miss");
        let value = compute().await?;

        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&key, &bytes, &all_tags, Some(ttl)).await {
                    tracing::warn!(method, %key, error = %err, "Failed to store cache entry");
                }
            }
            Err(err) => {
                tracing::warn!(method, error = %err, "Cache value serialization failed");
            }
        }

        Ok(value)
    }

    /// Derives the key `remember` would use for `(method, args)`.
    pub fn key_for<A: Serialize>(&self, method: &str, args: &A) -> Result<String> {
        build_key(&self.namespace, method, args)
    }

    /// Invalidates one entry by its derived key.
    pub async fn forget(&self, key: &str) -> Result<()> {
        self.cache.delete(key).await
    }

    /// Invalidates every entry stored for `method` under this namespace.
    pub async fn forget_method(&self, method: &str) -> Result<()> {
        self.cache.delete_tag(&hash_tag(&self.namespace, method)).await
    }
}
