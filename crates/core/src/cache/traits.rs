use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Backend contract for tagged caching.
///
/// Entries live under opaque string keys and are associated with a set of
/// tags when stored; `delete_tag` drops every entry associated with a tag,
/// independent of the exact keys. Key-level deletion is assumed atomic at
/// the backend; no cross-key transactionality is provided.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value under `key`, associated with `tags`, with an
    /// optional TTL.
    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[String],
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Deletes a single entry by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every entry associated with `tag`.
    async fn delete_tag(&self, tag: &str) -> Result<()>;
}
