//! Caching decorator over the repository contract.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{Cache, CacheLayer};
use crate::client::{AttrValue, SearchCriteria};
use crate::context::Context;
use crate::entity::{Entity, EntityId};
use crate::relation::RelationPath;

use super::{Repository, Result};

/// Per-method cache lifetimes for a cached repository.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    default_ttl: Duration,
    per_method: HashMap<&'static str, Duration>,
}

impl CachePolicy {
    /// Creates a policy applying `default_ttl` to every method.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            per_method: HashMap::new(),
        }
    }

    /// Overrides the TTL for one method.
    pub fn with_method_ttl(mut self, method: &'static str, ttl: Duration) -> Self {
        self.per_method.insert(method, ttl);
        self
    }

    /// Returns the TTL for `method`.
    pub fn ttl(&self, method: &str) -> Duration {
        self.per_method
            .get(method)
            .copied()
            .unwrap_or(self.default_ttl)
    }
}

/// Caching decorator over any repository implementation.
///
/// Relation paths are held out of the context before the cached call, so
/// a cache entry depends only on the method, its arguments, and the
/// relation-free context; the held paths are re-applied to the cached
/// result afterwards. The same base entity fetched with five different
/// relation combinations is therefore one cache entry, not five.
///
/// Entries are additionally tagged `office:{id}` when the context is
/// scoped, so a whole office's entries can be dropped at once.
pub struct CachedRepository<T, R> {
    inner: Arc<R>,
    layer: CacheLayer,
    policy: CachePolicy,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> CachedRepository<T, R>
where
    T: Entity + Serialize + DeserializeOwned,
    R: Repository<T>,
{
    /// Wraps `inner`, storing entries under `namespace` in `cache`.
    pub fn new(
        inner: Arc<R>,
        cache: Arc<dyn Cache>,
        namespace: impl Into<String>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            inner,
            layer: CacheLayer::new(cache, namespace),
            policy,
            _entity: PhantomData,
        }
    }

    /// The underlying cache layer, exposed so write-path collaborators can
    /// derive keys and invalidate entries this decorator stored.
    pub fn layer(&self) -> &CacheLayer {
        &self.layer
    }

    fn office_tags(&self, ctx: &Context) -> Vec<String> {
        ctx.office()
            .map(|office| vec![format!("office:{office}")])
            .unwrap_or_default()
    }
}

#[async_trait]
impl<T, R> Repository<T> for CachedRepository<T, R>
where
    T: Entity + Serialize + DeserializeOwned,
    R: Repository<T> + 'static,
{
    async fn find(&self, ctx: &Context, id: EntityId) -> Result<T> {
        let (ctx, relations) = ctx.clone().split_relations();
        let tags = self.office_tags(&ctx);
        let args = (&ctx, id);
        let mut entity: T = self
            .layer
            .remember("find", &args, self.policy.ttl("find"), &tags, || {
                self.inner.find(&ctx, id)
            })
            .await?;
        self.inner
            .load_relations(&ctx, &relations, std::slice::from_mut(&mut entity))
            .await?;
        Ok(entity)
    }

    async fn find_many(&self, ctx: &Context, ids: &[EntityId]) -> Result<Vec<T>> {
        let (ctx, relations) = ctx.clone().split_relations();
        let tags = self.office_tags(&ctx);
        let args = (&ctx, ids);
        let mut entities: Vec<T> = self
            .layer
            .remember("find_many", &args, self.policy.ttl("find_many"), &tags, || {
                self.inner.find_many(&ctx, ids)
            })
            .await?;
        self.inner
            .load_relations(&ctx, &relations, &mut entities)
            .await?;
        Ok(entities)
    }

    async fn search(&self, ctx: &Context, criteria: &SearchCriteria) -> Result<Vec<T>> {
        let (ctx, relations) = ctx.clone().split_relations();
        let tags = self.office_tags(&ctx);
        let args = (&ctx, criteria);
        let mut entities: Vec<T> = self
            .layer
            .remember("search", &args, self.policy.ttl("search"), &tags, || {
                self.inner.search(&ctx, criteria)
            })
            .await?;
        self.inner
            .load_relations(&ctx, &relations, &mut entities)
            .await?;
        Ok(entities)
    }

    async fn search_by(
        &self,
        ctx: &Context,
        attribute: &str,
        values: &[AttrValue],
    ) -> Result<Vec<T>> {
        let (ctx, relations) = ctx.clone().split_relations();
        let tags = self.office_tags(&ctx);
        let args = (&ctx, attribute, values);
        let mut entities: Vec<T> = self
            .layer
            .remember("search_by", &args, self.policy.ttl("search_by"), &tags, || {
                self.inner.search_by(&ctx, attribute, values)
            })
            .await?;
        self.inner
            .load_relations(&ctx, &relations, &mut entities)
            .await?;
        Ok(entities)
    }

    async fn load_relations(
        &self,
        ctx: &Context,
        paths: &[RelationPath],
        entities: &mut [T],
    ) -> Result<()> {
        self.inner.load_relations(ctx, paths, entities).await
    }

    // Batched loaders fetch per key through this decorator, so each key
    // stays an independently cacheable entry.
    fn lazy_loading_denied(&self) -> bool {
        true
    }
}
