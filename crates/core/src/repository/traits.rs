use async_trait::async_trait;

use crate::client::{AttrValue, SearchCriteria};
use crate::context::Context;
use crate::entity::{Entity, EntityId};
use crate::relation::RelationPath;

use super::Result;

/// The generic read contract over one mapped entity type.
///
/// Implemented by [`EntityRepository`](super::EntityRepository) and by
/// [`CachedRepository`](super::CachedRepository), so a caching decorator
/// can stand wherever a base repository is expected, including as the
/// target of a relation declaration.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Fetches a single entity, failing with
    /// [`RepositoryError::NotFound`](super::RepositoryError::NotFound)
    /// when the upstream has no row, and resolves the context's relation
    /// paths onto it.
    async fn find(&self, ctx: &Context, id: EntityId) -> Result<T>;

    /// Fetches many entities by id; missing ids are absent from the
    /// result. Relation paths are resolved with batched loading.
    async fn find_many(&self, ctx: &Context, ids: &[EntityId]) -> Result<Vec<T>>;

    /// Searches entities matching the criteria.
    async fn search(&self, ctx: &Context, criteria: &SearchCriteria) -> Result<Vec<T>>;

    /// Searches by a registered attribute, failing with
    /// [`RepositoryError::UnsupportedSearchAttribute`](super::RepositoryError::UnsupportedSearchAttribute)
    /// when no handler was registered for it.
    async fn search_by(
        &self,
        ctx: &Context,
        attribute: &str,
        values: &[AttrValue],
    ) -> Result<Vec<T>>;

    /// Resolves `paths` against already-fetched entities, leaving every
    /// requested relation slot loaded (value or placeholder).
    async fn load_relations(
        &self,
        ctx: &Context,
        paths: &[RelationPath],
        entities: &mut [T],
    ) -> Result<()>;

    /// When true, batched relation loaders fall back to per-parent
    /// fetches against this repository, keeping its per-key cache
    /// granularity intact. Cache decorators report true.
    fn lazy_loading_denied(&self) -> bool {
        false
    }
}
