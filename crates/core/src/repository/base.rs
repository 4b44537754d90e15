//! Generic base repository over one mapped entity type.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::client::{AttrValue, SearchCriteria, UpstreamClient};
use crate::context::Context;
use crate::entity::{Entity, EntityId};
use crate::relation::{RelationPath, RelationSet};

use super::{MappingError, Repository, RepositoryError, Result};

/// Builds the upstream criteria for one searchable attribute.
pub type SearchHandler = fn(&[AttrValue]) -> SearchCriteria;

/// Table of typed search-attribute handlers, registered at construction.
///
/// An attribute is searchable iff a handler mapping it to concrete
/// criteria was registered; anything else fails with
/// `UnsupportedSearchAttribute` at call time.
#[derive(Default)]
pub struct SearchTable {
    handlers: HashMap<&'static str, SearchHandler>,
}

impl SearchTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for `attribute`.
    pub fn register(mut self, attribute: &'static str, handler: SearchHandler) -> Self {
        self.handlers.insert(attribute, handler);
        self
    }

    /// Looks up the handler for `attribute`.
    pub fn get(&self, attribute: &str) -> Option<SearchHandler> {
        self.handlers.get(attribute).copied()
    }
}

/// Generic repository over model type `T`, mapped from the records of
/// upstream client `C`.
///
/// Owns the relation registry and the search-attribute table for `T`,
/// both populated at construction. All per-call state travels in the
/// [`Context`] argument.
pub struct EntityRepository<T: Entity, C: UpstreamClient> {
    client: Arc<C>,
    relations: RelationSet<T>,
    search_table: SearchTable,
    scoped: bool,
}

impl<T, C> EntityRepository<T, C>
where
    T: Entity + TryFrom<C::Record, Error = MappingError>,
    C: UpstreamClient,
{
    /// Creates a repository with no relations and no searchable
    /// attributes.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            relations: RelationSet::new(),
            search_table: SearchTable::new(),
            scoped: false,
        }
    }

    /// Installs the relation registry for `T`.
    pub fn with_relations(mut self, relations: RelationSet<T>) -> Self {
        self.relations = relations;
        self
    }

    /// Installs the search-attribute table for `T`.
    pub fn with_search_table(mut self, search_table: SearchTable) -> Self {
        self.search_table = search_table;
        self
    }

    /// Requires an office scope on every operation.
    pub fn require_scope(mut self) -> Self {
        self.scoped = true;
        self
    }

    fn check_scope(&self, ctx: &Context) -> Result<()> {
        if self.scoped {
            ctx.require_office()?;
        }
        Ok(())
    }

    fn map_records(records: Vec<C::Record>) -> Result<Vec<T>> {
        records
            .into_iter()
            .map(|record| Ok(T::try_from(record)?))
            .collect()
    }
}

#[async_trait]
impl<T, C> Repository<T> for EntityRepository<T, C>
where
    T: Entity + TryFrom<C::Record, Error = MappingError>,
    C: UpstreamClient + 'static,
{
    async fn find(&self, ctx: &Context, id: EntityId) -> Result<T> {
        self.check_scope(ctx)?;
        let record = self
            .client
            .fetch(ctx, id)
            .await?
            .ok_or(RepositoryError::NotFound {
                entity: T::NAME,
                id,
            })?;
        let mut entity = T::try_from(record)?;
        self.load_relations(ctx, ctx.relations(), std::slice::from_mut(&mut entity))
            .await?;
        Ok(entity)
    }

    async fn find_many(&self, ctx: &Context, ids: &[EntityId]) -> Result<Vec<T>> {
        self.check_scope(ctx)?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = self.client.fetch_many(ctx, ids).await?;
        let mut entities = Self::map_records(records)?;
        self.load_relations(ctx, ctx.relations(), &mut entities)
            .await?;
        Ok(entities)
    }

    async fn search(&self, ctx: &Context, criteria: &SearchCriteria) -> Result<Vec<T>> {
        self.check_scope(ctx)?;
        let records = self.client.search(ctx, criteria).await?;
        let mut entities = Self::map_records(records)?;
        self.load_relations(ctx, ctx.relations(), &mut entities)
            .await?;
        Ok(entities)
    }

    async fn search_by(
        &self,
        ctx: &Context,
        attribute: &str,
        values: &[AttrValue],
    ) -> Result<Vec<T>> {
        let handler = self.search_table.get(attribute).ok_or_else(|| {
            RepositoryError::UnsupportedSearchAttribute {
                entity: T::NAME,
                attribute: attribute.to_string(),
            }
        })?;
        let criteria = handler(values);
        self.search(ctx, &criteria).await
    }

    async fn load_relations(
        &self,
        ctx: &Context,
        paths: &[RelationPath],
        entities: &mut [T],
    ) -> Result<()> {
        // Empty result sets short-circuit: nothing to resolve, no fetches.
        if entities.is_empty() || paths.is_empty() {
            return Ok(());
        }
        let count = entities.len();
        for path in paths {
            let loader = self.relations.get(path.segment())?;
            match &mut *entities {
                [single] => loader.load_one(ctx, single, path.nested()).await?,
                many => loader.load_batch(ctx, many, path.nested()).await?,
            }
            tracing::trace!(
                entity = T::NAME,
                relation = %path,
                count,
                "Resolved relation path"
            );
        }
        Ok(())
    }
}
