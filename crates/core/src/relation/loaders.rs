//! Relation declarations and the batched relation loader.
//!
//! Each declared relation knows how to resolve itself for a single parent
//! (the eager path) and for a whole collection of parents (the batched
//! path). Batching accumulates distinct keys across all parents and issues
//! exactly one additional fetch per relation level, regardless of the
//! collection size.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::client::AttrValue;
use crate::context::Context;
use crate::entity::{Entity, EntityId};
use crate::repository::{Repository, Result};

use super::{Loadable, RelationError, RelationPath};

/// Resolves one declared relation for one or many parents.
#[async_trait]
pub trait RelationLoader<P>: Send + Sync {
    /// Eager path: resolve the relation for a single parent.
    async fn load_one(
        &self,
        ctx: &Context,
        parent: &mut P,
        nested: Option<&RelationPath>,
    ) -> Result<()>;

    /// Batched path: resolve the relation for all parents with at most one
    /// additional fetch, unless the target repository denies lazy loading,
    /// in which case resolution falls back to one fetch per parent so the
    /// target keeps its per-key cache granularity.
    async fn load_batch(
        &self,
        ctx: &Context,
        parents: &mut [P],
        nested: Option<&RelationPath>,
    ) -> Result<()>;
}

/// Registry of the relations declared on one model type.
pub struct RelationSet<P> {
    entity: &'static str,
    loaders: HashMap<&'static str, Arc<dyn RelationLoader<P>>>,
}

impl<P: Entity> RelationSet<P> {
    /// Creates an empty registry for `P`.
    pub fn new() -> Self {
        Self {
            entity: P::NAME,
            loaders: HashMap::new(),
        }
    }

    /// Declares a relation under `name`. A name resolves to exactly one
    /// declaration; duplicates are rejected at construction time.
    pub fn declare(
        mut self,
        name: &'static str,
        loader: impl RelationLoader<P> + 'static,
    ) -> std::result::Result<Self, RelationError> {
        if self.loaders.contains_key(name) {
            return Err(RelationError::AlreadyDeclared {
                entity: self.entity,
                relation: name,
            });
        }
        self.loaders.insert(name, Arc::new(loader));
        Ok(self)
    }

    /// Looks up a declared relation by name.
    pub fn get(
        &self,
        name: &str,
    ) -> std::result::Result<Arc<dyn RelationLoader<P>>, RelationError> {
        self.loaders
            .get(name)
            .cloned()
            .ok_or_else(|| RelationError::NotDeclared {
                entity: self.entity,
                relation: name.to_string(),
            })
    }
}

impl<P: Entity> Default for RelationSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// To-one relation: the parent row carries a foreign key pointing at one
/// related row.
pub struct ToOne<P, R: Entity> {
    repository: Arc<dyn Repository<R>>,
    foreign_key: fn(&P) -> Option<EntityId>,
    assign: fn(&mut P, Loadable<Option<R>>),
}

impl<P, R: Entity> ToOne<P, R> {
    pub fn new(
        repository: Arc<dyn Repository<R>>,
        foreign_key: fn(&P) -> Option<EntityId>,
        assign: fn(&mut P, Loadable<Option<R>>),
    ) -> Self {
        Self {
            repository,
            foreign_key,
            assign,
        }
    }
}

#[async_trait]
impl<P, R> RelationLoader<P> for ToOne<P, R>
where
    P: Entity,
    R: Entity,
{
    async fn load_one(
        &self,
        ctx: &Context,
        parent: &mut P,
        nested: Option<&RelationPath>,
    ) -> Result<()> {
        let value = match (self.foreign_key)(parent) {
            None => None,
            Some(key) => {
                let rel_ctx = ctx.for_relation(nested);
                // A missing related row is a placeholder, not an error.
                self.repository
                    .find_many(&rel_ctx, &[key])
                    .await?
                    .into_iter()
                    .next()
            }
        };
        (self.assign)(parent, Loadable::Loaded(value));
        Ok(())
    }

    async fn load_batch(
        &self,
        ctx: &Context,
        parents: &mut [P],
        nested: Option<&RelationPath>,
    ) -> Result<()> {
        if self.repository.lazy_loading_denied() {
            for parent in parents.iter_mut() {
                self.load_one(ctx, parent, nested).await?;
            }
            return Ok(());
        }

        let keys = distinct_keys(parents.iter().map(|p| (self.foreign_key)(p)));
        if keys.is_empty() {
            for parent in parents.iter_mut() {
                (self.assign)(parent, Loadable::Loaded(None));
            }
            return Ok(());
        }

        let rel_ctx = ctx.for_relation(nested);
        let related = self.repository.find_many(&rel_ctx, &keys).await?;
        let by_id: HashMap<EntityId, R> = related.into_iter().map(|r| (r.id(), r)).collect();

        for parent in parents.iter_mut() {
            let value = (self.foreign_key)(parent).and_then(|key| by_id.get(&key).cloned());
            (self.assign)(parent, Loadable::Loaded(value));
        }
        Ok(())
    }
}

/// To-many relation: related rows carry a foreign key pointing back at the
/// parent's primary key.
pub struct ToMany<P, R: Entity> {
    repository: Arc<dyn Repository<R>>,
    foreign_attribute: &'static str,
    parent_key: fn(&P) -> EntityId,
    related_key: fn(&R) -> Option<EntityId>,
    assign: fn(&mut P, Loadable<Vec<R>>),
}

impl<P, R: Entity> ToMany<P, R> {
    pub fn new(
        repository: Arc<dyn Repository<R>>,
        foreign_attribute: &'static str,
        parent_key: fn(&P) -> EntityId,
        related_key: fn(&R) -> Option<EntityId>,
        assign: fn(&mut P, Loadable<Vec<R>>),
    ) -> Self {
        Self {
            repository,
            foreign_attribute,
            parent_key,
            related_key,
            assign,
        }
    }
}

#[async_trait]
impl<P, R> RelationLoader<P> for ToMany<P, R>
where
    P: Entity,
    R: Entity,
{
    async fn load_one(
        &self,
        ctx: &Context,
        parent: &mut P,
        nested: Option<&RelationPath>,
    ) -> Result<()> {
        let rel_ctx = ctx.for_relation(nested);
        let key = (self.parent_key)(parent);
        let related = self
            .repository
            .search_by(&rel_ctx, self.foreign_attribute, &[AttrValue::Int(key)])
            .await?;
        (self.assign)(parent, Loadable::Loaded(related));
        Ok(())
    }

    async fn load_batch(
        &self,
        ctx: &Context,
        parents: &mut [P],
        nested: Option<&RelationPath>,
    ) -> Result<()> {
        if self.repository.lazy_loading_denied() {
            for parent in parents.iter_mut() {
                self.load_one(ctx, parent, nested).await?;
            }
            return Ok(());
        }

        let keys = distinct_keys(parents.iter().map(|p| Some((self.parent_key)(p))));
        if keys.is_empty() {
            return Ok(());
        }

        let values: Vec<AttrValue> = keys.iter().copied().map(AttrValue::Int).collect();
        let rel_ctx = ctx.for_relation(nested);
        let related = self
            .repository
            .search_by(&rel_ctx, self.foreign_attribute, &values)
            .await?;

        let mut buckets: HashMap<EntityId, Vec<R>> = HashMap::new();
        for row in related {
            if let Some(key) = (self.related_key)(&row) {
                buckets.entry(key).or_default().push(row);
            }
        }

        for parent in parents.iter_mut() {
            let bucket = buckets
                .get(&(self.parent_key)(parent))
                .cloned()
                .unwrap_or_default();
            (self.assign)(parent, Loadable::Loaded(bucket));
        }
        Ok(())
    }
}

/// The picker: accumulates distinct, non-null keys in first-seen order.
fn distinct_keys(keys: impl Iterator<Item = Option<EntityId>>) -> Vec<EntityId> {
    let mut seen = HashSet::new();
    keys.flatten().filter(|key| seen.insert(*key)).collect()
}
