use serde::Serialize;

use crate::entity::OfficeId;
use crate::relation::{RelationError, RelationPath};

use super::{ContextError, Result};

/// Pagination window for upstream search calls.
///
/// Pages are 1-based, matching the upstream CRM API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

/// Immutable per-call state threaded through repository operations.
///
/// A context is a plain value: builder methods consume `self` and return a
/// new value, so one context can never be aliased across logical requests.
/// Relation paths are validated when stored, before any fetch happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Context {
    office: Option<OfficeId>,
    pagination: Option<Pagination>,
    // Never part of the serialized form: cache keys must not vary with the
    // relations a caller asked for.
    #[serde(skip)]
    relations: Vec<RelationPath>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the office scope for subsequent fetches.
    pub fn with_office(mut self, office: OfficeId) -> Self {
        self.office = Some(office);
        self
    }

    /// Sets the pagination window for subsequent search fetches.
    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Validates and stores relation paths to resolve on the next fetch.
    ///
    /// Each path must match `segment ("." segment)*` with word-character
    /// segments; anything else fails with [`RelationError::InvalidPath`]
    /// before any fetch is issued.
    pub fn with_related<I, S>(mut self, paths: I) -> std::result::Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.relations.push(RelationPath::parse(path.as_ref())?);
        }
        Ok(self)
    }

    /// Returns the office scope, if set.
    pub fn office(&self) -> Option<OfficeId> {
        self.office
    }

    /// Returns the office scope, or [`ContextError::ScopeNotSet`].
    pub fn require_office(&self) -> Result<OfficeId> {
        self.office.ok_or(ContextError::ScopeNotSet)
    }

    /// Returns the pagination window, if set.
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Returns the relation paths requested for the next fetch.
    pub fn relations(&self) -> &[RelationPath] {
        &self.relations
    }

    /// Reads and clears the requested relation paths, "holding" them.
    ///
    /// The caching layer splits a context before the cached call so the
    /// underlying fetch (and its cache key) never varies with the relations
    /// a caller asked for, then re-applies the held paths to the result.
    pub fn split_relations(mut self) -> (Self, Vec<RelationPath>) {
        let relations = std::mem::take(&mut self.relations);
        (self, relations)
    }

    /// Derives the context for fetching one relation level: same office,
    /// pagination cleared, relations replaced by the nested path (if any).
    pub fn for_relation(&self, nested: Option<&RelationPath>) -> Self {
        Self {
            office: self.office,
            pagination: None,
            relations: nested.map(|path| vec![path.clone()]).unwrap_or_default(),
        }
    }
}
