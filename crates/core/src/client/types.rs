use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A filter value accepted by upstream search operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl From<EntityId> for AttrValue {
    fn from(value: EntityId) -> Self {
        AttrValue::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Equality/set filters for an upstream search, keyed by upstream
/// attribute name.
///
/// Backed by a `BTreeMap` so the serialized form (and therefore any cache
/// key derived from it) is deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchCriteria {
    filters: BTreeMap<String, Vec<AttrValue>>,
}

impl SearchCriteria {
    /// Creates an empty criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter: `attribute` must equal one of `values`.
    pub fn filter<V>(mut self, attribute: impl Into<String>, values: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<AttrValue>,
    {
        self.filters
            .insert(attribute.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the values filtered on `attribute`, if any.
    pub fn get(&self, attribute: &str) -> Option<&[AttrValue]> {
        self.filters.get(attribute).map(Vec::as_slice)
    }

    /// Iterates over all filters in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AttrValue])> {
        self.filters
            .iter()
            .map(|(attr, values)| (attr.as_str(), values.as_slice()))
    }

    /// Returns true when no filters are set.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
