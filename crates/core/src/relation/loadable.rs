/// Write-once slot for a relation value attached after mapping.
///
/// Distinguishes "never requested" from "resolved to the empty
/// placeholder": a to-one relation resolves to `Loaded(None)` when the
/// related row is missing, a to-many relation to `Loaded(vec![])`. After
/// relation loading, no requested slot is left as `NotLoaded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Loadable<V> {
    /// The relation was not requested for this entity.
    #[default]
    NotLoaded,
    /// The relation was resolved, possibly to its empty placeholder.
    Loaded(V),
}

impl<V> Loadable<V> {
    /// Returns true once the relation has been resolved.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Loadable::Loaded(_))
    }

    /// Returns the resolved value, if any.
    pub fn get(&self) -> Option<&V> {
        match self {
            Loadable::Loaded(value) => Some(value),
            Loadable::NotLoaded => None,
        }
    }

    /// Consumes the slot, returning the resolved value, if any.
    pub fn into_inner(self) -> Option<V> {
        match self {
            Loadable::Loaded(value) => Some(value),
            Loadable::NotLoaded => None,
        }
    }
}
