//! Entity abstractions shared by every mapped model.

/// Primary key type used by the upstream CRM.
pub type EntityId = i64;

/// Tenant partition key; the CRM calls these offices.
pub type OfficeId = i64;

/// A mapped, upstream-agnostic CRM entity.
///
/// Models are immutable once mapped; relation values live in
/// [`Loadable`](crate::relation::Loadable) slots that are assigned once
/// per load by the relation loaders.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Entity name used in error messages and cache namespaces.
    const NAME: &'static str;

    /// Returns the primary key of this entity.
    fn id(&self) -> EntityId;
}
