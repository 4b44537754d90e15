use async_trait::async_trait;

use crate::context::Context;
use crate::entity::EntityId;

use super::{Result, SearchCriteria};

/// Contract implemented by concrete upstream CRM clients, one per entity
/// type.
///
/// Clients return raw upstream record shapes; mapping into portal models
/// happens in the repository layer. Timeouts and retries are the client's
/// own concern.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// The raw record shape this client returns.
    type Record: Send + 'static;

    /// Fetches a single record by id; `None` when the upstream has no row.
    async fn fetch(&self, ctx: &Context, id: EntityId) -> Result<Option<Self::Record>>;

    /// Fetches many records by id; missing ids are silently absent from
    /// the result.
    async fn fetch_many(&self, ctx: &Context, ids: &[EntityId]) -> Result<Vec<Self::Record>>;

    /// Searches records matching all criteria filters, applying the
    /// context's office scope and pagination where the upstream supports
    /// them.
    async fn search(&self, ctx: &Context, criteria: &SearchCriteria) -> Result<Vec<Self::Record>>;
}
