//! Service type repository.

use std::sync::Arc;

use fieldsync_core::client::UpstreamClient;
use fieldsync_core::crm::{ServiceType, ServiceTypeRecord};
use fieldsync_core::repository::EntityRepository;

/// Builds the service type repository. The catalog declares no relations
/// and no searchable attributes; it only serves as a to-one target.
pub fn repository<C>(client: Arc<C>) -> EntityRepository<ServiceType, C>
where
    C: UpstreamClient<Record = ServiceTypeRecord> + 'static,
{
    EntityRepository::new(client).require_scope()
}
