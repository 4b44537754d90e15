//! Customer repository.

use std::sync::Arc;

use fieldsync_core::client::UpstreamClient;
use fieldsync_core::crm::{Appointment, Customer, CustomerRecord, Subscription};
use fieldsync_core::relation::{RelationError, RelationSet, ToMany};
use fieldsync_core::repository::{EntityRepository, Repository};

/// Builds the customer repository without relations, for use as a to-one
/// target inside other repositories.
pub fn plain<C>(client: Arc<C>) -> EntityRepository<Customer, C>
where
    C: UpstreamClient<Record = CustomerRecord> + 'static,
{
    EntityRepository::new(client).require_scope()
}

/// Builds the customer repository with its relations declared.
pub fn repository<C>(
    client: Arc<C>,
    subscriptions: Arc<dyn Repository<Subscription>>,
    appointments: Arc<dyn Repository<Appointment>>,
) -> Result<EntityRepository<Customer, C>, RelationError>
where
    C: UpstreamClient<Record = CustomerRecord> + 'static,
{
    let relations = RelationSet::new()
        .declare(
            "subscriptions",
            ToMany::new(
                subscriptions,
                "customerID",
                |c: &Customer| c.id,
                |s: &Subscription| Some(s.customer_id),
                |c: &mut Customer, v| c.subscriptions = v,
            ),
        )?
        .declare(
            "appointments",
            ToMany::new(
                appointments,
                "customerID",
                |c: &Customer| c.id,
                |a: &Appointment| Some(a.customer_id),
                |c: &mut Customer, v| c.appointments = v,
            ),
        )?;
    Ok(plain(client).with_relations(relations))
}
