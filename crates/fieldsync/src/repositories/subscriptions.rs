//! Subscription repository.

use std::sync::Arc;

use fieldsync_core::client::{SearchCriteria, UpstreamClient};
use fieldsync_core::crm::{
    Appointment, Customer, ServiceType, Subscription, SubscriptionRecord,
};
use fieldsync_core::relation::{RelationError, RelationSet, ToMany, ToOne};
use fieldsync_core::repository::{EntityRepository, Repository, SearchTable};

fn search_table() -> SearchTable {
    SearchTable::new().register("customerID", |values| {
        SearchCriteria::new().filter("customerID", values.iter().cloned())
    })
}

/// Builds the subscription repository without relations, for use as a
/// relation target inside other repositories.
pub fn plain<C>(client: Arc<C>) -> EntityRepository<Subscription, C>
where
    C: UpstreamClient<Record = SubscriptionRecord> + 'static,
{
    EntityRepository::new(client)
        .require_scope()
        .with_search_table(search_table())
}

/// Builds the subscription repository with its relations declared.
pub fn repository<C>(
    client: Arc<C>,
    customers: Arc<dyn Repository<Customer>>,
    service_types: Arc<dyn Repository<ServiceType>>,
    appointments: Arc<dyn Repository<Appointment>>,
) -> Result<EntityRepository<Subscription, C>, RelationError>
where
    C: UpstreamClient<Record = SubscriptionRecord> + 'static,
{
    let relations = RelationSet::new()
        .declare(
            "customer",
            ToOne::new(
                customers,
                |s: &Subscription| Some(s.customer_id),
                |s: &mut Subscription, v| s.customer = v,
            ),
        )?
        .declare(
            "service_type",
            ToOne::new(
                service_types,
                |s: &Subscription| s.service_type_id,
                |s: &mut Subscription, v| s.service_type = v,
            ),
        )?
        .declare(
            "appointments",
            ToMany::new(
                appointments,
                "subscriptionID",
                |s: &Subscription| s.id,
                |a: &Appointment| a.subscription_id,
                |s: &mut Subscription, v| s.appointments = v,
            ),
        )?;
    Ok(plain(client).with_relations(relations))
}
