//! Appointment repository.

use std::sync::Arc;

use fieldsync_core::client::{SearchCriteria, UpstreamClient};
use fieldsync_core::crm::{Appointment, AppointmentRecord, Subscription};
use fieldsync_core::relation::{RelationError, RelationSet, ToOne};
use fieldsync_core::repository::{EntityRepository, Repository, SearchTable};

fn search_table() -> SearchTable {
    SearchTable::new()
        .register("customerID", |values| {
            SearchCriteria::new().filter("customerID", values.iter().cloned())
        })
        .register("subscriptionID", |values| {
            SearchCriteria::new().filter("subscriptionID", values.iter().cloned())
        })
}

/// Builds the appointment repository without relations, for use as a
/// to-many target inside other repositories.
pub fn plain<C>(client: Arc<C>) -> EntityRepository<Appointment, C>
where
    C: UpstreamClient<Record = AppointmentRecord> + 'static,
{
    EntityRepository::new(client)
        .require_scope()
        .with_search_table(search_table())
}

/// Builds the appointment repository with its relation declared.
pub fn repository<C>(
    client: Arc<C>,
    subscriptions: Arc<dyn Repository<Subscription>>,
) -> Result<EntityRepository<Appointment, C>, RelationError>
where
    C: UpstreamClient<Record = AppointmentRecord> + 'static,
{
    let relations = RelationSet::new().declare(
        "subscription",
        ToOne::new(
            subscriptions,
            |a: &Appointment| a.subscription_id,
            |a: &mut Appointment, v| a.subscription = v,
        ),
    )?;
    Ok(plain(client).with_relations(relations))
}
