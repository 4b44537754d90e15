//! Per-entity repository builders and wiring.
//!
//! Relation declarations between customers and subscriptions point both
//! ways, so the graph is wired in tiers: relation targets are built first
//! without back-relations, then the portal-facing repositories declare
//! their relations against those targets. Nested paths resolve as far as
//! the target tier declares; a path that would cycle back to its own root
//! is simply not declared.

use std::sync::Arc;

use fieldsync_core::cache::Cache;
use fieldsync_core::crm::{Appointment, Customer, ServiceType, Subscription};
use fieldsync_core::relation::RelationError;
use fieldsync_core::repository::{CachePolicy, CachedRepository, Repository};

use crate::upstream::InMemoryUpstreams;

pub mod appointments;
pub mod customers;
pub mod service_types;
pub mod subscriptions;

/// The portal-facing repository set.
pub struct Repositories {
    pub customers: Arc<dyn Repository<Customer>>,
    pub subscriptions: Arc<dyn Repository<Subscription>>,
    pub service_types: Arc<dyn Repository<ServiceType>>,
    pub appointments: Arc<dyn Repository<Appointment>>,
}

impl Repositories {
    /// Wires the full repository graph over the in-memory upstreams,
    /// without caching.
    pub fn wire(upstreams: &InMemoryUpstreams) -> Result<Self, RelationError> {
        let service_types: Arc<dyn Repository<ServiceType>> = Arc::new(
            service_types::repository(upstreams.service_types.clone()),
        );
        let customers_leaf: Arc<dyn Repository<Customer>> =
            Arc::new(customers::plain(upstreams.customers.clone()));
        let appointments_leaf: Arc<dyn Repository<Appointment>> =
            Arc::new(appointments::plain(upstreams.appointments.clone()));

        let subscriptions: Arc<dyn Repository<Subscription>> =
            Arc::new(subscriptions::repository(
                upstreams.subscriptions.clone(),
                customers_leaf,
                service_types.clone(),
                appointments_leaf,
            )?);

        let appointments_full: Arc<dyn Repository<Appointment>> = Arc::new(
            appointments::repository(upstreams.appointments.clone(), subscriptions.clone())?,
        );
        let customers_full: Arc<dyn Repository<Customer>> = Arc::new(customers::repository(
            upstreams.customers.clone(),
            subscriptions.clone(),
            appointments_full.clone(),
        )?);

        Ok(Self {
            customers: customers_full,
            subscriptions,
            service_types,
            appointments: appointments_full,
        })
    }

    /// Wires the full repository graph with every node behind a caching
    /// decorator.
    ///
    /// Repositories sharing an entity type share a namespace, so a base
    /// entity cached through one node is a hit through the others; cache
    /// entries never embed relation data, which makes that sharing sound.
    pub fn wire_cached(
        upstreams: &InMemoryUpstreams,
        cache: Arc<dyn Cache>,
        policy: CachePolicy,
    ) -> Result<Self, RelationError> {
        let service_types: Arc<dyn Repository<ServiceType>> = Arc::new(CachedRepository::new(
            Arc::new(service_types::repository(upstreams.service_types.clone())),
            cache.clone(),
            "service_types",
            policy.clone(),
        ));
        let customers_leaf: Arc<dyn Repository<Customer>> = Arc::new(CachedRepository::new(
            Arc::new(customers::plain(upstreams.customers.clone())),
            cache.clone(),
            "customers",
            policy.clone(),
        ));
        let appointments_leaf: Arc<dyn Repository<Appointment>> =
            Arc::new(CachedRepository::new(
                Arc::new(appointments::plain(upstreams.appointments.clone())),
                cache.clone(),
                "appointments",
                policy.clone(),
            ));

        let subscriptions: Arc<dyn Repository<Subscription>> = Arc::new(CachedRepository::new(
            Arc::new(subscriptions::repository(
                upstreams.subscriptions.clone(),
                customers_leaf,
                service_types.clone(),
                appointments_leaf,
            )?),
            cache.clone(),
            "subscriptions",
            policy.clone(),
        ));

        let appointments_full: Arc<dyn Repository<Appointment>> =
            Arc::new(CachedRepository::new(
                Arc::new(appointments::repository(
                    upstreams.appointments.clone(),
                    subscriptions.clone(),
                )?),
                cache.clone(),
                "appointments",
                policy.clone(),
            ));
        let customers_full: Arc<dyn Repository<Customer>> = Arc::new(CachedRepository::new(
            Arc::new(customers::repository(
                upstreams.customers.clone(),
                subscriptions.clone(),
                appointments_full.clone(),
            )?),
            cache,
            "customers",
            policy,
        ));

        Ok(Self {
            customers: customers_full,
            subscriptions,
            service_types,
            appointments: appointments_full,
        })
    }
}
