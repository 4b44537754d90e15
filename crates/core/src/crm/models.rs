use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, OfficeId};
use crate::relation::Loadable;

/// A portal customer account.
///
/// Relation slots are excluded from the serialized form: cached base
/// entities never embed relation data, relations are re-resolved after
/// the cached fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub office_id: OfficeId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    #[serde(skip)]
    pub subscriptions: Loadable<Vec<Subscription>>,
    #[serde(skip)]
    pub appointments: Loadable<Vec<Appointment>>,
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// A recurring service subscription held by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: EntityId,
    pub office_id: OfficeId,
    pub customer_id: EntityId,
    pub service_type_id: Option<EntityId>,
    pub active: bool,
    #[serde(skip)]
    pub customer: Loadable<Option<Customer>>,
    #[serde(skip)]
    pub service_type: Loadable<Option<ServiceType>>,
    #[serde(skip)]
    pub appointments: Loadable<Vec<Appointment>>,
}

impl Entity for Subscription {
    const NAME: &'static str = "Subscription";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// A service offering (the CRM's service type catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: EntityId,
    pub office_id: OfficeId,
    pub description: String,
}

impl Entity for ServiceType {
    const NAME: &'static str = "ServiceType";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Scheduling state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A scheduled or past service visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: EntityId,
    pub office_id: OfficeId,
    pub customer_id: EntityId,
    pub subscription_id: Option<EntityId>,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
    #[serde(skip)]
    pub subscription: Loadable<Option<Subscription>>,
}

impl Entity for Appointment {
    const NAME: &'static str = "Appointment";

    fn id(&self) -> EntityId {
        self.id
    }
}
