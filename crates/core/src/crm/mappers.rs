//! Conversions from wire records into typed models.
//!
//! Every string the vendor sends is validated here, once, at the edge.
//! Downstream code only ever sees the typed models.

use chrono::NaiveDate;

use crate::entity::{Entity, EntityId};
use crate::relation::Loadable;
use crate::repository::MappingError;

use super::models::{
    Appointment, AppointmentStatus, Customer, ServiceType, Subscription,
};
use super::records::{
    AppointmentRecord, CustomerRecord, ServiceTypeRecord, SubscriptionRecord,
};

fn parse_id(
    entity: &'static str,
    field: &'static str,
    raw: &str,
) -> Result<EntityId, MappingError> {
    raw.trim()
        .parse::<EntityId>()
        .map_err(|_| MappingError::InvalidField {
            entity,
            field,
            reason: format!("expected a numeric id, got {raw:?}"),
        })
}

/// The vendor writes "0" or an empty string where it means "no reference".
fn parse_optional_id(
    entity: &'static str,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<EntityId>, MappingError> {
    match raw.map(str::trim) {
        None | Some("") | Some("0") => Ok(None),
        Some(value) => parse_id(entity, field, value).map(Some),
    }
}

fn parse_flag(
    entity: &'static str,
    field: &'static str,
    raw: &str,
) -> Result<bool, MappingError> {
    match raw.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(MappingError::InvalidField {
            entity,
            field,
            reason: format!("expected \"0\" or \"1\", got {other:?}"),
        }),
    }
}

fn parse_date(
    entity: &'static str,
    field: &'static str,
    raw: &str,
) -> Result<NaiveDate, MappingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        MappingError::InvalidField {
            entity,
            field,
            reason: format!("expected a YYYY-MM-DD date, got {raw:?}"),
        }
    })
}

fn parse_status(raw: &str) -> Result<AppointmentStatus, MappingError> {
    match raw.trim() {
        "0" => Ok(AppointmentStatus::Scheduled),
        "1" => Ok(AppointmentStatus::Completed),
        "-1" => Ok(AppointmentStatus::Cancelled),
        other => Err(MappingError::InvalidField {
            entity: Appointment::NAME,
            field: "status",
            reason: format!("unknown status code {other:?}"),
        }),
    }
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = MappingError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(Self::NAME, "customerID", &record.customer_id)?,
            office_id: parse_id(Self::NAME, "officeID", &record.office_id)?,
            first_name: record.fname,
            last_name: record.lname,
            email: record.email.filter(|e| !e.trim().is_empty()),
            subscriptions: Loadable::NotLoaded,
            appointments: Loadable::NotLoaded,
        })
    }
}

impl TryFrom<SubscriptionRecord> for Subscription {
    type Error = MappingError;

    fn try_from(record: SubscriptionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(Self::NAME, "subscriptionID", &record.subscription_id)?,
            office_id: parse_id(Self::NAME, "officeID", &record.office_id)?,
            customer_id: parse_id(Self::NAME, "customerID", &record.customer_id)?,
            service_type_id: parse_optional_id(
                Self::NAME,
                "serviceID",
                record.service_id.as_deref(),
            )?,
            active: parse_flag(Self::NAME, "active", &record.active)?,
            customer: Loadable::NotLoaded,
            service_type: Loadable::NotLoaded,
            appointments: Loadable::NotLoaded,
        })
    }
}

impl TryFrom<ServiceTypeRecord> for ServiceType {
    type Error = MappingError;

    fn try_from(record: ServiceTypeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(Self::NAME, "typeID", &record.type_id)?,
            office_id: parse_id(Self::NAME, "officeID", &record.office_id)?,
            description: record.description,
        })
    }
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = MappingError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(Self::NAME, "appointmentID", &record.appointment_id)?,
            office_id: parse_id(Self::NAME, "officeID", &record.office_id)?,
            customer_id: parse_id(Self::NAME, "customerID", &record.customer_id)?,
            subscription_id: parse_optional_id(
                Self::NAME,
                "subscriptionID",
                record.subscription_id.as_deref(),
            )?,
            date: parse_date(Self::NAME, "date", &record.date)?,
            status: parse_status(&record.status)?,
            subscription: Loadable::NotLoaded,
        })
    }
}
