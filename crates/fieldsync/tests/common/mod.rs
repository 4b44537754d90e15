//! Shared record fixtures, shaped the way the vendor API returns them.

#![allow(dead_code)]

use fieldsync_core::crm::{
    AppointmentRecord, CustomerRecord, ServiceTypeRecord, SubscriptionRecord,
};

pub fn customer(id: i64, office: i64) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.to_string(),
        office_id: office.to_string(),
        fname: format!("First{id}"),
        lname: format!("Last{id}"),
        email: Some(format!("customer{id}@example.com")),
    }
}

pub fn subscription(
    id: i64,
    office: i64,
    customer_id: i64,
    service_id: Option<i64>,
) -> SubscriptionRecord {
    SubscriptionRecord {
        subscription_id: id.to_string(),
        office_id: office.to_string(),
        customer_id: customer_id.to_string(),
        service_id: service_id.map(|s| s.to_string()),
        active: "1".to_string(),
    }
}

pub fn service_type(id: i64, office: i64, description: &str) -> ServiceTypeRecord {
    ServiceTypeRecord {
        type_id: id.to_string(),
        office_id: office.to_string(),
        description: description.to_string(),
    }
}

pub fn appointment(
    id: i64,
    office: i64,
    customer_id: i64,
    subscription_id: Option<i64>,
) -> AppointmentRecord {
    AppointmentRecord {
        appointment_id: id.to_string(),
        office_id: office.to_string(),
        customer_id: customer_id.to_string(),
        subscription_id: subscription_id.map(|s| s.to_string()),
        date: "2024-06-15".to_string(),
        status: "0".to_string(),
    }
}
