//! Domain models for the field-service CRM, their wire records, and the
//! conversions between the two.

mod mappers;
mod models;
mod records;

pub use models::{Appointment, AppointmentStatus, Customer, ServiceType, Subscription};
pub use records::{AppointmentRecord, CustomerRecord, ServiceTypeRecord, SubscriptionRecord};
