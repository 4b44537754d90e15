//! Wire-shaped records as the CRM returns them.
//!
//! The vendor API encodes nearly everything as strings, ids included, and
//! uses its own key casing. These types mirror that shape verbatim;
//! [`mappers`](super::mappers) turns them into the typed models.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "officeID")]
    pub office_id: String,
    pub fname: String,
    pub lname: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    #[serde(rename = "officeID")]
    pub office_id: String,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "serviceID", default)]
    pub service_id: Option<String>,
    pub active: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceTypeRecord {
    #[serde(rename = "typeID")]
    pub type_id: String,
    #[serde(rename = "officeID")]
    pub office_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    #[serde(rename = "appointmentID")]
    pub appointment_id: String,
    #[serde(rename = "officeID")]
    pub office_id: String,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "subscriptionID", default)]
    pub subscription_id: Option<String>,
    pub date: String,
    pub status: String,
}
