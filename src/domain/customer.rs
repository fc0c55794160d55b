use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Buyer record, keyed for lookup by email.
///
/// A customer is created once per distinct email and never updated by the
/// checkout flow; later orders with the same email reuse the stored profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// Profile fields supplied when a customer is first seen.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl Customer {
    pub fn from_profile(profile: NewCustomer) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: profile.email,
            full_name: profile.full_name,
            phone: profile.phone,
            address: profile.address,
            city: profile.city,
            created_at: Utc::now(),
        }
    }
}
