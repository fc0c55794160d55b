use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryStatus {
    Pending,
    Shipped,
    Delivered,
}

/// Shipment record, created 1:1 with a transaction once its payment is
/// approved. Address and city are copied from the customer record at that
/// moment, not from the original checkout input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub customer_id: Uuid,
    pub address: String,
    pub city: String,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub transaction_id: Uuid,
    pub customer_id: Uuid,
    pub address: String,
    pub city: String,
}

impl Delivery {
    pub fn from_fields(fields: NewDelivery) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id: fields.transaction_id,
            customer_id: fields.customer_id,
            address: fields.address,
            city: fields.city,
            status: DeliveryStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
