use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog item. All prices are integer minor currency units.
///
/// Stock only moves when a payment completes as APPROVED; transaction
/// creation checks availability but reserves nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        image_url: impl Into<String>,
        stock: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price_cents,
            image_url: image_url.into(),
            stock,
            created_at: Utc::now(),
        }
    }
}
