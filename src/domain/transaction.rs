use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::customer::Customer;
use super::product::Product;

/// Lifecycle of a transaction.
///
/// `Pending` is the only state the checkout acts on; the other four are
/// terminal for this flow and reject further completion attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Declined,
    Error,
    Voided,
}

impl TransactionStatus {
    /// Maps the gateway's status vocabulary onto the local one.
    ///
    /// Unrecognized statuses map to `Pending` rather than erroring, so an
    /// unexpected gateway value never drops the update on the floor.
    pub fn from_gateway(status: &str) -> Self {
        match status {
            "APPROVED" => Self::Approved,
            "DECLINED" => Self::Declined,
            "ERROR" => Self::Error,
            "VOIDED" => Self::Voided,
            "PENDING" => Self::Pending,
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != Self::Pending
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Error => "ERROR",
            Self::Voided => "VOIDED",
        };
        f.write_str(s)
    }
}

/// Aggregate root of a purchase.
///
/// `customer` and `product` are resolved snapshots of independently persisted
/// entities, embedded so callers get a display-ready record in one read;
/// `customer_id` and `product_id` remain the authoritative references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    /// Human-readable unique identifier, correlates local and gateway records.
    pub reference: String,
    pub customer_id: Uuid,
    pub customer: Customer,
    pub product_id: Uuid,
    pub product: Product,
    pub quantity: u32,
    pub amount_cents: i64,
    pub base_fee_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
    pub status: TransactionStatus,
    pub gateway_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a transaction is persisted from; relations are resolved by the
/// store at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub reference: String,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub amount_cents: i64,
    pub base_fee_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
    pub status: TransactionStatus,
}
