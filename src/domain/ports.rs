use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, NewCustomer};
use super::delivery::{Delivery, NewDelivery};
use super::product::Product;
use super::transaction::{NewTransaction, Transaction, TransactionStatus};
use crate::error::{GatewayError, Result};

pub type ProductStoreBox = Box<dyn ProductStore>;
pub type CustomerStoreBox = Box<dyn CustomerStore>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type DeliveryStoreBox = Box<dyn DeliveryStore>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;
    /// Subtracts `quantity` from the product's stock. Returns the updated
    /// product, or `None` when no product has this id.
    async fn decrement_stock(&self, id: Uuid, quantity: u32) -> Result<Option<Product>>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn create(&self, profile: NewCustomer) -> Result<Customer>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create(&self, fields: NewTransaction) -> Result<Transaction>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Transaction>>;
    /// Sets the transaction's status; the gateway id is recorded only when
    /// one is supplied. Returns `None` when no transaction has this id.
    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
        gateway_transaction_id: Option<String>,
    ) -> Result<Option<Transaction>>;
}

#[async_trait]
pub trait DeliveryStore: Send + Sync {
    async fn create(&self, fields: NewDelivery) -> Result<Delivery>;
    async fn find_by_transaction(&self, transaction_id: Uuid) -> Result<Option<Delivery>>;
}

/// Raw card data submitted for tokenization. Never persisted locally.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetails {
    pub number: String,
    pub cvc: String,
    pub exp_month: String,
    pub exp_year: String,
    pub card_holder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardToken {
    pub token_id: String,
    pub brand: String,
}

/// Merchant acceptance tokens the gateway requires on every charge.
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptanceTokens {
    pub acceptance_token: String,
    pub accept_personal_auth: String,
    pub permalink: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPayment {
    pub token: String,
    pub installments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub customer_email: String,
    /// The local transaction's reference; correlates both records.
    pub reference: String,
    pub payment: CardPayment,
    pub acceptance_token: String,
    pub accept_personal_auth: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeResponse {
    /// The gateway's own transaction id.
    pub id: String,
    /// Gateway status vocabulary; see `TransactionStatus::from_gateway`.
    pub status: String,
    pub reference: String,
    pub amount_cents: i64,
}

/// The external card-payment processor.
///
/// Treated as an opaque remote service: a charge either yields a response in
/// the gateway's status vocabulary or a `GatewayError`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn tokenize_card(&self, card: CardDetails) -> Result<CardToken, GatewayError>;
    async fn acceptance_tokens(&self) -> Result<AcceptanceTokens, GatewayError>;
    async fn create_charge(&self, request: ChargeRequest) -> Result<ChargeResponse, GatewayError>;
    async fn fetch_charge(&self, charge_id: &str) -> Result<ChargeResponse, GatewayError>;
}
