use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{CustomerStore, DeliveryStore, ProductStore, TransactionStore};
use crate::domain::{
    Customer, Delivery, NewCustomer, NewDelivery, NewTransaction, Product, Transaction,
    TransactionStatus,
};
use crate::error::{Result, StoreError};

/// A thread-safe in-memory store backing all four persistence ports.
///
/// Cloning is cheap and clones share state, so one store can be boxed once
/// per port the way a database-backed implementation would share a pool.
/// Transactions are stored by id and their customer/product relations are
/// re-resolved on every read, mirroring a relational store's eager joins.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
    deliveries: Arc<RwLock<HashMap<Uuid, Delivery>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the catalog. Products are otherwise read-only except for stock
    /// decrements.
    pub async fn insert_product(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.id, product);
    }

    pub async fn delivery_count(&self) -> usize {
        self.deliveries.read().await.len()
    }

    pub async fn customer_count(&self) -> usize {
        self.customers.read().await.len()
    }

    /// Re-reads a transaction's relations so stale snapshots never leak out.
    async fn hydrate(&self, mut tx: Transaction) -> Result<Transaction> {
        let customer = {
            let customers = self.customers.read().await;
            customers.get(&tx.customer_id).cloned()
        };
        let product = {
            let products = self.products.read().await;
            products.get(&tx.product_id).cloned()
        };
        tx.customer = customer.ok_or_else(|| {
            StoreError::Integrity(format!("transaction {} references unknown customer", tx.id))
        })?;
        tx.product = product.ok_or_else(|| {
            StoreError::Integrity(format!("transaction {} references unknown product", tx.id))
        })?;
        Ok(tx)
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn decrement_stock(&self, id: Uuid, quantity: u32) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) => {
                product.stock = product.stock.saturating_sub(quantity);
                Ok(Some(product.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn create(&self, profile: NewCustomer) -> Result<Customer> {
        let mut customers = self.customers.write().await;
        // Unique constraint on email, as a relational backend would enforce.
        if customers.values().any(|c| c.email == profile.email) {
            return Err(StoreError::Integrity(format!(
                "duplicate customer email: {}",
                profile.email
            )));
        }
        let customer = Customer::from_profile(profile);
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| c.email == email).cloned())
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn create(&self, fields: NewTransaction) -> Result<Transaction> {
        let customer = {
            let customers = self.customers.read().await;
            customers.get(&fields.customer_id).cloned()
        }
        .ok_or_else(|| {
            StoreError::Integrity(format!("unknown customer id: {}", fields.customer_id))
        })?;
        let product = {
            let products = self.products.read().await;
            products.get(&fields.product_id).cloned()
        }
        .ok_or_else(|| {
            StoreError::Integrity(format!("unknown product id: {}", fields.product_id))
        })?;

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            reference: fields.reference,
            customer_id: fields.customer_id,
            customer,
            product_id: fields.product_id,
            product,
            quantity: fields.quantity,
            amount_cents: fields.amount_cents,
            base_fee_cents: fields.base_fee_cents,
            delivery_fee_cents: fields.delivery_fee_cents,
            total_cents: fields.total_cents,
            status: fields.status,
            gateway_transaction_id: None,
            created_at: now,
            updated_at: now,
        };

        let mut transactions = self.transactions.write().await;
        if transactions
            .values()
            .any(|t| t.reference == transaction.reference)
        {
            return Err(StoreError::Integrity(format!(
                "duplicate transaction reference: {}",
                transaction.reference
            )));
        }
        transactions.insert(transaction.id, transaction.clone());
        drop(transactions);

        Ok(transaction)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let tx = {
            let transactions = self.transactions.read().await;
            transactions.get(&id).cloned()
        };
        match tx {
            Some(tx) => Ok(Some(self.hydrate(tx).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Transaction>> {
        let tx = {
            let transactions = self.transactions.read().await;
            transactions
                .values()
                .find(|t| t.reference == reference)
                .cloned()
        };
        match tx {
            Some(tx) => Ok(Some(self.hydrate(tx).await?)),
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: TransactionStatus,
        gateway_transaction_id: Option<String>,
    ) -> Result<Option<Transaction>> {
        let updated = {
            let mut transactions = self.transactions.write().await;
            match transactions.get_mut(&id) {
                Some(tx) => {
                    tx.status = status;
                    if let Some(gateway_id) = gateway_transaction_id {
                        tx.gateway_transaction_id = Some(gateway_id);
                    }
                    tx.updated_at = Utc::now();
                    Some(tx.clone())
                }
                None => None,
            }
        };
        match updated {
            Some(tx) => Ok(Some(self.hydrate(tx).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DeliveryStore for InMemoryStore {
    async fn create(&self, fields: NewDelivery) -> Result<Delivery> {
        let delivery = Delivery::from_fields(fields);
        let mut deliveries = self.deliveries.write().await;
        deliveries.insert(delivery.id, delivery.clone());
        Ok(delivery)
    }

    async fn find_by_transaction(&self, transaction_id: Uuid) -> Result<Option<Delivery>> {
        let deliveries = self.deliveries.read().await;
        Ok(deliveries
            .values()
            .find(|d| d.transaction_id == transaction_id)
            .cloned())
    }
}
