use uuid::Uuid;

use crate::config::FeeSchedule;
use crate::domain::ports::{CustomerStoreBox, ProductStoreBox, TransactionStoreBox};
use crate::domain::{NewCustomer, NewTransaction, Outcome, Transaction, TransactionStatus};
use crate::error::Result;

/// Checkout input for opening a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub product_id: Uuid,
    pub quantity: u32,
    pub customer_email: String,
    pub customer_full_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_city: String,
}

/// Opens a purchase: checks availability, resolves the customer, prices the
/// order and persists a PENDING transaction.
///
/// Stock is only checked here, never reserved; two concurrent calls for the
/// same product can both pass the check. The decrement happens at payment
/// completion.
pub struct CreateTransaction {
    products: ProductStoreBox,
    customers: CustomerStoreBox,
    transactions: TransactionStoreBox,
    fees: FeeSchedule,
}

impl CreateTransaction {
    pub fn new(
        products: ProductStoreBox,
        customers: CustomerStoreBox,
        transactions: TransactionStoreBox,
        fees: FeeSchedule,
    ) -> Self {
        Self {
            products,
            customers,
            transactions,
            fees,
        }
    }

    pub async fn execute(&self, input: CreateTransactionInput) -> Result<Outcome<Transaction>> {
        let checks = Outcome::combine(vec![
            validate_quantity(input.quantity),
            validate_email(&input.customer_email),
        ]);
        if checks.is_failure() {
            return Ok(Outcome::fail(checks.error()));
        }

        let Some(product) = self.products.find_by_id(input.product_id).await? else {
            return Ok(Outcome::fail("Product not found".to_string()));
        };
        if product.stock < input.quantity {
            return Ok(Outcome::fail("Insufficient stock".to_string()));
        }

        // An existing customer is reused as stored; the profile fields in the
        // input only matter the first time an email is seen.
        let customer = match self.customers.find_by_email(&input.customer_email).await? {
            Some(existing) => existing,
            None => {
                self.customers
                    .create(NewCustomer {
                        email: input.customer_email,
                        full_name: input.customer_full_name,
                        phone: input.customer_phone,
                        address: input.customer_address,
                        city: input.customer_city,
                    })
                    .await?
            }
        };

        let amount_cents = product.price_cents * i64::from(input.quantity);
        let total_cents = amount_cents + self.fees.base_fee_cents + self.fees.delivery_fee_cents;

        let transaction = self
            .transactions
            .create(NewTransaction {
                reference: generate_reference(),
                customer_id: customer.id,
                product_id: product.id,
                quantity: input.quantity,
                amount_cents,
                base_fee_cents: self.fees.base_fee_cents,
                delivery_fee_cents: self.fees.delivery_fee_cents,
                total_cents,
                status: TransactionStatus::Pending,
            })
            .await?;

        tracing::info!(
            reference = %transaction.reference,
            total_cents = transaction.total_cents,
            "transaction created"
        );
        Ok(Outcome::ok(transaction))
    }
}

fn validate_quantity(quantity: u32) -> Outcome<()> {
    if quantity >= 1 {
        Outcome::ok(())
    } else {
        Outcome::fail("Quantity must be at least 1".to_string())
    }
}

fn validate_email(email: &str) -> Outcome<()> {
    if email.trim().is_empty() {
        Outcome::fail("Customer email is required".to_string())
    } else {
        Outcome::ok(())
    }
}

/// `TXN-` plus the first 8 hex chars of a v4 UUID, uppercased.
fn generate_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TXN-{}", id[..8].to_uppercase())
}
