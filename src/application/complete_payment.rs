use uuid::Uuid;

use crate::domain::ports::{
    CardPayment, ChargeRequest, CustomerStoreBox, DeliveryStoreBox, PaymentGatewayBox,
    ProductStoreBox, TransactionStoreBox,
};
use crate::domain::{NewDelivery, Outcome, Transaction, TransactionStatus};
use crate::error::{Result, StoreError};

/// Input for completing a pending transaction's payment.
#[derive(Debug, Clone)]
pub struct CompletePaymentInput {
    pub transaction_id: Uuid,
    pub card_token: String,
    pub installments: u32,
    pub acceptance_token: String,
    pub accept_personal_auth: String,
}

/// The orchestration core of the checkout.
///
/// A PENDING transaction is charged against the gateway exactly once per
/// invocation. The gateway call is the single point of external interaction:
/// its failure marks the transaction ERROR before the failure surfaces, and
/// its response status is always persisted, with stock and delivery side
/// effects gated strictly on APPROVED. No retry happens here; after any
/// terminal status a repeat call is rejected by the PENDING guard.
pub struct CompletePayment {
    transactions: TransactionStoreBox,
    gateway: PaymentGatewayBox,
    products: ProductStoreBox,
    deliveries: DeliveryStoreBox,
    customers: CustomerStoreBox,
    currency: String,
}

impl CompletePayment {
    pub fn new(
        transactions: TransactionStoreBox,
        gateway: PaymentGatewayBox,
        products: ProductStoreBox,
        deliveries: DeliveryStoreBox,
        customers: CustomerStoreBox,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            transactions,
            gateway,
            products,
            deliveries,
            customers,
            currency: currency.into(),
        }
    }

    pub async fn execute(&self, input: CompletePaymentInput) -> Result<Outcome<Transaction>> {
        let Some(transaction) = self.transactions.find_by_id(input.transaction_id).await? else {
            return Ok(Outcome::fail("Transaction not found".to_string()));
        };
        if transaction.status != TransactionStatus::Pending {
            return Ok(Outcome::fail(
                "Transaction is not in PENDING status".to_string(),
            ));
        }

        let request = ChargeRequest {
            amount_cents: transaction.total_cents,
            currency: self.currency.clone(),
            customer_email: transaction.customer.email.clone(),
            reference: transaction.reference.clone(),
            payment: CardPayment {
                token: input.card_token,
                installments: input.installments,
            },
            acceptance_token: input.acceptance_token,
            accept_personal_auth: input.accept_personal_auth,
        };

        let response = match self.gateway.create_charge(request).await {
            Ok(response) => response,
            Err(err) => {
                // The one place a failure writes locally first: without this
                // the transaction would be left silently PENDING.
                tracing::warn!(
                    reference = %transaction.reference,
                    error = %err,
                    "gateway charge failed"
                );
                self.transactions
                    .update_status(transaction.id, TransactionStatus::Error, None)
                    .await?;
                return Ok(Outcome::fail(format!("Payment gateway error: {err}")));
            }
        };

        let new_status = TransactionStatus::from_gateway(&response.status);
        let gateway_id = Some(response.id).filter(|id| !id.is_empty());
        let updated = self
            .transactions
            .update_status(transaction.id, new_status, gateway_id)
            .await?
            .ok_or_else(|| {
                StoreError::Integrity(format!(
                    "transaction {} disappeared during status update",
                    transaction.id
                ))
            })?;

        if new_status == TransactionStatus::Approved {
            self.products
                .decrement_stock(transaction.product_id, transaction.quantity)
                .await?;

            // Address and city come from a fresh customer lookup, not the
            // checkout input. A missing customer record means no delivery is
            // created and the approved transaction is still returned as ok.
            match self.customers.find_by_id(transaction.customer_id).await? {
                Some(customer) => {
                    self.deliveries
                        .create(NewDelivery {
                            transaction_id: transaction.id,
                            customer_id: customer.id,
                            address: customer.address,
                            city: customer.city,
                        })
                        .await?;
                }
                None => {
                    tracing::warn!(
                        reference = %transaction.reference,
                        "approved payment has no customer record; skipping delivery"
                    );
                }
            }
        }

        tracing::info!(
            reference = %updated.reference,
            status = %updated.status,
            "payment completion finished"
        );
        Ok(Outcome::ok(updated))
    }
}
