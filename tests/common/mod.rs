use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storefront_checkout::application::{
    CompletePayment, CompletePaymentInput, CreateTransaction, CreateTransactionInput,
};
use storefront_checkout::config::FeeSchedule;
use storefront_checkout::domain::Product;
use storefront_checkout::domain::ports::{
    AcceptanceTokens, CardDetails, CardToken, ChargeRequest, ChargeResponse, PaymentGateway,
};
use storefront_checkout::error::GatewayError;
use storefront_checkout::infrastructure::in_memory::InMemoryStore;
use uuid::Uuid;

/// Gateway double that answers charges from a queue of scripted replies and
/// records every request. Cloning shares the queue and the recording.
#[derive(Clone, Default)]
pub struct RecordingGateway {
    replies: Arc<Mutex<Vec<Reply>>>,
    requests: Arc<Mutex<Vec<ChargeRequest>>>,
}

#[derive(Clone)]
pub enum Reply {
    Charge { id: String, status: String },
    Error(String),
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_status(&self, id: &str, status: &str) {
        self.replies.lock().unwrap().push(Reply::Charge {
            id: id.to_string(),
            status: status.to_string(),
        });
    }

    pub fn enqueue_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push(Reply::Error(message.to_string()));
    }

    pub fn requests(&self) -> Vec<ChargeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn tokenize_card(&self, _card: CardDetails) -> Result<CardToken, GatewayError> {
        Ok(CardToken {
            token_id: "tok_test".to_string(),
            brand: "VISA".to_string(),
        })
    }

    async fn acceptance_tokens(&self) -> Result<AcceptanceTokens, GatewayError> {
        Ok(AcceptanceTokens {
            acceptance_token: "acc".to_string(),
            accept_personal_auth: "auth".to_string(),
            permalink: String::new(),
        })
    }

    async fn create_charge(&self, request: ChargeRequest) -> Result<ChargeResponse, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Reply::Error("no scripted reply".to_string())
            } else {
                replies.remove(0)
            }
        };
        match reply {
            Reply::Charge { id, status } => Ok(ChargeResponse {
                id,
                status,
                reference: request.reference,
                amount_cents: request.amount_cents,
            }),
            Reply::Error(message) => Err(GatewayError::Response(message)),
        }
    }

    async fn fetch_charge(&self, _charge_id: &str) -> Result<ChargeResponse, GatewayError> {
        Err(GatewayError::Response("not scripted".to_string()))
    }
}

pub fn create_use_case(store: &InMemoryStore, fees: FeeSchedule) -> CreateTransaction {
    CreateTransaction::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
        fees,
    )
}

pub fn complete_use_case(store: &InMemoryStore, gateway: &RecordingGateway) -> CompletePayment {
    CompletePayment::new(
        Box::new(store.clone()),
        Box::new(gateway.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
        "COP",
    )
}

pub async fn seed_product(store: &InMemoryStore, price_cents: i64, stock: u32) -> Product {
    let product = Product::new("Test Product", "A test product", price_cents, "img", stock);
    store.insert_product(product.clone()).await;
    product
}

pub fn checkout_input(product_id: Uuid, quantity: u32, email: &str) -> CreateTransactionInput {
    CreateTransactionInput {
        product_id,
        quantity,
        customer_email: email.to_string(),
        customer_full_name: "Jane Buyer".to_string(),
        customer_phone: "3001234567".to_string(),
        customer_address: "Calle 1 # 2-3".to_string(),
        customer_city: "Bogota".to_string(),
    }
}

pub fn payment_input(transaction_id: Uuid) -> CompletePaymentInput {
    CompletePaymentInput {
        transaction_id,
        card_token: "tok_test".to_string(),
        installments: 1,
        acceptance_token: "acc".to_string(),
        accept_personal_auth: "auth".to_string(),
    }
}
