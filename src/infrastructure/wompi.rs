use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::domain::ports::{
    AcceptanceTokens, CardDetails, CardToken, ChargeRequest, ChargeResponse, PaymentGateway,
};
use crate::error::GatewayError;

/// HTTP client for the Wompi card-payment gateway.
///
/// Tokenization and acceptance-token lookup authenticate with the merchant's
/// public key; charge creation and queries use the private key. Every
/// response body arrives wrapped in a `{ "data": … }` envelope.
#[derive(Clone)]
pub struct WompiGateway {
    client: Client,
    base_url: String,
    public_key: String,
    private_key: String,
}

impl WompiGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            public_key: config.public_key.clone(),
            private_key: config.private_key.clone(),
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Serialize)]
struct TokenizeCardBody<'a> {
    number: &'a str,
    cvc: &'a str,
    exp_month: &'a str,
    exp_year: &'a str,
    card_holder: &'a str,
}

#[derive(Deserialize)]
struct TokenData {
    id: String,
    brand: String,
}

#[derive(Deserialize)]
struct MerchantData {
    presigned_acceptance: Presigned,
    presigned_personal_data_auth: Presigned,
}

#[derive(Deserialize)]
struct Presigned {
    acceptance_token: String,
    #[serde(default)]
    permalink: String,
}

#[derive(Serialize)]
struct ChargeBody<'a> {
    amount_in_cents: i64,
    currency: &'a str,
    customer_email: &'a str,
    reference: &'a str,
    payment_method: PaymentMethodBody<'a>,
    acceptance_token: &'a str,
    accept_personal_auth: &'a str,
}

#[derive(Serialize)]
struct PaymentMethodBody<'a> {
    r#type: &'static str,
    installments: u32,
    token: &'a str,
}

#[derive(Deserialize)]
struct ChargeData {
    id: String,
    status: String,
    reference: String,
    amount_in_cents: i64,
}

impl From<ChargeData> for ChargeResponse {
    fn from(data: ChargeData) -> Self {
        Self {
            id: data.id,
            status: data.status,
            reference: data.reference,
            amount_cents: data.amount_in_cents,
        }
    }
}

#[async_trait]
impl PaymentGateway for WompiGateway {
    async fn tokenize_card(&self, card: CardDetails) -> Result<CardToken, GatewayError> {
        let body = TokenizeCardBody {
            number: &card.number,
            cvc: &card.cvc,
            exp_month: &card.exp_month,
            exp_year: &card.exp_year,
            card_holder: &card.card_holder,
        };
        let envelope: Envelope<TokenData> = self
            .client
            .post(format!("{}/tokens/cards", self.base_url))
            .bearer_auth(&self.public_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(CardToken {
            token_id: envelope.data.id,
            brand: envelope.data.brand,
        })
    }

    async fn acceptance_tokens(&self) -> Result<AcceptanceTokens, GatewayError> {
        let envelope: Envelope<MerchantData> = self
            .client
            .get(format!("{}/merchants/{}", self.base_url, self.public_key))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let data = envelope.data;
        Ok(AcceptanceTokens {
            acceptance_token: data.presigned_acceptance.acceptance_token,
            accept_personal_auth: data.presigned_personal_data_auth.acceptance_token,
            permalink: data.presigned_acceptance.permalink,
        })
    }

    async fn create_charge(&self, request: ChargeRequest) -> Result<ChargeResponse, GatewayError> {
        let body = ChargeBody {
            amount_in_cents: request.amount_cents,
            currency: &request.currency,
            customer_email: &request.customer_email,
            reference: &request.reference,
            payment_method: PaymentMethodBody {
                r#type: "CARD",
                installments: request.payment.installments,
                token: &request.payment.token,
            },
            acceptance_token: &request.acceptance_token,
            accept_personal_auth: &request.accept_personal_auth,
        };

        tracing::debug!(reference = %request.reference, "creating gateway charge");
        let envelope: Envelope<ChargeData> = self
            .client
            .post(format!("{}/transactions", self.base_url))
            .bearer_auth(&self.private_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.data.into())
    }

    async fn fetch_charge(&self, charge_id: &str) -> Result<ChargeResponse, GatewayError> {
        let envelope: Envelope<ChargeData> = self
            .client
            .get(format!("{}/transactions/{}", self.base_url, charge_id))
            .bearer_auth(&self.private_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(envelope.data.into())
    }
}
