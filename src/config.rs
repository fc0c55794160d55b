use dotenvy::dotenv;
use miette::{IntoDiagnostic, Result};
use std::env;

/// Deployment configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub fees: FeeSchedule,
    /// Fixed currency code sent with every charge.
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_url: String,
    /// Merchant public key: card tokenization and acceptance-token lookup.
    pub public_key: String,
    /// Merchant private key: charge creation and queries.
    pub private_key: String,
}

/// Flat fees added to every order, in minor currency units.
///
/// Injected into the create-transaction use case so deployments and tests can
/// vary them without touching the logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub base_fee_cents: i64,
    pub delivery_fee_cents: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee_cents: 500_000,
            delivery_fee_cents: 1_000_000,
        }
    }
}

pub const DEFAULT_CURRENCY: &str = "COP";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let fees = FeeSchedule {
            base_fee_cents: env_i64("BASE_FEE_CENTS", 500_000)?,
            delivery_fee_cents: env_i64("DELIVERY_FEE_CENTS", 1_000_000)?,
        };

        Ok(Config {
            gateway: GatewayConfig {
                api_url: env_or("PAYMENT_GATEWAY_API_URL", "https://api-sandbox.co.uat.wompi.dev/v1"),
                public_key: env_or(
                    "PAYMENT_GATEWAY_PUBLIC_KEY",
                    "pub_stagtest_g2u0HQd3ZMh05hsSgTS2lUV8t3s4mOt7",
                ),
                private_key: env_or(
                    "PAYMENT_GATEWAY_PRIVATE_KEY",
                    "prv_stagtest_5i0ZGIGiFcDQifYsXxvsny7Y37tKqFWg",
                ),
            },
            fees,
            currency: env_or("CURRENCY", DEFAULT_CURRENCY),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_i64(key: &str, default: i64) -> Result<i64> {
    match env::var(key) {
        Ok(raw) => raw.parse().into_diagnostic(),
        Err(_) => Ok(default),
    }
}
