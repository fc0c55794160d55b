use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Fault raised by a persistence backend.
///
/// These are infrastructure errors, not business failures: the use cases
/// propagate them untouched with `?` and leave it to the caller to translate
/// them into a generic failure response.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("data integrity error: {0}")]
    Integrity(String),
}

/// Fault raised by the payment gateway client.
///
/// The complete-payment use case is the only place these are caught: the
/// local transaction is marked ERROR before the failure is surfaced.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Response(String),
}
