pub mod complete_payment;
pub mod create_transaction;

pub use complete_payment::{CompletePayment, CompletePaymentInput};
pub use create_transaction::{CreateTransaction, CreateTransactionInput};
