pub mod customer;
pub mod delivery;
pub mod outcome;
pub mod ports;
pub mod product;
pub mod transaction;

pub use customer::{Customer, NewCustomer};
pub use delivery::{Delivery, DeliveryStatus, NewDelivery};
pub use outcome::Outcome;
pub use product::Product;
pub use transaction::{NewTransaction, Transaction, TransactionStatus};
