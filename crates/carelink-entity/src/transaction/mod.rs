//! Payment transaction entity and status.

pub mod model;
pub mod status;

pub use model::{CreateTransaction, Transaction};
pub use status::TransactionStatus;
