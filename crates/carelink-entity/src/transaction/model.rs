//! Payment transaction entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TransactionStatus;

/// A payment attempt between two users, optionally tied to a match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: Uuid,
    /// Paying user.
    pub payer_id: Uuid,
    /// Receiving user.
    pub payee_id: Uuid,
    /// The match this payment references, if any.
    pub match_request_id: Option<Uuid>,
    /// Payment amount.
    pub amount: Decimal,
    /// ISO currency code, e.g. "USD".
    pub currency: String,
    /// Current lifecycle state.
    pub status: TransactionStatus,
    /// Provider payment id (PAYID-...) assigned at creation.
    pub paypal_payment_id: Option<String>,
    /// Provider capture reference (SALE-...) recorded on success.
    pub provider_reference_id: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction last changed state.
    pub updated_at: DateTime<Utc>,
}

/// Data required to record a new payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    /// Paying user.
    pub payer_id: Uuid,
    /// Receiving user.
    pub payee_id: Uuid,
    /// Referenced match, if any.
    pub match_request_id: Option<Uuid>,
    /// Payment amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
}
