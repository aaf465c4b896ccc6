//! Payment gateway trait.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carelink_core::result::AppResult;

/// A payment created at the provider, awaiting payer approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Provider payment identifier (PAYID-...).
    pub payment_id: String,
    /// URL the payer must visit to approve the payment.
    pub approval_url: String,
}

/// A successfully captured payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCapture {
    /// Provider capture reference (SALE-...).
    pub reference_id: String,
}

/// Provider-side payment operations.
///
/// Implementations talk to (or simulate) the payment provider only;
/// transaction records and status transitions are owned by the payment
/// service on top of this trait.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment at the provider and return its id plus the
    /// approval URL for the payer.
    async fn create_payment(
        &self,
        amount: Decimal,
        currency: &str,
        description: &str,
    ) -> AppResult<PaymentAuthorization>;

    /// Execute an approved payment, capturing the funds.
    async fn execute_payment(
        &self,
        payment_id: &str,
        payer_id: &str,
    ) -> AppResult<PaymentCapture>;
}
