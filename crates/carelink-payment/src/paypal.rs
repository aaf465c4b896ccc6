//! Sandbox PayPal gateway.
//!
//! Simulates the PayPal REST flow without network calls: `create`
//! issues a PAYID identifier and an approval URL, `execute` issues a
//! SALE capture reference. Identifier formats follow PayPal's.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use carelink_core::config::PaymentConfig;
use carelink_core::error::AppError;
use carelink_core::result::AppResult;

use super::gateway::{PaymentAuthorization, PaymentCapture, PaymentGateway};

/// In-process stand-in for the PayPal REST API.
#[derive(Debug, Clone)]
pub struct MockPayPalGateway {
    /// Public base URL used to build approval redirect URLs.
    app_base_url: String,
    /// Redirect path after payer approval.
    return_path: String,
    /// Redirect path after payer cancellation.
    cancel_path: String,
}

impl MockPayPalGateway {
    /// Create a new sandbox gateway from payment configuration.
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            app_base_url: config.app_base_url.clone(),
            return_path: config.return_path.clone(),
            cancel_path: config.cancel_path.clone(),
        }
    }

    fn new_payment_id() -> String {
        format!("PAYID-{}", short_token())
    }

    fn new_sale_id() -> String {
        format!("SALE-{}", short_token())
    }
}

/// 24 uppercase hex characters, the width PayPal uses for its ids.
fn short_token() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    hex[..24].to_string()
}

#[async_trait]
impl PaymentGateway for MockPayPalGateway {
    async fn create_payment(
        &self,
        amount: Decimal,
        currency: &str,
        description: &str,
    ) -> AppResult<PaymentAuthorization> {
        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        if currency.len() != 3 {
            return Err(AppError::validation("Currency must be a 3-letter ISO code"));
        }

        let payment_id = Self::new_payment_id();
        let approval_url = format!(
            "{}{}?paymentId={}&token=EC-{}",
            self.app_base_url,
            self.return_path,
            payment_id,
            short_token()
        );

        info!(
            payment_id = %payment_id,
            %amount,
            currency,
            description,
            "Created sandbox PayPal payment"
        );

        Ok(PaymentAuthorization {
            payment_id,
            approval_url,
        })
    }

    async fn execute_payment(
        &self,
        payment_id: &str,
        payer_id: &str,
    ) -> AppResult<PaymentCapture> {
        if !payment_id.starts_with("PAYID-") {
            return Err(AppError::validation("Unknown payment id format"));
        }
        if payer_id.is_empty() {
            return Err(AppError::validation("Payer id must not be empty"));
        }

        let reference_id = Self::new_sale_id();
        info!(payment_id, reference_id = %reference_id, "Executed sandbox PayPal payment");

        Ok(PaymentCapture { reference_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gateway() -> MockPayPalGateway {
        MockPayPalGateway::new(&PaymentConfig::default())
    }

    #[tokio::test]
    async fn test_create_payment_issues_payid_and_approval_url() {
        let auth = gateway()
            .create_payment(dec!(25.50), "USD", "Weekly care")
            .await
            .unwrap();
        assert!(auth.payment_id.starts_with("PAYID-"));
        assert_eq!(auth.payment_id.len(), "PAYID-".len() + 24);
        assert!(auth.approval_url.contains(&auth.payment_id));
    }

    #[tokio::test]
    async fn test_create_payment_rejects_non_positive_amount() {
        assert!(gateway().create_payment(dec!(0), "USD", "x").await.is_err());
        assert!(
            gateway()
                .create_payment(dec!(-5), "USD", "x")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_execute_payment_issues_sale_reference() {
        let gw = gateway();
        let auth = gw.create_payment(dec!(10), "EUR", "x").await.unwrap();
        let capture = gw
            .execute_payment(&auth.payment_id, "PAYER-123")
            .await
            .unwrap();
        assert!(capture.reference_id.starts_with("SALE-"));
    }

    #[tokio::test]
    async fn test_execute_payment_rejects_malformed_payment_id() {
        assert!(gateway().execute_payment("bogus", "PAYER-1").await.is_err());
    }
}
