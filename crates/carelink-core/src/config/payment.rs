//! Payment gateway configuration.

use serde::{Deserialize, Serialize};

/// PayPal gateway configuration.
///
/// The `mode` selects between the sandbox mock and a live integration;
/// only the sandbox mock is implemented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// PayPal REST client id.
    #[serde(default)]
    pub client_id: String,
    /// PayPal REST client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Gateway mode: `"sandbox"` or `"live"`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Public base URL of this application, used to build redirect URLs.
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,
    /// Path the payer is redirected to after approving a payment.
    #[serde(default = "default_return_path")]
    pub return_path: String,
    /// Path the payer is redirected to after cancelling a payment.
    #[serde(default = "default_cancel_path")]
    pub cancel_path: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            mode: default_mode(),
            app_base_url: default_app_base_url(),
            return_path: default_return_path(),
            cancel_path: default_cancel_path(),
        }
    }
}

fn default_mode() -> String {
    "sandbox".to_string()
}

fn default_app_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_return_path() -> String {
    "/api/payments/success".to_string()
}

fn default_cancel_path() -> String {
    "/api/payments/cancel".to_string()
}
