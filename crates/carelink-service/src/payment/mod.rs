//! Mocked PayPal payment workflow.

pub mod service;

pub use service::{InitiatePaymentRequest, PaymentInitiation, PaymentService};
