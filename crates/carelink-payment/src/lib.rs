//! # carelink-payment
//!
//! Payment gateway abstraction for CareLink. The [`PaymentGateway`]
//! trait is the seam between payment business logic and the provider;
//! [`MockPayPalGateway`] is the sandbox implementation used in
//! development and tests.

pub mod gateway;
pub mod paypal;

pub use gateway::{PaymentAuthorization, PaymentCapture, PaymentGateway};
pub use paypal::MockPayPalGateway;
