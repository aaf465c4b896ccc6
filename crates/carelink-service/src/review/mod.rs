//! Caregiver reviews.

pub mod service;

pub use service::{ReviewService, SubmitReviewRequest};
