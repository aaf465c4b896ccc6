//! HTTP request handlers, grouped by domain.

pub mod auth;
pub mod health;
pub mod matching;
pub mod messaging;
pub mod payment;
pub mod profile;
pub mod review;
pub mod search;

use validator::Validate;

use carelink_core::error::AppError;

use crate::error::ApiError;

/// Runs DTO validation, flattening failures into one validation error.
fn validate_body<T: Validate>(body: &T) -> Result<(), ApiError> {
    body.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))
}
