//! Shared application state for the HTTP layer.

use std::sync::Arc;

use sqlx::PgPool;

use carelink_auth::jwt::JwtDecoder;
use carelink_core::config::AppConfig;
use carelink_service::{
    AccountService, DirectoryService, MatchService, MessagingService, PaymentService,
    ReviewService,
};

/// State shared across all request handlers.
///
/// Cheap to clone; every field is an `Arc` or a pooled handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, used by the health endpoint.
    pub db_pool: PgPool,
    /// JWT decoder for the auth extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Registration, login, and self-service account management.
    pub account_service: Arc<AccountService>,
    /// Caregiver and family directories.
    pub directory_service: Arc<DirectoryService>,
    /// Match request lifecycle.
    pub match_service: Arc<MatchService>,
    /// Conversations and messages.
    pub messaging_service: Arc<MessagingService>,
    /// Caregiver reviews.
    pub review_service: Arc<ReviewService>,
    /// Payment transactions.
    pub payment_service: Arc<PaymentService>,
}
