//! Server assembly and lifecycle.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;

use carelink_auth::jwt::{JwtDecoder, JwtEncoder};
use carelink_auth::password::{PasswordHasher, PasswordValidator};
use carelink_core::config::AppConfig;
use carelink_core::error::AppError;
use carelink_database::repositories::{
    AvailabilityRepository, CaregiverProfileRepository, ConversationRepository,
    FamilyProfileRepository, MatchRequestRepository, MessageRepository, PhotoRepository,
    ReviewRepository, TransactionRepository, UserRepository,
};
use carelink_payment::{MockPayPalGateway, PaymentGateway};
use carelink_service::{
    AccountService, DirectoryService, MatchService, MessagingService, PaymentService,
    ReviewService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Wires repositories, services, and routes into the shared state.
pub fn build_state(config: AppConfig, pool: PgPool) -> AppState {
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let caregiver_repo = Arc::new(CaregiverProfileRepository::new(pool.clone()));
    let family_repo = Arc::new(FamilyProfileRepository::new(pool.clone()));
    let availability_repo = Arc::new(AvailabilityRepository::new(pool.clone()));
    let photo_repo = Arc::new(PhotoRepository::new(pool.clone()));
    let match_repo = Arc::new(MatchRequestRepository::new(pool.clone()));
    let conversation_repo = Arc::new(ConversationRepository::new(pool.clone()));
    let message_repo = Arc::new(MessageRepository::new(pool.clone()));
    let review_repo = Arc::new(ReviewRepository::new(pool.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone()));

    let hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockPayPalGateway::new(&config.payment));

    let account_service = Arc::new(AccountService::new(
        user_repo.clone(),
        caregiver_repo.clone(),
        family_repo.clone(),
        hasher,
        password_validator,
        jwt_encoder,
        jwt_decoder.clone(),
    ));
    let directory_service = Arc::new(DirectoryService::new(
        caregiver_repo.clone(),
        family_repo.clone(),
        availability_repo,
        photo_repo,
        review_repo.clone(),
        user_repo.clone(),
    ));
    let match_service = Arc::new(MatchService::new(
        match_repo.clone(),
        caregiver_repo.clone(),
        family_repo.clone(),
    ));
    let messaging_service = Arc::new(MessagingService::new(
        conversation_repo,
        message_repo,
        match_repo.clone(),
        user_repo.clone(),
    ));
    let review_service = Arc::new(ReviewService::new(
        review_repo,
        match_repo.clone(),
        caregiver_repo.clone(),
        family_repo.clone(),
    ));
    let payment_service = Arc::new(PaymentService::new(
        transaction_repo,
        match_repo,
        user_repo,
        caregiver_repo,
        family_repo,
        gateway,
    ));

    AppState {
        config: Arc::new(config),
        db_pool: pool,
        jwt_decoder,
        account_service,
        directory_service,
        match_service,
        messaging_service,
        review_service,
        payment_service,
    }
}

/// Runs the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
