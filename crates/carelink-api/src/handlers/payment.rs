//! Payment transaction handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use carelink_core::types::pagination::PageResponse;
use carelink_entity::transaction::model::Transaction;
use carelink_service::payment::service::{InitiatePaymentRequest, PaymentInitiation};

use crate::dto::request::{ExecutePaymentBody, InitiatePaymentBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_body;
use crate::state::AppState;

/// `POST /api/payments`
pub async fn initiate(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<InitiatePaymentBody>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentInitiation>>), ApiError> {
    validate_body(&body)?;
    let initiation = state
        .payment_service
        .initiate(
            &ctx,
            InitiatePaymentRequest {
                payee_id: body.payee_id,
                match_request_id: body.match_request_id,
                amount: body.amount,
                currency: body.currency,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(initiation))))
}

/// `POST /api/payments/{id}/execute`
pub async fn execute(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(transaction_id): Path<Uuid>,
    Json(body): Json<ExecutePaymentBody>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    validate_body(&body)?;
    let transaction = state
        .payment_service
        .execute(&ctx, transaction_id, &body.payer_id)
        .await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// `POST /api/payments/{id}/cancel`
pub async fn cancel(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let transaction = state.payment_service.cancel(&ctx, transaction_id).await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// `GET /api/payments/{id}`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let transaction = state.payment_service.get(&ctx, transaction_id).await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// `GET /api/payments/by-provider/{payment_id}`
///
/// Looks a transaction up by the provider payment id carried on the
/// approval redirect (`paymentId=PAYID-...`).
pub async fn get_by_payment_id(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(payment_id): Path<String>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let transaction = state
        .payment_service
        .get_by_payment_id(&ctx, &payment_id)
        .await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// `GET /api/payments`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Transaction>>>, ApiError> {
    let results = state
        .payment_service
        .list(&ctx, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}
