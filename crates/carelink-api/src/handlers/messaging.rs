//! Conversation and message handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use carelink_core::types::pagination::PageResponse;
use carelink_database::repositories::conversation::ConversationSummary;
use carelink_entity::conversation::message::Message;
use carelink_service::messaging::service::StartConversationResult;

use crate::dto::request::{PostMessageBody, StartConversationBody};
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_body;
use crate::state::AppState;

/// `POST /api/conversations`
///
/// Returns 201 when a new conversation was created, 200 when the
/// existing one was found.
pub async fn start_conversation(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<StartConversationBody>,
) -> Result<(StatusCode, Json<ApiResponse<StartConversationResult>>), ApiError> {
    let result = state
        .messaging_service
        .start_conversation(&ctx, body.user_id)
        .await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(result))))
}

/// `GET /api/conversations`
pub async fn list_conversations(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ConversationSummary>>>, ApiError> {
    let results = state
        .messaging_service
        .list_conversations(&ctx, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// `GET /api/conversations/{id}/messages`
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(conversation_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Message>>>, ApiError> {
    let results = state
        .messaging_service
        .list_messages(&ctx, conversation_id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// `POST /api/conversations/{id}/messages`
pub async fn post_message(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(conversation_id): Path<Uuid>,
    Json(body): Json<PostMessageBody>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    validate_body(&body)?;
    let message = state
        .messaging_service
        .post_message(&ctx, conversation_id, &body.body)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// `PUT /api/conversations/{id}/read`
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state
        .messaging_service
        .mark_read(&ctx, conversation_id)
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
