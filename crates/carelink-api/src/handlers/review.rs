//! Review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use carelink_core::types::pagination::PageResponse;
use carelink_database::repositories::review::ReviewListing;
use carelink_entity::review::model::Review;
use carelink_service::review::service::SubmitReviewRequest;

use crate::dto::request::{SubmitReviewBody, UpdateReviewBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_body;
use crate::state::AppState;

/// `POST /api/reviews`
pub async fn submit(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<SubmitReviewBody>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    validate_body(&body)?;
    let review = state
        .review_service
        .submit(
            &ctx,
            SubmitReviewRequest {
                caregiver_profile_id: body.caregiver_profile_id,
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review))))
}

/// `PUT /api/reviews/{id}`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(review_id): Path<Uuid>,
    Json(body): Json<UpdateReviewBody>,
) -> Result<Json<ApiResponse<Review>>, ApiError> {
    validate_body(&body)?;
    let review = state
        .review_service
        .update(&ctx, review_id, body.rating, body.comment.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(review)))
}

/// `DELETE /api/reviews/{id}`
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.review_service.delete(&ctx, review_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Review deleted"))))
}

/// `GET /api/caregivers/{id}/reviews`
pub async fn list_for_caregiver(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(caregiver_profile_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ReviewListing>>>, ApiError> {
    let results = state
        .review_service
        .list_for_caregiver(caregiver_profile_id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}
