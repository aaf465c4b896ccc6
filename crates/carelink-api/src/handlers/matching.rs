//! Match request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::matching::model::MatchRequest;
use carelink_service::matching::service::InitiateMatchRequest;

use crate::dto::request::{InitiateMatchBody, MatchListQuery, RespondMatchBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_body;
use crate::state::AppState;

/// `POST /api/matches`
pub async fn initiate(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<InitiateMatchBody>,
) -> Result<(StatusCode, Json<ApiResponse<MatchRequest>>), ApiError> {
    validate_body(&body)?;
    let request = state
        .match_service
        .initiate(
            &ctx,
            InitiateMatchRequest {
                caregiver_profile_id: body.caregiver_profile_id,
                message_to_caregiver: body.message_to_caregiver,
                proposed_start_date: body.proposed_start_date,
                requested_hours_per_week: body.requested_hours_per_week,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// `GET /api/matches`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<ApiResponse<PageResponse<MatchRequest>>>, ApiError> {
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.page_size),
    );
    let results = state.match_service.list(&ctx, query.status, page).await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// `GET /api/matches/mutual`
pub async fn list_mutual(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<MatchRequest>>>, ApiError> {
    let results = state
        .match_service
        .list_mutual(&ctx, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// `GET /api/matches/{id}`
pub async fn get(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MatchRequest>>, ApiError> {
    let request = state.match_service.get(&ctx, match_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// `POST /api/matches/{id}/respond`
pub async fn respond(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(match_id): Path<Uuid>,
    Json(body): Json<RespondMatchBody>,
) -> Result<Json<ApiResponse<MatchRequest>>, ApiError> {
    let request = state
        .match_service
        .respond(&ctx, match_id, body.action)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// `POST /api/matches/{id}/withdraw`
pub async fn withdraw(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MatchRequest>>, ApiError> {
    let request = state.match_service.withdraw(&ctx, match_id).await?;
    Ok(Json(ApiResponse::ok(request)))
}
