//! Self-service profile handlers: account fields, role profiles, photos,
//! and availability.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use carelink_entity::profile::availability::{AvailabilitySlot, NewAvailabilitySlot};
use carelink_entity::profile::caregiver::{CaregiverProfile, UpdateCaregiverProfile};
use carelink_entity::profile::family::{FamilyProfile, UpdateFamilyProfile};
use carelink_entity::profile::photo::Photo;
use carelink_entity::user::{UpdateUser, User};

use crate::dto::request::{AddAvailabilityBody, AddPhotoBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// `PUT /api/users/me`
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<UpdateUser>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.account_service.update_me(&ctx, body).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// `PUT /api/users/me/caregiver-profile`
pub async fn update_caregiver_profile(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<UpdateCaregiverProfile>,
) -> Result<Json<ApiResponse<CaregiverProfile>>, ApiError> {
    let profile = state
        .account_service
        .update_caregiver_profile(&ctx, body)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// `PUT /api/users/me/family-profile`
pub async fn update_family_profile(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<UpdateFamilyProfile>,
) -> Result<Json<ApiResponse<FamilyProfile>>, ApiError> {
    let profile = state
        .account_service
        .update_family_profile(&ctx, body)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// `POST /api/caregivers/me/photos`
pub async fn add_photo(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<AddPhotoBody>,
) -> Result<(StatusCode, Json<ApiResponse<Photo>>), ApiError> {
    validate_body(&body)?;
    let photo = state
        .directory_service
        .add_photo(&ctx, &body.image_url, body.caption.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(photo))))
}

/// `DELETE /api/caregivers/me/photos/{id}`
pub async fn delete_photo(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(photo_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.directory_service.delete_photo(&ctx, photo_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Photo deleted"))))
}

/// `POST /api/caregivers/me/availability`
pub async fn add_availability(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Json(body): Json<AddAvailabilityBody>,
) -> Result<(StatusCode, Json<ApiResponse<AvailabilitySlot>>), ApiError> {
    let slot = state
        .directory_service
        .add_availability(
            &ctx,
            NewAvailabilitySlot {
                day_of_week: body.day_of_week,
                start_time: body.start_time,
                end_time: body.end_time,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(slot))))
}

/// `GET /api/caregivers/me/availability`
pub async fn list_availability(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<Vec<AvailabilitySlot>>>, ApiError> {
    let slots = state.directory_service.list_availability(&ctx).await?;
    Ok(Json(ApiResponse::ok(slots)))
}

/// `PUT /api/caregivers/me/availability/{id}`
pub async fn update_availability(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(slot_id): Path<Uuid>,
    Json(body): Json<AddAvailabilityBody>,
) -> Result<Json<ApiResponse<AvailabilitySlot>>, ApiError> {
    let slot = state
        .directory_service
        .update_availability(
            &ctx,
            slot_id,
            NewAvailabilitySlot {
                day_of_week: body.day_of_week,
                start_time: body.start_time,
                end_time: body.end_time,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(slot)))
}

/// `DELETE /api/caregivers/me/availability/{id}`
pub async fn delete_availability(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .directory_service
        .delete_availability(&ctx, slot_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Availability slot deleted",
    ))))
}
