//! Directory search handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_database::repositories::caregiver_profile::{CaregiverListing, CaregiverSearchFilter};
use carelink_database::repositories::family_profile::{FamilyListing, FamilySearchFilter};
use carelink_service::directory::service::CaregiverDetail;

use crate::dto::request::{CaregiverSearchQuery, FamilySearchQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `GET /api/caregivers`
pub async fn search_caregivers(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<CaregiverSearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<CaregiverListing>>>, ApiError> {
    let page = page_request(query.page, query.per_page);
    let filter = CaregiverSearchFilter {
        city: query.city,
        min_hourly_rate: query.min_hourly_rate,
        max_hourly_rate: query.max_hourly_rate,
        min_years_of_experience: query.min_years_of_experience,
        availability_status: query.availability_status,
        language: query.language,
    };
    let results = state.directory_service.search_caregivers(filter, page).await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// `GET /api/caregivers/{id}`
pub async fn caregiver_detail(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CaregiverDetail>>, ApiError> {
    let detail = state.directory_service.caregiver_detail(profile_id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// `GET /api/families`
pub async fn search_families(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
    Query(query): Query<FamilySearchQuery>,
) -> Result<Json<ApiResponse<PageResponse<FamilyListing>>>, ApiError> {
    let page = page_request(query.page, query.per_page);
    let filter = FamilySearchFilter {
        city: query.city,
        preferred_care_type: query.preferred_care_type,
        max_children: query.max_children,
    };
    let results = state
        .directory_service
        .search_families(&ctx, filter, page)
        .await?;
    Ok(Json(ApiResponse::ok(results)))
}

fn page_request(page: Option<u64>, per_page: Option<u64>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest::new(
        page.unwrap_or(defaults.page),
        per_page.unwrap_or(defaults.page_size),
    )
}
