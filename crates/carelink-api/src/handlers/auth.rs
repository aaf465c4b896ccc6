//! Authentication and account handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use carelink_service::account::service::{
    AccountProfile, LoginRequest, LoginResponse, RegisterRequest,
};

use crate::dto::request::{LoginBody, RefreshBody, RegisterBody};
use crate::dto::response::{ApiResponse, MessageResponse, RefreshResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<ApiResponse<AccountProfile>>), ApiError> {
    validate_body(&body)?;
    let account = state
        .account_service
        .register(RegisterRequest {
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    validate_body(&body)?;
    let response = state
        .account_service
        .login(LoginRequest {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// `POST /api/auth/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshBody>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    validate_body(&body)?;
    let (access_token, expires_at) = state.account_service.refresh(&body.refresh_token).await?;
    Ok(Json(ApiResponse::ok(RefreshResponse {
        access_token,
        expires_at,
    })))
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<AccountProfile>>, ApiError> {
    let account = state.account_service.me(&ctx).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// `DELETE /api/users/me`
pub async fn deactivate(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.account_service.deactivate(&ctx).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Account deactivated",
    ))))
}
