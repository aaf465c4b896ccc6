//! Authentication extractor.
//!
//! Pulls the bearer token from the `Authorization` header, verifies it
//! as an access token, and hands the handler a [`RequestContext`].

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use carelink_core::error::AppError;
use carelink_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(AuthUser(ctx): AuthUser) -> ... { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Authorization header must be a bearer token"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        Ok(AuthUser(RequestContext::new(
            claims.user_id(),
            claims.role,
            claims.username,
        )))
    }
}
