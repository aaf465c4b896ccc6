//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Standard success envelope for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for success responses.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A plain informational message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A count of affected items.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// Number of items affected.
    pub count: u64,
}

/// Result of a token refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

/// Service health report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the database answered a ping.
    pub database: bool,
}
