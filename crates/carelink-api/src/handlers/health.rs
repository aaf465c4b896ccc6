//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = sqlx::query("SELECT 1")
        .execute(&state.db_pool)
        .await
        .is_ok();
    let status = if database { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_string(),
        database,
    })
}
