//! Match request repository.
//!
//! The one-pending-request-per-pair rule lives in a partial unique
//! index, and every state change is a compare-and-set on `status =
//! 'pending'`. Concurrent responders race on the UPDATE; exactly one
//! wins and the rest see zero rows.

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::matching::model::{CreateMatchRequest, MatchRequest};
use carelink_entity::matching::status::MatchStatus;

/// Repository for match request lifecycle operations.
#[derive(Debug, Clone)]
pub struct MatchRequestRepository {
    pool: PgPool,
}

impl MatchRequestRepository {
    /// Create a new match request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a match request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatchRequest>> {
        sqlx::query_as::<_, MatchRequest>("SELECT * FROM match_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find match request", e)
            })
    }

    /// Insert a new pending match request.
    ///
    /// The partial unique index rejects a second pending request for the
    /// same pair; that surfaces as `Conflict`.
    pub async fn create(&self, data: &CreateMatchRequest) -> AppResult<MatchRequest> {
        sqlx::query_as::<_, MatchRequest>(
            "INSERT INTO match_requests (family_profile_id, caregiver_profile_id, \
             message_to_caregiver, proposed_start_date, requested_hours_per_week) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.family_profile_id)
        .bind(data.caregiver_profile_id)
        .bind(&data.message_to_caregiver)
        .bind(data.proposed_start_date)
        .bind(data.requested_hours_per_week)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("A pending request already exists for this pair")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create match request", e),
        })
    }

    /// Atomically move a pending request to a terminal status.
    ///
    /// Returns `None` when the request is missing or no longer pending;
    /// the caller re-reads the row to classify which.
    pub async fn transition_from_pending(
        &self,
        id: Uuid,
        next: MatchStatus,
    ) -> AppResult<Option<MatchRequest>> {
        sqlx::query_as::<_, MatchRequest>(
            "UPDATE match_requests SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update match request", e)
        })
    }

    /// List requests initiated by a family profile, most recently
    /// updated first.
    pub async fn list_for_family(
        &self,
        family_profile_id: Uuid,
        status: Option<MatchStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MatchRequest>> {
        self.list_by_side("family_profile_id", family_profile_id, status, page)
            .await
    }

    /// List requests targeting a caregiver profile, most recently
    /// updated first.
    pub async fn list_for_caregiver(
        &self,
        caregiver_profile_id: Uuid,
        status: Option<MatchStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MatchRequest>> {
        self.list_by_side("caregiver_profile_id", caregiver_profile_id, status, page)
            .await
    }

    async fn list_by_side(
        &self,
        column: &str,
        profile_id: Uuid,
        status: Option<MatchStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MatchRequest>> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM match_requests \
             WHERE {column} = $1 AND ($2::match_status IS NULL OR status = $2)"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(profile_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count match requests", e)
            })?;

        let list_sql = format!(
            "SELECT * FROM match_requests \
             WHERE {column} = $1 AND ($2::match_status IS NULL OR status = $2) \
             ORDER BY updated_at DESC LIMIT $3 OFFSET $4"
        );
        let requests = sqlx::query_as::<_, MatchRequest>(&list_sql)
            .bind(profile_id)
            .bind(status)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list match requests", e)
            })?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Whether an accepted match exists between a family and a caregiver
    /// profile.
    pub async fn exists_accepted_between(
        &self,
        family_profile_id: Uuid,
        caregiver_profile_id: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM match_requests \
             WHERE family_profile_id = $1 AND caregiver_profile_id = $2 AND status = 'accepted')",
        )
        .bind(family_profile_id)
        .bind(caregiver_profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check accepted match", e)
        })
    }

    /// Whether an accepted match exists between two users, regardless of
    /// which side each one is on.
    pub async fn exists_accepted_between_users(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM match_requests mr \
             JOIN family_profiles fp ON fp.id = mr.family_profile_id \
             JOIN caregiver_profiles cp ON cp.id = mr.caregiver_profile_id \
             WHERE mr.status = 'accepted' \
             AND ((fp.user_id = $1 AND cp.user_id = $2) OR (fp.user_id = $2 AND cp.user_id = $1)))",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check accepted match", e)
        })
    }
}
