//! Review repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::review::model::{CreateReview, Review};

/// A review joined with the reviewing family's display fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewListing {
    /// Review identifier.
    pub id: Uuid,
    /// Authoring family profile.
    pub family_profile_id: Uuid,
    /// Reviewed caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Rating in `[1, 5]`.
    pub rating: i16,
    /// Optional comment.
    pub comment: Option<String>,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last edited.
    pub updated_at: DateTime<Utc>,
    /// Reviewer's username.
    pub reviewer_username: String,
    /// Reviewer's first name.
    pub reviewer_first_name: Option<String>,
    /// Reviewer's last name.
    pub reviewer_last_name: Option<String>,
}

/// Repository for caregiver reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// Insert a new review.
    ///
    /// The one-review-per-pair constraint surfaces as `Conflict`.
    pub async fn create(&self, data: &CreateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (family_profile_id, caregiver_profile_id, rating, comment) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.family_profile_id)
        .bind(data.caregiver_profile_id)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("You have already reviewed this caregiver")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create review", e),
        })
    }

    /// Apply a partial update to a review's rating and comment.
    pub async fn update(
        &self,
        id: Uuid,
        rating: Option<i16>,
        comment: Option<&str>,
    ) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET \
             rating = COALESCE($2, rating), \
             comment = COALESCE($3, comment), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update review", e))
    }

    /// Delete a review.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List reviews of a caregiver, newest first, with reviewer names.
    pub async fn list_for_caregiver(
        &self,
        caregiver_profile_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReviewListing>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE caregiver_profile_id = $1")
                .bind(caregiver_profile_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count reviews", e)
                })?;

        let reviews = sqlx::query_as::<_, ReviewListing>(
            "SELECT r.id, r.family_profile_id, r.caregiver_profile_id, r.rating, r.comment, \
             r.created_at, r.updated_at, \
             u.username AS reviewer_username, u.first_name AS reviewer_first_name, \
             u.last_name AS reviewer_last_name \
             FROM reviews r \
             JOIN family_profiles fp ON fp.id = r.family_profile_id \
             JOIN users u ON u.id = fp.user_id \
             WHERE r.caregiver_profile_id = $1 \
             ORDER BY r.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(caregiver_profile_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))?;

        Ok(PageResponse::new(
            reviews,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Average rating of a caregiver, `None` when unreviewed.
    pub async fn average_rating(&self, caregiver_profile_id: Uuid) -> AppResult<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rating)::float8 FROM reviews WHERE caregiver_profile_id = $1",
        )
        .bind(caregiver_profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute average rating", e)
        })
    }
}
