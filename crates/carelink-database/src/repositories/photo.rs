//! Caregiver gallery photo repository.

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_entity::profile::photo::Photo;

/// Repository for caregiver gallery photos.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a photo by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Photo>> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find photo", e))
    }

    /// List photos for a caregiver profile, newest first.
    pub async fn list_for_profile(&self, profile_id: Uuid) -> AppResult<Vec<Photo>> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE caregiver_profile_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list photos", e))
    }

    /// Attach a photo to a caregiver profile.
    pub async fn create(
        &self,
        profile_id: Uuid,
        image_url: &str,
        caption: Option<&str>,
    ) -> AppResult<Photo> {
        sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (caregiver_profile_id, image_url, caption) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(profile_id)
        .bind(image_url)
        .bind(caption)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create photo", e))
    }

    /// Delete a photo.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete photo", e))?;
        Ok(result.rows_affected() > 0)
    }
}
