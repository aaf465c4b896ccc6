//! Caregiver availability slot repository.

use sqlx::PgPool;
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_entity::profile::availability::{AvailabilitySlot, NewAvailabilitySlot};

/// Repository for recurring weekly availability slots.
#[derive(Debug, Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    /// Create a new availability repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a slot by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AvailabilitySlot>> {
        sqlx::query_as::<_, AvailabilitySlot>("SELECT * FROM availability_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find availability slot", e)
            })
    }

    /// List all slots for a caregiver profile, ordered by day and start.
    pub async fn list_for_profile(&self, profile_id: Uuid) -> AppResult<Vec<AvailabilitySlot>> {
        sqlx::query_as::<_, AvailabilitySlot>(
            "SELECT * FROM availability_slots WHERE caregiver_profile_id = $1 \
             ORDER BY day_of_week, start_time",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list availability slots", e)
        })
    }

    /// Insert a new slot for a caregiver profile.
    ///
    /// A duplicate exact slot surfaces as `Conflict`.
    pub async fn create(
        &self,
        profile_id: Uuid,
        slot: &NewAvailabilitySlot,
    ) -> AppResult<AvailabilitySlot> {
        sqlx::query_as::<_, AvailabilitySlot>(
            "INSERT INTO availability_slots (caregiver_profile_id, day_of_week, start_time, end_time) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(profile_id)
        .bind(slot.day_of_week)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("An identical availability slot already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create availability slot", e),
        })
    }

    /// Replace a slot's window.
    ///
    /// Returns `None` when the slot no longer exists; colliding with an
    /// identical slot surfaces as `Conflict`.
    pub async fn update(
        &self,
        id: Uuid,
        slot: &NewAvailabilitySlot,
    ) -> AppResult<Option<AvailabilitySlot>> {
        sqlx::query_as::<_, AvailabilitySlot>(
            "UPDATE availability_slots \
             SET day_of_week = $2, start_time = $3, end_time = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(slot.day_of_week)
        .bind(slot.start_time)
        .bind(slot.end_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict("An identical availability slot already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update availability slot", e),
        })
    }

    /// Delete a slot.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM availability_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete availability slot", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
