//! Caregiver profile repository, including directory search.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::profile::caregiver::{CaregiverProfile, UpdateCaregiverProfile};

/// Filters for the public caregiver directory.
///
/// All fields are optional; absent fields do not constrain the search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaregiverSearchFilter {
    /// Case-insensitive substring match on the caregiver's city.
    pub city: Option<String>,
    /// Minimum hourly rate (inclusive).
    pub min_hourly_rate: Option<Decimal>,
    /// Maximum hourly rate (inclusive).
    pub max_hourly_rate: Option<Decimal>,
    /// Minimum years of experience (inclusive).
    pub min_years_of_experience: Option<i32>,
    /// Exact availability headline, e.g. "available".
    pub availability_status: Option<String>,
    /// Case-insensitive substring match on languages spoken.
    pub language: Option<String>,
}

/// A caregiver directory entry: profile joined with public user fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaregiverListing {
    /// Caregiver profile identifier.
    pub profile_id: Uuid,
    /// Owning user identifier.
    pub user_id: Uuid,
    /// Public username.
    pub username: String,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Profile picture URL.
    pub profile_picture: Option<String>,
    /// Hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// Years of experience.
    pub years_of_experience: Option<i32>,
    /// Skills description.
    pub skills_description: Option<String>,
    /// Certifications held.
    pub certifications: Option<String>,
    /// Languages spoken.
    pub languages_spoken: Option<String>,
    /// Availability headline.
    pub availability_status: Option<String>,
}

const LISTING_SELECT: &str = "SELECT cp.id AS profile_id, u.id AS user_id, u.username, \
     u.first_name, u.last_name, u.city, u.state, u.country, u.bio, u.profile_picture, \
     cp.hourly_rate, cp.years_of_experience, cp.skills_description, cp.certifications, \
     cp.languages_spoken, cp.availability_status \
     FROM caregiver_profiles cp JOIN users u ON u.id = cp.user_id \
     WHERE u.is_active = TRUE";

const LISTING_FILTERS: &str = " AND ($1::text IS NULL OR u.city ILIKE '%' || $1 || '%') \
     AND ($2::numeric IS NULL OR cp.hourly_rate >= $2) \
     AND ($3::numeric IS NULL OR cp.hourly_rate <= $3) \
     AND ($4::int IS NULL OR cp.years_of_experience >= $4) \
     AND ($5::text IS NULL OR cp.availability_status = $5) \
     AND ($6::text IS NULL OR cp.languages_spoken ILIKE '%' || $6 || '%')";

/// Repository for caregiver profile CRUD and directory search.
#[derive(Debug, Clone)]
pub struct CaregiverProfileRepository {
    pool: PgPool,
}

impl CaregiverProfileRepository {
    /// Create a new caregiver profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaregiverProfile>> {
        sqlx::query_as::<_, CaregiverProfile>("SELECT * FROM caregiver_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find caregiver profile", e)
            })
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<CaregiverProfile>> {
        sqlx::query_as::<_, CaregiverProfile>(
            "SELECT * FROM caregiver_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find caregiver profile", e)
        })
    }

    /// Insert an empty profile for a user inside an existing transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: Uuid,
    ) -> AppResult<CaregiverProfile> {
        sqlx::query_as::<_, CaregiverProfile>(
            "INSERT INTO caregiver_profiles (user_id) VALUES ($1) RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create caregiver profile", e)
        })
    }

    /// Apply a partial update to a caregiver's profile fields.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateCaregiverProfile,
    ) -> AppResult<Option<CaregiverProfile>> {
        sqlx::query_as::<_, CaregiverProfile>(
            "UPDATE caregiver_profiles SET \
             hourly_rate = COALESCE($2, hourly_rate), \
             years_of_experience = COALESCE($3, years_of_experience), \
             skills_description = COALESCE($4, skills_description), \
             certifications = COALESCE($5, certifications), \
             languages_spoken = COALESCE($6, languages_spoken), \
             availability_status = COALESCE($7, availability_status), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.hourly_rate)
        .bind(data.years_of_experience)
        .bind(&data.skills_description)
        .bind(&data.certifications)
        .bind(&data.languages_spoken)
        .bind(&data.availability_status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update caregiver profile", e)
        })
    }

    /// Search the public caregiver directory with optional filters.
    pub async fn search(
        &self,
        filter: &CaregiverSearchFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<CaregiverListing>> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM caregiver_profiles cp JOIN users u ON u.id = cp.user_id \
             WHERE u.is_active = TRUE{LISTING_FILTERS}"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&filter.city)
            .bind(filter.min_hourly_rate)
            .bind(filter.max_hourly_rate)
            .bind(filter.min_years_of_experience)
            .bind(&filter.availability_status)
            .bind(&filter.language)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count caregivers", e)
            })?;

        let list_sql = format!(
            "{LISTING_SELECT}{LISTING_FILTERS} ORDER BY cp.created_at DESC LIMIT $7 OFFSET $8"
        );
        let listings = sqlx::query_as::<_, CaregiverListing>(&list_sql)
            .bind(&filter.city)
            .bind(filter.min_hourly_rate)
            .bind(filter.max_hourly_rate)
            .bind(filter.min_years_of_experience)
            .bind(&filter.availability_status)
            .bind(&filter.language)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search caregivers", e)
            })?;

        Ok(PageResponse::new(
            listings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
