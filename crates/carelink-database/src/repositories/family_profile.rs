//! Family profile repository, including directory search.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use carelink_core::error::{AppError, ErrorKind};
use carelink_core::result::AppResult;
use carelink_core::types::pagination::{PageRequest, PageResponse};
use carelink_entity::profile::family::{FamilyProfile, UpdateFamilyProfile};

/// Filters for the family directory visible to caregivers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilySearchFilter {
    /// Case-insensitive substring match on the family's city.
    pub city: Option<String>,
    /// Exact preferred care type, e.g. "full_time".
    pub preferred_care_type: Option<String>,
    /// Maximum number of children (inclusive).
    pub max_children: Option<i32>,
}

/// A family directory entry: profile joined with public user fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyListing {
    /// Family profile identifier.
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
    /// Number of children needing care.
    pub number_of_children: Option<i32>,
    /// Children's ages, free text.
    pub children_ages: Option<String>,
    /// Specific care needs.
    pub specific_needs: Option<String>,
    /// Preferred care type.
    pub preferred_care_type: Option<String>,
    /// Location preferences.
    pub location_preferences: Option<String>,
}

const LISTING_SELECT: &str = "SELECT fp.id AS profile_id, u.id AS user_id, u.username, \
     u.first_name, u.last_name, u.city, u.state, u.country, u.bio, u.profile_picture, \
     fp.number_of_children, fp.children_ages, fp.specific_needs, fp.preferred_care_type, \
     fp.location_preferences \
     FROM family_profiles fp JOIN users u ON u.id = fp.user_id \
     WHERE u.is_active = TRUE";

const LISTING_FILTERS: &str = " AND ($1::text IS NULL OR u.city ILIKE '%' || $1 || '%') \
     AND ($2::text IS NULL OR fp.preferred_care_type = $2) \
     AND ($3::int IS NULL OR fp.number_of_children <= $3)";

/// Repository for family profile CRUD and directory search.
#[derive(Debug, Clone)]
pub struct FamilyProfileRepository {
    pool: PgPool,
}

impl FamilyProfileRepository {
    /// Create a new family profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FamilyProfile>> {
        sqlx::query_as::<_, FamilyProfile>("SELECT * FROM family_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find family profile", e)
            })
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<FamilyProfile>> {
        sqlx::query_as::<_, FamilyProfile>("SELECT * FROM family_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find family profile", e)
            })
    }

    /// Insert an empty profile for a user inside an existing transaction.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        user_id: Uuid,
    ) -> AppResult<FamilyProfile> {
        sqlx::query_as::<_, FamilyProfile>(
            "INSERT INTO family_profiles (user_id) VALUES ($1) RETURNING *",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create family profile", e)
        })
    }

    /// Apply a partial update to a family's profile fields.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateFamilyProfile,
    ) -> AppResult<Option<FamilyProfile>> {
        sqlx::query_as::<_, FamilyProfile>(
            "UPDATE family_profiles SET \
             number_of_children = COALESCE($2, number_of_children), \
             children_ages = COALESCE($3, children_ages), \
             specific_needs = COALESCE($4, specific_needs), \
             preferred_care_type = COALESCE($5, preferred_care_type), \
             location_preferences = COALESCE($6, location_preferences), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.number_of_children)
        .bind(&data.children_ages)
        .bind(&data.specific_needs)
        .bind(&data.preferred_care_type)
        .bind(&data.location_preferences)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update family profile", e)
        })
    }

    /// Search the family directory with optional filters.
    pub async fn search(
        &self,
        filter: &FamilySearchFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FamilyListing>> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM family_profiles fp JOIN users u ON u.id = fp.user_id \
             WHERE u.is_active = TRUE{LISTING_FILTERS}"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&filter.city)
            .bind(&filter.preferred_care_type)
            .bind(filter.max_children)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count families", e)
            })?;

        let list_sql = format!(
            "{LISTING_SELECT}{LISTING_FILTERS} ORDER BY fp.created_at DESC LIMIT $4 OFFSET $5"
        );
        let listings = sqlx::query_as::<_, FamilyListing>(&list_sql)
            .bind(&filter.city)
            .bind(&filter.preferred_care_type)
            .bind(filter.max_children)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search families", e)
            })?;

        Ok(PageResponse::new(
            listings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
