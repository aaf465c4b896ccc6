//! Caregiver profile entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Caregiver-side attributes, one-to-one with a `caregiver` user.
///
/// Created (empty) in the same transaction as the owning user; never
/// deleted independently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaregiverProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Hourly rate in the caregiver's currency.
    pub hourly_rate: Option<Decimal>,
    /// Years of professional experience.
    pub years_of_experience: Option<i32>,
    /// Free-text description of skills.
    pub skills_description: Option<String>,
    /// Certifications held.
    pub certifications: Option<String>,
    /// Languages spoken, comma separated.
    pub languages_spoken: Option<String>,
    /// Current availability headline, e.g. "available", "booked".
    pub availability_status: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of caregiver-specific fields.
///
/// `None` fields retain their prior value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCaregiverProfile {
    /// New hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// New years of experience.
    pub years_of_experience: Option<i32>,
    /// New skills description.
    pub skills_description: Option<String>,
    /// New certifications.
    pub certifications: Option<String>,
    /// New languages spoken.
    pub languages_spoken: Option<String>,
    /// New availability headline.
    pub availability_status: Option<String>,
}
