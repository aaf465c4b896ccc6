//! Family profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Family-side attributes, one-to-one with a `family` user.
///
/// Created (empty) in the same transaction as the owning user; never
/// deleted independently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyProfile {
    /// Unique profile identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Number of children needing care.
    pub number_of_children: Option<i32>,
    /// Children's ages, free text.
    pub children_ages: Option<String>,
    /// Specific care needs.
    pub specific_needs: Option<String>,
    /// Preferred care type, e.g. "full_time", "after_school".
    pub preferred_care_type: Option<String>,
    /// Location preferences for care.
    pub location_preferences: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of family-specific fields.
///
/// `None` fields retain their prior value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFamilyProfile {
    /// New number of children.
    pub number_of_children: Option<i32>,
    /// New children's ages.
    pub children_ages: Option<String>,
    /// New specific needs.
    pub specific_needs: Option<String>,
    /// New preferred care type.
    pub preferred_care_type: Option<String>,
    /// New location preferences.
    pub location_preferences: Option<String>,
}
