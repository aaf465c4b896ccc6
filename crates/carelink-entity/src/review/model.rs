//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest permitted rating.
pub const MIN_RATING: i16 = 1;
/// Highest permitted rating.
pub const MAX_RATING: i16 = 5;

/// A family's review of a caregiver.
///
/// At most one review exists per (family profile, caregiver profile)
/// pair, enforced by a UNIQUE constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// Authoring family profile.
    pub family_profile_id: Uuid,
    /// Reviewed caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Rating in `[1, 5]`.
    pub rating: i16,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    /// Authoring family profile.
    pub family_profile_id: Uuid,
    /// Reviewed caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Rating in `[1, 5]`.
    pub rating: i16,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Whether a rating falls inside the permitted range.
pub fn rating_in_range(rating: i16) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(0));
        assert!(!rating_in_range(6));
        assert!(!rating_in_range(-3));
    }
}
