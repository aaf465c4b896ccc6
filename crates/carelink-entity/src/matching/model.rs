//! Match request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MatchStatus;

/// A directional proposal from a family profile to a caregiver profile.
///
/// Rows are never physically deleted; terminal rows remain as an audit
/// trail and a fresh row is created to retry a declined pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRequest {
    /// Unique match request identifier.
    pub id: Uuid,
    /// Initiating family profile.
    pub family_profile_id: Uuid,
    /// Targeted caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Current lifecycle state.
    pub status: MatchStatus,
    /// Optional note from the family to the caregiver.
    pub message_to_caregiver: Option<String>,
    /// Proposed start date for the engagement.
    pub proposed_start_date: Option<DateTime<Utc>>,
    /// Requested weekly hours.
    pub requested_hours_per_week: Option<i32>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request last changed state.
    pub updated_at: DateTime<Utc>,
}

impl MatchRequest {
    /// Whether this request is an accepted, mutual match.
    pub fn is_mutual(&self) -> bool {
        self.status == MatchStatus::Accepted
    }
}

/// Data required to create a new match request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    /// Initiating family profile.
    pub family_profile_id: Uuid,
    /// Targeted caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Optional note to the caregiver.
    pub message_to_caregiver: Option<String>,
    /// Proposed start date.
    pub proposed_start_date: Option<DateTime<Utc>>,
    /// Requested weekly hours.
    pub requested_hours_per_week: Option<i32>,
}
