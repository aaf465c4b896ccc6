//! Conversation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A two-party message channel between matched users.
///
/// The unordered participant pair is stored normalized as
/// `(participant_low, participant_high)` so the database can enforce
/// at-most-one conversation per pair with a plain UNIQUE constraint,
/// making find-or-create atomic under concurrent starts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: Uuid,
    /// Smaller of the two participant user ids.
    pub participant_low: Uuid,
    /// Larger of the two participant user ids.
    pub participant_high: Uuid,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
    /// Bumped to the timestamp of every new message; drives list ordering.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Whether the given user is one of the two participants.
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participant_low == user_id || self.participant_high == user_id
    }

    /// The participant other than `user_id`, if `user_id` is a participant.
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.participant_low == user_id {
            Some(self.participant_high)
        } else if self.participant_high == user_id {
            Some(self.participant_low)
        } else {
            None
        }
    }
}

/// Normalize an unordered user pair into `(low, high)` byte order.
///
/// Both orientations of the same pair map to the same tuple, so lookups
/// and the UNIQUE constraint are order-independent.
pub fn participant_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A conversation participant with display fields, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    /// Participant user id.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Profile picture URL.
    pub profile_picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(participant_pair(a, b), participant_pair(b, a));
    }

    #[test]
    fn test_pair_is_sorted() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (low, high) = participant_pair(a, b);
        assert!(low <= high);
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let (low, high) = participant_pair(a, b);
        let convo = Conversation {
            id: Uuid::new_v4(),
            participant_low: low,
            participant_high: high,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(convo.other_participant(low), Some(high));
        assert_eq!(convo.other_participant(high), Some(low));
        assert_eq!(convo.other_participant(Uuid::new_v4()), None);
    }
}
