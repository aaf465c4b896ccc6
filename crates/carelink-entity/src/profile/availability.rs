//! Caregiver availability slots.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Day of the week for a recurring availability slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "day_of_week", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A recurring weekly time window during which a caregiver is available.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailabilitySlot {
    /// Unique slot identifier.
    pub id: Uuid,
    /// Owning caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// Day of the week.
    pub day_of_week: DayOfWeek,
    /// Window start (inclusive).
    pub start_time: NaiveTime,
    /// Window end (exclusive).
    pub end_time: NaiveTime,
}

impl AvailabilitySlot {
    /// Whether this slot overlaps another on the same day.
    ///
    /// Windows are half-open, so back-to-back slots do not overlap.
    pub fn overlaps(&self, other: &AvailabilitySlot) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

/// Data required to create an availability slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAvailabilitySlot {
    /// Day of the week.
    pub day_of_week: DayOfWeek,
    /// Window start.
    pub start_time: NaiveTime,
    /// Window end.
    pub end_time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: DayOfWeek, start: (u32, u32), end: (u32, u32)) -> AvailabilitySlot {
        AvailabilitySlot {
            id: Uuid::new_v4(),
            caregiver_profile_id: Uuid::new_v4(),
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_overlap_same_day() {
        let a = slot(DayOfWeek::Monday, (9, 0), (12, 0));
        let b = slot(DayOfWeek::Monday, (11, 0), (14, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_back_to_back_does_not_overlap() {
        let a = slot(DayOfWeek::Monday, (9, 0), (12, 0));
        let b = slot(DayOfWeek::Monday, (12, 0), (14, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_different_days_do_not_overlap() {
        let a = slot(DayOfWeek::Monday, (9, 0), (12, 0));
        let b = slot(DayOfWeek::Tuesday, (9, 0), (12, 0));
        assert!(!a.overlaps(&b));
    }
}
