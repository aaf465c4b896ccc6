//! Role-specific profiles and their attachments.

pub mod availability;
pub mod caregiver;
pub mod family;
pub mod photo;

pub use availability::{AvailabilitySlot, DayOfWeek, NewAvailabilitySlot};
pub use caregiver::{CaregiverProfile, UpdateCaregiverProfile};
pub use family::{FamilyProfile, UpdateFamilyProfile};
pub use photo::Photo;
