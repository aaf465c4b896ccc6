//! Public directory: search, caregiver detail, photos, availability.

pub mod service;

pub use service::{CaregiverDetail, DirectoryService};
