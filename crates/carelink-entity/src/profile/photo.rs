//! Caregiver gallery photos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A photo attached to a caregiver profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    /// Unique photo identifier.
    pub id: Uuid,
    /// Owning caregiver profile.
    pub caregiver_profile_id: Uuid,
    /// URL or path of the stored image.
    pub image_url: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// When the photo was uploaded.
    pub uploaded_at: DateTime<Utc>,
}
