//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account on the CareLink marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Marketplace side, fixed at registration.
    pub role: UserRole,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// URL or path of the profile picture.
    pub profile_picture: Option<String>,
    /// Whether the account is active (inactive accounts are hidden from
    /// listings and cannot log in).
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Marketplace side.
    pub role: UserRole,
    /// First name (optional).
    pub first_name: Option<String>,
    /// Last name (optional).
    pub last_name: Option<String>,
}

/// Data for updating the mutable parts of a user account.
///
/// `None` fields retain their prior value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state or region.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New bio.
    pub bio: Option<String>,
    /// New profile picture URL.
    pub profile_picture: Option<String>,
}
