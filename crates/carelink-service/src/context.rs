//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carelink_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the JWT by middleware and passed into service methods
/// so that every operation knows *who* is acting and on which side of
/// the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
        }
    }

    /// Returns whether the current user is on the family side.
    pub fn is_family(&self) -> bool {
        self.role == UserRole::Family
    }

    /// Returns whether the current user is on the caregiver side.
    pub fn is_caregiver(&self) -> bool {
        self.role == UserRole::Caregiver
    }
}
