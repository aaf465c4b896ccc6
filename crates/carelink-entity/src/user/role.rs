//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two sides of the marketplace.
///
/// A user's role is established at registration and immutable thereafter;
/// it determines which role-specific profile the account owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A family looking for care.
    Family,
    /// A caregiver offering care.
    Caregiver,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Caregiver => "caregiver",
        }
    }

    /// The opposite side of the marketplace.
    pub fn counterpart(&self) -> UserRole {
        match self {
            Self::Family => Self::Caregiver,
            Self::Caregiver => Self::Family,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(Self::Family),
            "caregiver" => Ok(Self::Caregiver),
            other => Err(format!("Invalid user role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_str() {
        for role in [UserRole::Family, UserRole::Caregiver] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_counterpart() {
        assert_eq!(UserRole::Family.counterpart(), UserRole::Caregiver);
        assert_eq!(UserRole::Caregiver.counterpart(), UserRole::Family);
    }
}
